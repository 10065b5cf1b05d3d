/// Distribution statistics over a window of rates, in percent units.
/// Empty subsets report 0 rather than NaN.
#[derive(Debug, Clone, Default)]
pub struct Descriptive {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1); 0 when fewer than two samples.
    pub std_dev: f64,
    pub max: f64,
    pub min: f64,
    /// Mean of samples with rate > 0, or 0 if there are none.
    pub positive_mean: f64,
    /// Mean of samples with rate < 0, or 0 if there are none.
    pub negative_mean: f64,
    /// Fraction of samples with positive rate, in [0, 1].
    pub positive_share: f64,
}

pub fn descriptive(rates_pct: &[f64]) -> Descriptive {
    if rates_pct.is_empty() {
        return Descriptive::default();
    }

    let n = rates_pct.len() as f64;
    let mean = rates_pct.iter().sum::<f64>() / n;

    let std_dev = if rates_pct.len() < 2 {
        0.0
    } else {
        let var = rates_pct.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
        var.sqrt()
    };

    let positives: Vec<f64> = rates_pct.iter().copied().filter(|r| *r > 0.0).collect();
    let negatives: Vec<f64> = rates_pct.iter().copied().filter(|r| *r < 0.0).collect();

    Descriptive {
        count: rates_pct.len(),
        mean,
        median: median(rates_pct),
        std_dev,
        max: rates_pct.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        min: rates_pct.iter().copied().fold(f64::INFINITY, f64::min),
        positive_mean: subset_mean(&positives),
        negative_mean: subset_mean(&negatives),
        positive_share: positives.len() as f64 / n,
    }
}

fn subset_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Percentile over a window, linear interpolation between ranks. `q` in [0, 1].
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}
