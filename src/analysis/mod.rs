pub mod autocorr;
pub mod descriptive;
pub mod high_rate;
pub mod streaks;

pub use autocorr::autocorrelation;
pub use descriptive::{descriptive, Descriptive};
pub use high_rate::{high_rate_events, HighRateEvent, HighRateSummary};
pub use streaks::{streaks, StreakSummary};

use crate::model::FundingSample;

/// All statistics computed for one analysis window.
#[derive(Debug, Clone)]
pub struct WindowStats {
    /// Window label, e.g. "full_history" or "last_500".
    pub label: String,
    pub descriptive: Descriptive,
    pub high_rate: HighRateSummary,
    /// Mean length of consecutive positive-rate runs (0 if none occurred).
    pub positive_persistence: f64,
    /// Mean length of consecutive non-positive-rate runs (0 if none occurred).
    pub negative_persistence: f64,
    /// (lag, Pearson correlation) pairs; NaN where the lag is unreachable.
    pub autocorrelation: Vec<(usize, f64)>,
}

/// Analyze one window of a canonical series. An empty window yields zeroed
/// aggregates and NaN autocorrelation rather than an error.
pub fn analyze_window(
    label: &str,
    window: &[FundingSample],
    high_rate_threshold_pct: f64,
    autocorr_max_lag: usize,
) -> WindowStats {
    let rates_pct: Vec<f64> = window.iter().map(|s| s.rate_pct()).collect();
    let streak_summary = streaks(&rates_pct);

    WindowStats {
        label: label.to_string(),
        descriptive: descriptive(&rates_pct),
        high_rate: high_rate_events(window, high_rate_threshold_pct),
        positive_persistence: streak_summary.mean_positive(),
        negative_persistence: streak_summary.mean_non_positive(),
        autocorrelation: autocorrelation(&rates_pct, autocorr_max_lag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_yields_defaults() {
        let stats = analyze_window("full_history", &[], 0.1, 24);
        assert_eq!(stats.descriptive.count, 0);
        assert!(stats.descriptive.mean.abs() < f64::EPSILON);
        assert_eq!(stats.high_rate.count, 0);
        assert!(stats.positive_persistence.abs() < f64::EPSILON);
        assert!(stats.negative_persistence.abs() < f64::EPSILON);
        assert_eq!(stats.autocorrelation.len(), 24);
        assert!(stats.autocorrelation.iter().all(|(_, r)| r.is_nan()));
    }

    #[test]
    fn mixed_sign_window() {
        // Rates in percent: [0.05, 0.15, 0.20, -0.05, -0.10, 0.30]
        let window: Vec<FundingSample> = [0.05, 0.15, 0.20, -0.05, -0.10, 0.30]
            .iter()
            .enumerate()
            .map(|(i, pct)| FundingSample::new(i as i64, pct / 100.0))
            .collect();

        let stats = analyze_window("full_history", &window, 0.1, 24);
        assert_eq!(stats.high_rate.count, 3);
        assert!((stats.positive_persistence - 2.0).abs() < 1e-9);
        assert!((stats.negative_persistence - 2.0).abs() < 1e-9);
    }
}
