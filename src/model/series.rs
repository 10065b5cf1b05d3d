use std::collections::HashSet;

use super::sample::FundingSample;

/// Canonical funding-rate series for one token: unique by timestamp, sorted
/// ascending. Rebuilt from scratch on every run; no cross-run state.
#[derive(Debug, Clone, Default)]
pub struct TokenSeries {
    samples: Vec<FundingSample>,
}

impl TokenSeries {
    /// Canonicalize raw chunk output. Chunks overlap at window boundaries, so
    /// duplicates by timestamp are expected; the first occurrence in arrival
    /// order wins. The result is sorted ascending by timestamp.
    pub fn canonicalize(raw: Vec<FundingSample>) -> Self {
        let mut seen: HashSet<i64> = HashSet::with_capacity(raw.len());
        let mut samples: Vec<FundingSample> = raw
            .into_iter()
            .filter(|s| seen.insert(s.time_ms))
            .collect();
        samples.sort_by_key(|s| s.time_ms);
        Self { samples }
    }

    pub fn samples(&self) -> &[FundingSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The full-history analysis window.
    pub fn full_window(&self) -> &[FundingSample] {
        &self.samples
    }

    /// The most recent `n` samples, or the whole series if shorter.
    pub fn recent_window(&self, n: usize) -> &[FundingSample] {
        let start = self.samples.len().saturating_sub(n);
        &self.samples[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time_ms: i64, rate: f64) -> FundingSample {
        FundingSample::new(time_ms, rate)
    }

    #[test]
    fn canonicalize_sorts_ascending() {
        let series = TokenSeries::canonicalize(vec![
            sample(30, 0.3),
            sample(10, 0.1),
            sample(20, 0.2),
        ]);
        let times: Vec<i64> = series.samples().iter().map(|s| s.time_ms).collect();
        assert_eq!(times, vec![10, 20, 30]);
    }

    #[test]
    fn duplicate_timestamps_keep_first_occurrence() {
        let series = TokenSeries::canonicalize(vec![
            sample(10, 0.5),
            sample(10, -0.5),
            sample(20, 0.2),
        ]);
        assert_eq!(series.len(), 2);
        assert!((series.samples()[0].rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn recent_window_clamps_to_series_length() {
        let series = TokenSeries::canonicalize(vec![sample(1, 0.0), sample(2, 0.0)]);
        assert_eq!(series.recent_window(500).len(), 2);
        assert_eq!(series.recent_window(1).len(), 1);
        assert_eq!(series.recent_window(1)[0].time_ms, 2);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        let series = TokenSeries::canonicalize(Vec::new());
        assert!(series.is_empty());
        assert!(series.recent_window(500).is_empty());
    }
}
