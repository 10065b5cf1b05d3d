/// Streak scanner state: no streak open, or a running count of consecutive
/// positive / non-positive samples.
#[derive(Debug, Clone, Copy, PartialEq)]
enum StreakState {
    Idle,
    Positive(usize),
    NonPositive(usize),
}

/// Lengths of all maximal same-sign runs in a window, in scan order.
/// Classification is `rate_pct > 0` vs `rate_pct <= 0`; zero rates count as
/// non-positive.
#[derive(Debug, Clone, Default)]
pub struct StreakSummary {
    pub positive_lengths: Vec<usize>,
    pub non_positive_lengths: Vec<usize>,
}

impl StreakSummary {
    /// Mean positive streak length, 0 if no positive streak occurred.
    pub fn mean_positive(&self) -> f64 {
        mean_len(&self.positive_lengths)
    }

    /// Mean non-positive streak length, 0 if no non-positive streak occurred.
    pub fn mean_non_positive(&self) -> f64 {
        mean_len(&self.non_positive_lengths)
    }

    pub fn total_samples(&self) -> usize {
        self.positive_lengths.iter().sum::<usize>()
            + self.non_positive_lengths.iter().sum::<usize>()
    }
}

fn mean_len(lengths: &[usize]) -> f64 {
    if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    }
}

/// Scan a window chronologically, flushing a streak whenever the sign
/// classification changes and once more after the last sample.
pub fn streaks(rates_pct: &[f64]) -> StreakSummary {
    let mut summary = StreakSummary::default();
    let mut state = StreakState::Idle;

    for &rate in rates_pct {
        let positive = rate > 0.0;
        state = match (state, positive) {
            (StreakState::Idle, true) => StreakState::Positive(1),
            (StreakState::Idle, false) => StreakState::NonPositive(1),
            (StreakState::Positive(n), true) => StreakState::Positive(n + 1),
            (StreakState::NonPositive(n), false) => StreakState::NonPositive(n + 1),
            (StreakState::Positive(n), false) => {
                summary.positive_lengths.push(n);
                StreakState::NonPositive(1)
            }
            (StreakState::NonPositive(n), true) => {
                summary.non_positive_lengths.push(n);
                StreakState::Positive(1)
            }
        };
    }

    match state {
        StreakState::Idle => {}
        StreakState::Positive(n) => summary.positive_lengths.push(n),
        StreakState::NonPositive(n) => summary.non_positive_lengths.push(n),
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_sign_series_streaks() {
        let summary = streaks(&[0.05, 0.15, 0.20, -0.05, -0.10, 0.30]);
        assert_eq!(summary.positive_lengths, vec![3, 1]);
        assert_eq!(summary.non_positive_lengths, vec![2]);
        assert!((summary.mean_positive() - 2.0).abs() < 1e-12);
        assert!((summary.mean_non_positive() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn streak_lengths_sum_to_sample_count() {
        let rates = [0.1, -0.2, -0.2, 0.0, 0.3, 0.3, 0.3, -0.1];
        let summary = streaks(&rates);
        assert_eq!(summary.total_samples(), rates.len());
    }

    #[test]
    fn all_negative_has_zero_positive_persistence() {
        let summary = streaks(&[-0.1, -0.2, -0.3]);
        assert!(summary.positive_lengths.is_empty());
        assert!(summary.mean_positive().abs() < f64::EPSILON);
        assert!((summary.mean_non_positive() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn all_positive_has_zero_negative_persistence() {
        let summary = streaks(&[0.1, 0.2, 0.3]);
        assert!(summary.non_positive_lengths.is_empty());
        assert!(summary.mean_non_positive().abs() < f64::EPSILON);
        assert!((summary.mean_positive() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_rate_counts_as_non_positive() {
        let summary = streaks(&[0.1, 0.0, 0.1]);
        assert_eq!(summary.positive_lengths, vec![1, 1]);
        assert_eq!(summary.non_positive_lengths, vec![1]);
    }

    #[test]
    fn empty_series_has_no_streaks() {
        let summary = streaks(&[]);
        assert!(summary.positive_lengths.is_empty());
        assert!(summary.non_positive_lengths.is_empty());
        assert_eq!(summary.total_samples(), 0);
    }
}
