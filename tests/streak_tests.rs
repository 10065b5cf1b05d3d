use funding_stats::analysis::streaks;

#[test]
fn mixed_sign_series() {
    let summary = streaks(&[0.05, 0.15, 0.20, -0.05, -0.10, 0.30]);
    assert_eq!(summary.positive_lengths, vec![3, 1]);
    assert_eq!(summary.non_positive_lengths, vec![2]);
    assert!((summary.mean_positive() - 2.0).abs() < 1e-12);
    assert!((summary.mean_non_positive() - 2.0).abs() < 1e-12);
}

#[test]
fn streak_sum_invariant_holds_for_varied_series() {
    let cases: Vec<Vec<f64>> = vec![
        vec![],
        vec![0.1],
        vec![-0.1],
        vec![0.0, 0.0, 0.0],
        vec![0.1, -0.1, 0.1, -0.1],
        (0..257).map(|i| ((i * 7919) % 13) as f64 - 6.0).collect(),
    ];
    for rates in cases {
        let summary = streaks(&rates);
        assert_eq!(
            summary.total_samples(),
            rates.len(),
            "sum invariant failed for {:?}",
            rates
        );
    }
}

#[test]
fn one_sided_series_defaults() {
    let all_negative = streaks(&[-0.2, -0.1, -0.3, -0.4]);
    assert!(all_negative.mean_positive().abs() < f64::EPSILON);
    assert!((all_negative.mean_non_positive() - 4.0).abs() < 1e-12);

    let all_positive = streaks(&[0.2, 0.1, 0.3, 0.4]);
    assert!(all_positive.mean_non_positive().abs() < f64::EPSILON);
    assert!((all_positive.mean_positive() - 4.0).abs() < 1e-12);
}

#[test]
fn single_sample_is_one_streak() {
    let summary = streaks(&[0.5]);
    assert_eq!(summary.positive_lengths, vec![1]);
    assert!(summary.non_positive_lengths.is_empty());
}

#[test]
fn trailing_streak_is_flushed() {
    let summary = streaks(&[-0.1, 0.2, 0.2, 0.2]);
    assert_eq!(summary.non_positive_lengths, vec![1]);
    assert_eq!(summary.positive_lengths, vec![3]);
}
