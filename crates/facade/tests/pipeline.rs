use topc_privacy::{
    split_budget, threshold, AccuracyError, LaplaceTailBound, SamplingMode, ScoreSequence,
    SelectionConfig, SerAnalysis,
};

#[test]
fn midpoint_threshold_example() {
    let scores = ScoreSequence::from_counts(vec![10, 8, 6, 4, 2]);
    assert_eq!(threshold(2, &scores).expect("threshold"), 7.0);
}

#[test]
fn split_preserves_total_budget() {
    for c in [1usize, 7, 50, 1_000] {
        for monotonic in [true, false] {
            let split = split_budget(0.1, c, monotonic).expect("split");
            assert!((split.epsilon1 + split.epsilon2 - 0.1).abs() < 1e-15);
        }
    }
}

#[test]
fn uniform_scores_give_flat_zero_curve() {
    let scores = ScoreSequence::from_counts(vec![5; 5]);
    let dist = SerAnalysis::new(1.0, SelectionConfig::new(1))
        .run(&scores, &LaplaceTailBound)
        .expect("distribution");
    assert_eq!(dist.threshold, 5.0);
    assert_eq!(dist.samples, 6);
    assert_eq!(dist.cdf.xs(), vec![0.0]);
    assert_eq!(dist.pdf.mass, dist.cdf.ys());
}

#[test]
fn single_zero_top_score_is_degenerate() {
    let scores = ScoreSequence::from_counts(vec![0, 0]);
    let err = SerAnalysis::new(1.0, SelectionConfig::new(1))
        .run(&scores, &LaplaceTailBound)
        .expect_err("degenerate");
    assert!(matches!(err, AccuracyError::DegenerateInput { a, .. } if a == 0.0));
}

#[test]
fn invalid_configuration_is_reported_before_sampling() {
    let scores = ScoreSequence::from_counts(vec![9, 4, 1]);
    let cases = [
        SerAnalysis::new(1.0, SelectionConfig::new(0)),
        SerAnalysis::new(1.0, SelectionConfig::new(3)),
        SerAnalysis::new(-1.0, SelectionConfig::new(1)),
        SerAnalysis::new(1.0, SelectionConfig::new(1).with_sensitivity(0.0)),
        SerAnalysis::new(1.0, SelectionConfig::new(1)).with_step(0),
    ];
    let panicking = |_a: f64, _k: usize, _e1: f64, _e2: f64| -> f64 {
        panic!("oracle must not be queried for an invalid configuration")
    };
    for analysis in cases {
        let err = analysis.run(&scores, &panicking).expect_err("invalid");
        assert!(matches!(err, AccuracyError::InvalidConfiguration { .. }), "{err}");
    }
}

#[test]
fn oracle_out_of_range_names_the_relaxation() {
    let scores = ScoreSequence::from_counts(vec![10, 8, 6, 4, 2]);
    let oracle = |a: f64, _k: usize, _e1: f64, _e2: f64| if a >= 3.0 { 1.25 } else { 0.5 };
    let err = SerAnalysis::new(1.0, SelectionConfig::new(2))
        .run(&scores, &oracle)
        .expect_err("bad beta");
    assert_eq!(err.relaxation(), Some(3.0));
    assert!(err.to_string().contains("a=3"));
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let scores = ScoreSequence::parse("512 300 300 120 64 64 33 20 8 8 2 1").expect("scores");
    let base = SerAnalysis::new(0.8, SelectionConfig::new(4).with_monotonic(false)).with_step(3);
    let seq = base.run(&scores, &LaplaceTailBound).expect("sequential");
    let par = base
        .with_mode(SamplingMode::Parallel)
        .run(&scores, &LaplaceTailBound)
        .expect("parallel");
    assert_eq!(seq, par);
}
