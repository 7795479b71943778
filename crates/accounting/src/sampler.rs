//! Empirical selection error rate paired with the theoretical bound.

use topc_privacy_core::{AccuracyError, BudgetSplit, Result, ScoreSequence};

use crate::oracle::FailureProbabilityOracle;

/// One sampled point of the accuracy curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorPoint {
    /// Relaxation that produced this point.
    pub a: f64,
    /// Selection error rate.
    pub x: f64,
    /// Guaranteed probability `1 - beta`.
    pub y: f64,
}

/// Fraction of the top-c mass lost when the cutoff is relaxed to `T - a`.
///
/// Among the scores at least `T - a`, the `c` smallest are summed and
/// compared with the sum of the true top `c`.
pub fn selection_error_rate(
    scores: &ScoreSequence,
    threshold: f64,
    c: usize,
    a: f64,
) -> Result<f64> {
    let top = scores.top_sum(c);
    if top == 0 {
        return Err(AccuracyError::degenerate(a, format!("top-{c} scores sum to zero")));
    }
    let survivors = scores.count_at_least(threshold - a);
    let worst = scores.window_sum(survivors.saturating_sub(c), survivors);
    Ok(1.0 - worst as f64 / top as f64)
}

/// Samples `(SER, 1 - beta)` at a given relaxation.
#[derive(Debug)]
pub struct ErrorRateSampler<'a, O> {
    scores: &'a ScoreSequence,
    oracle: &'a O,
    threshold: f64,
    c: usize,
    budget: BudgetSplit,
}

impl<'a, O: FailureProbabilityOracle> ErrorRateSampler<'a, O> {
    /// Create a sampler. `budget` must already be rescaled.
    pub fn new(
        scores: &'a ScoreSequence,
        oracle: &'a O,
        threshold: f64,
        c: usize,
        budget: BudgetSplit,
    ) -> Self {
        Self {
            scores,
            oracle,
            threshold,
            c,
            budget,
        }
    }

    /// Selection threshold `T`.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Dataset size `k` passed to the oracle.
    pub fn dataset_size(&self) -> usize {
        self.scores.len()
    }

    /// Sample the curve at relaxation `a`.
    ///
    /// `a` must be finite and non-negative.
    pub fn sample(&self, a: f64) -> Result<ErrorPoint> {
        if !a.is_finite() || a < 0.0 {
            return Err(AccuracyError::invalid(format!(
                "relaxation must be finite and non-negative, got {a}"
            )));
        }
        let x = selection_error_rate(self.scores, self.threshold, self.c, a)?;
        let beta = self.oracle.failure_probability(
            a,
            self.dataset_size(),
            self.budget.epsilon1,
            self.budget.epsilon2,
        )?;
        if !(0.0..=1.0).contains(&beta) {
            return Err(AccuracyError::oracle(
                a,
                format!("beta={beta} is outside [0, 1]"),
            ));
        }
        Ok(ErrorPoint { a, x, y: 1.0 - beta })
    }
}
