//! End-to-end selection error rate distribution for one dataset.

use topc_privacy_core::{
    split_budget, threshold, AccuracyError, BudgetSplit, Result, ScoreSequence, SelectionConfig,
};
use tracing::info;

use crate::cdf::{build_cdf, relaxation_count, Cdf, SamplingMode};
use crate::oracle::FailureProbabilityOracle;
use crate::pdf::Pdf;
use crate::sampler::ErrorRateSampler;

/// Parameters of one accuracy analysis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SerAnalysis {
    /// Total privacy budget.
    pub epsilon: f64,
    /// Selection parameters.
    pub selection: SelectionConfig,
    /// Stride between sampled relaxations.
    pub step: usize,
    /// How relaxations are evaluated.
    pub mode: SamplingMode,
}

impl Default for SerAnalysis {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            selection: SelectionConfig::default(),
            step: 1,
            mode: SamplingMode::Sequential,
        }
    }
}

impl SerAnalysis {
    /// Create an analysis with unit step and sequential sampling.
    pub fn new(epsilon: f64, selection: SelectionConfig) -> Self {
        Self {
            epsilon,
            selection,
            ..Self::default()
        }
    }

    /// Set the relaxation stride.
    pub fn with_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// Set the sampling mode.
    pub fn with_mode(mut self, mode: SamplingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate against a dataset of `k` items.
    pub fn validate(&self, k: usize) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(AccuracyError::invalid(format!(
                "epsilon must be positive and finite, got {}",
                self.epsilon
            )));
        }
        if self.step == 0 {
            return Err(AccuracyError::invalid("step must be positive"));
        }
        self.selection.validate(k)
    }

    /// Compute the distribution of the selection error rate on `scores`.
    pub fn run<O>(&self, scores: &ScoreSequence, oracle: &O) -> Result<SerDistribution>
    where
        O: FailureProbabilityOracle + Sync,
    {
        let k = scores.len();
        self.validate(k)?;
        let c = self.selection.c;

        let threshold = threshold(c, scores)?;
        let budget = split_budget(self.epsilon, c, self.selection.monotonic)?;
        let rescaled = budget.rescaled(&self.selection);
        let samples = relaxation_count(threshold, self.step)?;
        info!(
            k,
            c,
            epsilon = self.epsilon,
            threshold,
            epsilon1 = rescaled.epsilon1,
            epsilon2 = rescaled.epsilon2,
            samples,
            "computing selection error rate distribution"
        );

        let sampler = ErrorRateSampler::new(scores, oracle, threshold, c, rescaled);
        let cdf = build_cdf(&sampler, self.step, self.mode)?;
        let pdf = Pdf::from_cdf(&cdf);

        Ok(SerDistribution {
            k,
            c,
            epsilon: self.epsilon,
            threshold,
            budget,
            rescaled,
            samples,
            cdf,
            pdf,
        })
    }
}

/// Result of one accuracy analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct SerDistribution {
    /// Dataset size.
    pub k: usize,
    /// Number of selected items.
    pub c: usize,
    /// Total privacy budget.
    pub epsilon: f64,
    /// Selection threshold `T`.
    pub threshold: f64,
    /// Budget split before rescaling.
    pub budget: BudgetSplit,
    /// Budget split passed to the oracle.
    pub rescaled: BudgetSplit,
    /// Number of relaxations sampled before deduplication.
    pub samples: usize,
    /// Cumulative distribution `Pr(SER <= x) >= 1 - beta`.
    pub cdf: Cdf,
    /// Approximate mass `Pr(SER = x)`.
    pub pdf: Pdf,
}
