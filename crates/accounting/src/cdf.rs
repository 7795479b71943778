//! Empirical CDF of the selection error rate.

use std::collections::HashMap;

use rayon::prelude::*;
use topc_privacy_core::{AccuracyError, Result};
use tracing::{debug, trace};

use crate::oracle::FailureProbabilityOracle;
use crate::sampler::{ErrorPoint, ErrorRateSampler};

/// How relaxation points are evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SamplingMode {
    /// Evaluate points one after another.
    #[default]
    Sequential,
    /// Evaluate points on the rayon thread pool.
    Parallel,
}

/// Number of relaxations `0, step, 2 step, ...` not exceeding `threshold`.
pub fn relaxation_count(threshold: f64, step: usize) -> Result<usize> {
    if step == 0 {
        return Err(AccuracyError::invalid("step must be positive"));
    }
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(AccuracyError::invalid(format!(
            "threshold must be finite and non-negative, got {threshold}"
        )));
    }
    let steps = (threshold / step as f64).floor();
    if steps >= usize::MAX as f64 {
        return Err(AccuracyError::invalid(format!(
            "threshold {threshold} with step {step} has too many relaxations"
        )));
    }
    (steps as usize)
        .checked_add(1)
        .ok_or_else(|| AccuracyError::invalid("relaxation count overflows usize"))
}

/// Step function `Pr(SER <= x) >= y` with pairwise distinct `x`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cdf {
    points: Vec<ErrorPoint>,
}

impl Cdf {
    /// Build from samples in increasing relaxation order.
    ///
    /// For every `x` that occurs more than once only the last sample is
    /// kept. Duplicates need not be adjacent: an earlier sample is dropped
    /// even when other values lie between it and the last occurrence.
    pub fn from_samples(samples: Vec<ErrorPoint>) -> Self {
        let mut last_index: HashMap<u64, usize> = HashMap::with_capacity(samples.len());
        for (i, point) in samples.iter().enumerate() {
            last_index.insert(x_key(point.x), i);
        }
        let points = samples
            .into_iter()
            .enumerate()
            .filter(|(i, point)| last_index.get(&x_key(point.x)) == Some(i))
            .map(|(_, point)| point)
            .collect();
        Self { points }
    }

    /// Retained points.
    pub fn points(&self) -> &[ErrorPoint] {
        &self.points
    }

    /// Selection error rates.
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Guaranteed probabilities `1 - beta`.
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Number of retained points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no points were retained.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// 0.0 and -0.0 compare equal and must share a key.
fn x_key(x: f64) -> u64 {
    if x == 0.0 {
        0
    } else {
        x.to_bits()
    }
}

/// Sample every relaxation up to the sampler's threshold, in order.
pub fn sample_relaxations<O>(
    sampler: &ErrorRateSampler<'_, O>,
    step: usize,
    mode: SamplingMode,
) -> Result<Vec<ErrorPoint>>
where
    O: FailureProbabilityOracle + Sync,
{
    let count = relaxation_count(sampler.threshold(), step)?;
    let at = |i: usize| -> Result<ErrorPoint> {
        let a = (i * step) as f64;
        let point = sampler.sample(a)?;
        trace!(a, ser = point.x, one_minus_beta = point.y, "sampled relaxation");
        Ok(point)
    };
    match mode {
        SamplingMode::Sequential => (0..count).map(at).collect(),
        SamplingMode::Parallel => (0..count).into_par_iter().map(at).collect(),
    }
}

/// Sample the curve and reduce it to a CDF.
pub fn build_cdf<O>(
    sampler: &ErrorRateSampler<'_, O>,
    step: usize,
    mode: SamplingMode,
) -> Result<Cdf>
where
    O: FailureProbabilityOracle + Sync,
{
    let samples = sample_relaxations(sampler, step, mode)?;
    let sampled = samples.len();
    let cdf = Cdf::from_samples(samples);
    debug!(
        threshold = sampler.threshold(),
        step,
        ?mode,
        sampled,
        retained = cdf.len(),
        "built selection error rate cdf"
    );
    Ok(cdf)
}
