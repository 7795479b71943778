//! Theoretical failure-probability bounds for noisy top-c selection.

use statrs::distribution::{ContinuousCDF, Laplace};
use topc_privacy_core::{AccuracyError, Result};

/// Bound on the probability that selection with relaxation `a` fails.
///
/// `k` is the dataset size and the epsilons are the rescaled per-query
/// budgets of the threshold test and the score release. Implementations must
/// be deterministic, and `1 - beta` should be non-decreasing in `a` for the
/// resulting CDF to be monotone. Callers do not verify that property.
pub trait FailureProbabilityOracle {
    /// Failure probability `beta` for relaxation `a`.
    fn failure_probability(&self, a: f64, k: usize, epsilon1: f64, epsilon2: f64) -> Result<f64>;
}

impl<F> FailureProbabilityOracle for F
where
    F: Fn(f64, usize, f64, f64) -> f64,
{
    fn failure_probability(&self, a: f64, k: usize, epsilon1: f64, epsilon2: f64) -> Result<f64> {
        Ok(self(a, k, epsilon1, epsilon2))
    }
}

/// Union bound over Laplace threshold noise and per-item score noise.
///
/// The threshold is perturbed with `Lap(1/epsilon1)` and each of the `k`
/// scores with `Lap(1/epsilon2)`. Selection with relaxation `a` fails only if
/// the threshold noise exceeds `t` or some score noise exceeds `a - t` in
/// magnitude. The split `t` is chosen in closed form to minimise
/// `Pr[|rho| >= t] + k Pr[|nu| >= a - t]`, and the result is capped at 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaplaceTailBound;

impl LaplaceTailBound {
    /// Create the bound.
    pub fn new() -> Self {
        Self
    }

    /// Relaxation share given to the threshold noise, within `[0, a]`.
    ///
    /// Inputs are checked by `failure_probability` before this is called.
    fn optimal_split(a: f64, k: usize, epsilon1: f64, epsilon2: f64) -> f64 {
        let t = ((epsilon1 / (k as f64 * epsilon2)).ln() + a * epsilon2) / (epsilon1 + epsilon2);
        t.max(0.0).min(a)
    }
}

fn two_sided_tail(a: f64, epsilon: f64, x: f64) -> Result<f64> {
    let dist = Laplace::new(0.0, 1.0 / epsilon)
        .map_err(|e| AccuracyError::oracle(a, format!("invalid laplace scale: {e}")))?;
    Ok((2.0 * dist.sf(x.max(0.0))).min(1.0))
}

impl FailureProbabilityOracle for LaplaceTailBound {
    fn failure_probability(&self, a: f64, k: usize, epsilon1: f64, epsilon2: f64) -> Result<f64> {
        if !a.is_finite() || a < 0.0 {
            return Err(AccuracyError::oracle(a, "relaxation must be finite and non-negative"));
        }
        if k == 0 {
            return Err(AccuracyError::oracle(a, "dataset size must be positive"));
        }
        for (name, eps) in [("epsilon1", epsilon1), ("epsilon2", epsilon2)] {
            if !eps.is_finite() || eps <= 0.0 {
                return Err(AccuracyError::oracle(
                    a,
                    format!("{name} must be positive and finite, got {eps}"),
                ));
            }
        }

        let t = Self::optimal_split(a, k, epsilon1, epsilon2);
        let threshold_tail = two_sided_tail(a, epsilon1, t)?;
        let score_tail = two_sided_tail(a, epsilon2, a - t)?;
        Ok((threshold_tail + k as f64 * score_tail).min(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn no_relaxation_always_fails() {
        let beta = LaplaceTailBound
            .failure_probability(0.0, 100, 0.5, 0.01)
            .expect("beta");
        assert_eq!(beta, 1.0);
    }

    #[test]
    fn matches_closed_form_tails() {
        let (a, k, e1, e2) = (600.0, 10usize, 0.05, 0.02);
        let t = LaplaceTailBound::optimal_split(a, k, e1, e2);
        let expected = (-t * e1).exp() + k as f64 * (-(a - t) * e2).exp();
        let beta = LaplaceTailBound
            .failure_probability(a, k, e1, e2)
            .expect("beta");
        assert!((beta - expected).abs() < 1e-12);
        assert!(beta < 1e-2);
    }

    #[test]
    fn optimal_split_balances_derivatives() {
        let (a, k, e1, e2) = (1_000.0, 50usize, 0.03, 0.001);
        let t = LaplaceTailBound::optimal_split(a, k, e1, e2);
        assert!(t > 0.0 && t < a);
        let lhs = e1 * (-t * e1).exp();
        let rhs = k as f64 * e2 * (-(a - t) * e2).exp();
        assert!((lhs - rhs).abs() <= 1e-9 * lhs.max(rhs));
    }

    #[test]
    fn optimal_split_stays_in_range() {
        assert_eq!(LaplaceTailBound::optimal_split(0.0, 10, 1.0, 1.0), 0.0);
        // ln(1 / 10) pulls the raw split below zero.
        assert_eq!(LaplaceTailBound::optimal_split(1.0, 10, 1.0, 1.0), 0.0);
        // ln(1000) pushes it past a.
        assert_eq!(LaplaceTailBound::optimal_split(2.0, 1, 1.0, 1e-3), 2.0);
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(LaplaceTailBound.failure_probability(-1.0, 5, 1.0, 1.0).is_err());
        assert!(LaplaceTailBound.failure_probability(f64::NAN, 5, 1.0, 1.0).is_err());
        assert!(LaplaceTailBound.failure_probability(1.0, 0, 1.0, 1.0).is_err());
        assert!(LaplaceTailBound.failure_probability(1.0, 5, 0.0, 1.0).is_err());
        assert!(LaplaceTailBound
            .failure_probability(1.0, 5, 1.0, f64::NAN)
            .is_err());
    }

    #[test]
    fn closures_are_oracles() {
        let flat = |_a: f64, _k: usize, _e1: f64, _e2: f64| 0.25;
        assert_eq!(flat.failure_probability(3.0, 1, 1.0, 1.0).expect("beta"), 0.25);
    }

    proptest! {
        #[test]
        fn beta_is_bounded_and_non_increasing(
            a in 0.0f64..5_000.0,
            delta in 0.0f64..500.0,
            k in 1usize..100_000,
            e1 in 1e-4f64..1.0,
            e2 in 1e-5f64..0.1,
        ) {
            let lo = LaplaceTailBound.failure_probability(a, k, e1, e2).expect("beta");
            let hi = LaplaceTailBound.failure_probability(a + delta, k, e1, e2).expect("beta");
            prop_assert!((0.0..=1.0).contains(&lo));
            prop_assert!((0.0..=1.0).contains(&hi));
            prop_assert!(hi <= lo + 1e-12);
        }
    }
}
