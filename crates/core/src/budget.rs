//! Privacy budget allocation between the threshold test and score release.

use crate::error::{AccuracyError, Result};
use crate::selection::{monotonicity_factor, SelectionConfig};

/// Two-part privacy budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BudgetSplit {
    /// Budget of the noisy threshold test.
    pub epsilon1: f64,
    /// Budget of the noisy score release.
    pub epsilon2: f64,
}

impl BudgetSplit {
    /// Total budget `epsilon1 + epsilon2`.
    pub fn total(&self) -> f64 {
        self.epsilon1 + self.epsilon2
    }

    /// Rescale to per-query noise parameters.
    ///
    /// `epsilon1` is divided by the sensitivity and `epsilon2` by
    /// `sensitivity * f * c`. The sum no longer equals the total budget.
    pub fn rescaled(&self, config: &SelectionConfig) -> Self {
        let f = f64::from(config.factor());
        Self {
            epsilon1: self.epsilon1 / config.sensitivity,
            epsilon2: self.epsilon2 / (config.sensitivity * f * config.c as f64),
        }
    }
}

/// Split `epsilon` so that the two error contributions balance.
///
/// `epsilon1 = epsilon / (1 + (f c)^(2/3))`, `epsilon2 = epsilon - epsilon1`.
pub fn split_budget(epsilon: f64, c: usize, monotonic: bool) -> Result<BudgetSplit> {
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(AccuracyError::invalid(format!(
            "epsilon must be positive and finite, got {epsilon}"
        )));
    }
    if c == 0 {
        return Err(AccuracyError::invalid("c must be positive"));
    }
    let fc = f64::from(monotonicity_factor(monotonic)) * c as f64;
    let epsilon1 = epsilon / (1.0 + fc.powf(2.0 / 3.0));
    Ok(BudgetSplit {
        epsilon1,
        epsilon2: epsilon - epsilon1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_item_monotonic_splits_evenly() {
        let split = split_budget(1.0, 1, true).expect("split");
        assert!((split.epsilon1 - 0.5).abs() < 1e-12);
        assert!((split.epsilon2 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn non_monotonic_gives_less_to_threshold() {
        let mono = split_budget(0.1, 50, true).expect("split");
        let general = split_budget(0.1, 50, false).expect("split");
        assert!(general.epsilon1 < mono.epsilon1);
        // (2 * 4)^(2/3) = 4
        let s = split_budget(1.0, 4, false).expect("split");
        assert!((s.epsilon1 - 0.2).abs() < 1e-12);
    }

    #[test]
    fn rejects_invalid_epsilon_and_c() {
        assert!(split_budget(0.0, 3, true).is_err());
        assert!(split_budget(-1.0, 3, true).is_err());
        assert!(split_budget(f64::NAN, 3, true).is_err());
        assert!(split_budget(1.0, 0, true).is_err());
    }

    #[test]
    fn rescale_divides_by_sensitivity_and_slack() {
        let cfg = SelectionConfig::new(4)
            .with_sensitivity(2.0)
            .with_monotonic(false);
        let split = BudgetSplit {
            epsilon1: 1.0,
            epsilon2: 8.0,
        };
        let r = split.rescaled(&cfg);
        assert!((r.epsilon1 - 0.5).abs() < 1e-12);
        assert!((r.epsilon2 - 0.5).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn parts_sum_to_total(
            epsilon in 1e-4f64..20.0,
            c in 1usize..5_000,
            monotonic in any::<bool>(),
        ) {
            let split = split_budget(epsilon, c, monotonic).expect("split");
            prop_assert!(split.epsilon1 > 0.0);
            prop_assert!(split.epsilon2 > 0.0);
            prop_assert!((split.total() - epsilon).abs() <= 1e-12 * epsilon.max(1.0));
        }
    }
}
