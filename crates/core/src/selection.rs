//! Top-c selection parameters.

use crate::error::{AccuracyError, Result};

/// Slack factor of the score-release analysis.
///
/// Monotonic queries need half the slack of general ones.
pub fn monotonicity_factor(monotonic: bool) -> u32 {
    if monotonic {
        1
    } else {
        2
    }
}

/// Parameters of a top-c selection run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionConfig {
    /// Number of items to select.
    pub c: usize,
    /// Sensitivity of each score query.
    pub sensitivity: f64,
    /// Whether the score queries are monotonic.
    pub monotonic: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            c: 50,
            sensitivity: 1.0,
            monotonic: true,
        }
    }
}

impl SelectionConfig {
    /// Create a config for monotonic queries with unit sensitivity.
    pub fn new(c: usize) -> Self {
        Self {
            c,
            ..Self::default()
        }
    }

    /// Set the query sensitivity.
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Set whether queries are monotonic.
    pub fn with_monotonic(mut self, monotonic: bool) -> Self {
        self.monotonic = monotonic;
        self
    }

    /// Monotonicity factor `f` for this config.
    pub fn factor(&self) -> u32 {
        monotonicity_factor(self.monotonic)
    }

    /// Validate against a dataset of `k` items.
    pub fn validate(&self, k: usize) -> Result<()> {
        if k == 0 {
            return Err(AccuracyError::invalid("score sequence must not be empty"));
        }
        if self.c == 0 {
            return Err(AccuracyError::invalid("c must be positive"));
        }
        if self.c >= k {
            return Err(AccuracyError::invalid(format!(
                "c={} must be smaller than the dataset size k={k}",
                self.c
            )));
        }
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(AccuracyError::invalid(format!(
                "sensitivity must be positive and finite, got {}",
                self.sensitivity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_halves_for_monotonic() {
        assert_eq!(monotonicity_factor(true), 1);
        assert_eq!(monotonicity_factor(false), 2);
        assert_eq!(SelectionConfig::new(3).with_monotonic(false).factor(), 2);
    }

    #[test]
    fn validate_rejects_out_of_range_c() {
        assert!(SelectionConfig::new(0).validate(5).is_err());
        assert!(SelectionConfig::new(5).validate(5).is_err());
        assert!(SelectionConfig::new(1).validate(0).is_err());
        assert!(SelectionConfig::new(4).validate(5).is_ok());
    }

    #[test]
    fn validate_rejects_bad_sensitivity() {
        for s in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = SelectionConfig::new(2).with_sensitivity(s);
            assert!(matches!(
                cfg.validate(10),
                Err(AccuracyError::InvalidConfiguration { .. })
            ));
        }
    }
}
