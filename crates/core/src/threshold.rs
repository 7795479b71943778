//! Selection cutoff between the c-th and (c+1)-th largest scores.

use crate::error::{AccuracyError, Result};
use crate::scores::ScoreSequence;

/// Midpoint between the scores at 1-based ranks `c` and `c + 1`.
pub fn threshold(c: usize, scores: &ScoreSequence) -> Result<f64> {
    if c == 0 {
        return Err(AccuracyError::invalid("c must be positive"));
    }
    match (scores.rank(c), scores.rank(c + 1)) {
        (Some(at_c), Some(next)) => Ok((at_c as f64 + next as f64) / 2.0),
        _ => Err(AccuracyError::invalid(format!(
            "threshold needs at least c+1={} scores, got {}",
            c + 1,
            scores.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_of_ranks() {
        let scores = ScoreSequence::from_counts(vec![10, 8, 6, 4, 2]);
        assert_eq!(threshold(2, &scores).expect("threshold"), 7.0);
        assert_eq!(threshold(1, &scores).expect("threshold"), 9.0);
        assert_eq!(threshold(4, &scores).expect("threshold"), 3.0);
    }

    #[test]
    fn half_integral_midpoint() {
        let scores = ScoreSequence::from_counts(vec![9, 4, 1]);
        assert_eq!(threshold(1, &scores).expect("threshold"), 6.5);
    }

    #[test]
    fn out_of_range_c_is_invalid() {
        let scores = ScoreSequence::from_counts(vec![10, 8, 6]);
        assert!(threshold(0, &scores).is_err());
        assert!(threshold(3, &scores).is_err());
        assert!(threshold(1, &ScoreSequence::from_counts(Vec::new())).is_err());
    }
}
