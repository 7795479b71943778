//! Core building blocks for differentially private top-c selection.
//!
//! This crate holds the inputs every accuracy computation shares: the
//! descending score sequence, the selection parameters, the privacy budget
//! split and the selection threshold.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod budget;
pub mod error;
pub mod scores;
pub mod selection;
pub mod threshold;

pub use budget::{split_budget, BudgetSplit};
pub use error::{AccuracyError, Result};
pub use scores::{synthetic_zipf_counts, ScoreSequence};
pub use selection::{monotonicity_factor, SelectionConfig};
pub use threshold::threshold;

/// Common imports for downstream users.
pub mod prelude {
    pub use crate::{
        monotonicity_factor, split_budget, synthetic_zipf_counts, threshold, AccuracyError,
        BudgetSplit, Result, ScoreSequence, SelectionConfig,
    };
}
