//! Accuracy accounting for differentially private top-c selection.
//!
//! For every relaxation of the selection threshold this crate pairs the
//! empirical selection error rate on a dataset with a theoretical bound on
//! the mechanism's failure probability, and reduces the resulting curve to a
//! CDF and a discrete PDF.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
pub mod cdf;
pub mod oracle;
pub mod pdf;
pub mod sampler;

pub use analysis::{SerAnalysis, SerDistribution};
pub use cdf::{build_cdf, relaxation_count, sample_relaxations, Cdf, SamplingMode};
pub use oracle::{FailureProbabilityOracle, LaplaceTailBound};
pub use pdf::{derive_pdf, Pdf};
pub use sampler::{selection_error_rate, ErrorPoint, ErrorRateSampler};

/// Common imports for accuracy accounting.
pub mod prelude {
    pub use crate::{
        build_cdf, derive_pdf, relaxation_count, sample_relaxations, selection_error_rate, Cdf,
        ErrorPoint, ErrorRateSampler, FailureProbabilityOracle, LaplaceTailBound, Pdf,
        SamplingMode, SerAnalysis, SerDistribution,
    };
}
