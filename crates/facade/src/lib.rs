//! Facade crate re-exporting the top-c selection accuracy APIs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod render;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use topc_privacy_accounting as accounting;
pub use topc_privacy_core as core;

pub use topc_privacy_accounting::{
    build_cdf, derive_pdf, relaxation_count, sample_relaxations, selection_error_rate, Cdf,
    ErrorPoint, ErrorRateSampler, FailureProbabilityOracle, LaplaceTailBound, Pdf, SamplingMode,
    SerAnalysis, SerDistribution,
};
pub use cli::{Cli, OutputFormat};
pub use config::{DatasetSource, RunConfig};
pub use topc_privacy_core::{
    monotonicity_factor, split_budget, synthetic_zipf_counts, threshold, AccuracyError,
    BudgetSplit, Result, ScoreSequence, SelectionConfig,
};
pub use render::{render_distribution, render_svg, title};

/// Convenience prelude covering the whole pipeline.
pub mod prelude {
    pub use crate::config::{DatasetSource, RunConfig};
    pub use crate::render::{render_distribution, render_svg};
    pub use topc_privacy_accounting::prelude::*;
    pub use topc_privacy_core::prelude::*;
}
