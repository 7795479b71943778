//! Command-line arguments for the `topc-accuracy` binary.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::config::{DatasetSource, RunConfig, DEFAULT_ZIPF_EXPONENT};

/// How the distribution is written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table with text bars
    #[default]
    Text,
    /// SVG bar chart
    Svg,
}

/// Accuracy distribution of differentially private top-c selection
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "topc-accuracy")]
#[command(version)]
#[command(
    about = "Plot the selection error rate distribution guaranteed by a noisy top-c selection"
)]
pub struct Cli {
    /// Dataset file of whitespace or line separated integer counts
    pub dataset: Option<PathBuf>,

    /// TOML configuration file; flags take precedence over its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Generate a synthetic Zipf dataset with this many items
    #[arg(long, conflicts_with = "dataset")]
    pub synthetic: Option<usize>,

    /// Seed for the synthetic dataset
    #[arg(long, requires = "synthetic")]
    pub seed: Option<u64>,

    /// Dataset name shown in the title
    #[arg(long)]
    pub name: Option<String>,

    /// Total privacy budget
    #[arg(short, long)]
    pub epsilon: Option<f64>,

    /// Number of items to select
    #[arg(short, long)]
    pub c: Option<usize>,

    /// Query sensitivity
    #[arg(long)]
    pub sensitivity: Option<f64>,

    /// Treat queries as non-monotonic
    #[arg(long)]
    pub non_monotonic: bool,

    /// Stride between sampled relaxations
    #[arg(long)]
    pub step: Option<usize>,

    /// Sample relaxations in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve defaults, then the config file, then flags.
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut config = RunConfig::default();
        if let Some(path) = &self.config {
            config.apply_file(path)?;
        }
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut RunConfig) {
        if let Some(path) = &self.dataset {
            config.source = Some(DatasetSource::File(path.clone()));
        }
        if let Some(items) = self.synthetic {
            let (exponent, file_seed) = match &config.source {
                Some(DatasetSource::Synthetic { exponent, seed, .. }) => (*exponent, *seed),
                _ => (DEFAULT_ZIPF_EXPONENT, 0),
            };
            config.source = Some(DatasetSource::Synthetic {
                items,
                exponent,
                seed: self.seed.unwrap_or(file_seed),
            });
        }
        if let Some(name) = &self.name {
            config.dataset_name = Some(name.clone());
        }
        if let Some(v) = self.epsilon {
            config.epsilon = v;
        }
        if let Some(v) = self.c {
            config.c = v;
        }
        if let Some(v) = self.sensitivity {
            config.sensitivity = v;
        }
        if self.non_monotonic {
            config.monotonic = false;
        }
        if let Some(v) = self.step {
            config.step = v;
        }
        if self.parallel {
            config.parallel = true;
        }
    }
}
