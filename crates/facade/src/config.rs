//! Run configuration: defaults, TOML file and command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use topc_privacy_accounting::{SamplingMode, SerAnalysis};
use topc_privacy_core::{synthetic_zipf_counts, ScoreSequence, SelectionConfig};
use tracing::{debug, info};

/// Where the score sequence comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum DatasetSource {
    /// Flat file of integer counts.
    File(PathBuf),
    /// Zipf-distributed synthetic counts.
    Synthetic {
        /// Number of items.
        items: usize,
        /// Zipf exponent.
        exponent: f64,
        /// RNG seed.
        seed: u64,
    },
}

/// Fully resolved settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Dataset to analyse.
    pub source: Option<DatasetSource>,
    /// Display name of the dataset.
    pub dataset_name: Option<String>,
    /// Total privacy budget.
    pub epsilon: f64,
    /// Number of selected items.
    pub c: usize,
    /// Query sensitivity.
    pub sensitivity: f64,
    /// Whether queries are monotonic.
    pub monotonic: bool,
    /// Relaxation stride.
    pub step: usize,
    /// Sample relaxations on the rayon pool.
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        let selection = SelectionConfig::default();
        let analysis = SerAnalysis::default();
        Self {
            source: None,
            dataset_name: None,
            epsilon: analysis.epsilon,
            c: selection.c,
            sensitivity: selection.sensitivity,
            monotonic: selection.monotonic,
            step: analysis.step,
            parallel: false,
        }
    }
}

pub(crate) const DEFAULT_ZIPF_EXPONENT: f64 = 1.1;
const SYNTHETIC_SCALE: u64 = 100_000;

impl RunConfig {
    /// Parse a TOML document on top of the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config = Self::default();
        config.apply_toml_str(text, None)?;
        Ok(config)
    }

    /// Read a TOML file on top of the current values.
    ///
    /// Relative dataset paths are resolved against the file's directory.
    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading config file {}", path.display()))?;
        self.apply_toml_str(&raw, path.parent())
            .with_context(|| format!("failed parsing TOML config {}", path.display()))?;
        debug!(path = %path.display(), "applied config file");
        Ok(())
    }

    fn apply_toml_str(&mut self, text: &str, base_dir: Option<&Path>) -> Result<()> {
        let file_cfg: FileConfig = toml::from_str(text)?;
        self.apply_file_dataset(file_cfg.dataset, base_dir)?;
        self.apply_file_analysis(file_cfg.analysis);
        Ok(())
    }

    fn apply_file_dataset(
        &mut self,
        dataset: Option<FileDatasetConfig>,
        base_dir: Option<&Path>,
    ) -> Result<()> {
        let Some(dataset) = dataset else {
            return Ok(());
        };

        if dataset.path.is_some() && dataset.synthetic_items.is_some() {
            bail!("dataset.path and dataset.synthetic_items are mutually exclusive");
        }
        if let Some(path) = dataset.path {
            let path = match base_dir {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path,
            };
            self.source = Some(DatasetSource::File(path));
        }
        if let Some(items) = dataset.synthetic_items {
            self.source = Some(DatasetSource::Synthetic {
                items,
                exponent: dataset.zipf_exponent.unwrap_or(DEFAULT_ZIPF_EXPONENT),
                seed: dataset.seed.unwrap_or_default(),
            });
        }
        if let Some(name) = dataset.name.filter(|s| !s.trim().is_empty()) {
            self.dataset_name = Some(name);
        }
        Ok(())
    }

    fn apply_file_analysis(&mut self, analysis: Option<FileAnalysisConfig>) {
        let Some(analysis) = analysis else {
            return;
        };

        if let Some(v) = analysis.epsilon {
            self.epsilon = v;
        }
        if let Some(v) = analysis.c {
            self.c = v;
        }
        if let Some(v) = analysis.sensitivity {
            self.sensitivity = v;
        }
        if let Some(v) = analysis.monotonic {
            self.monotonic = v;
        }
        if let Some(v) = analysis.step {
            self.step = v;
        }
        if let Some(v) = analysis.parallel {
            self.parallel = v;
        }
    }

    /// Analysis parameters for this run.
    pub fn analysis(&self) -> SerAnalysis {
        let selection = SelectionConfig::new(self.c)
            .with_sensitivity(self.sensitivity)
            .with_monotonic(self.monotonic);
        let mode = if self.parallel {
            SamplingMode::Parallel
        } else {
            SamplingMode::Sequential
        };
        SerAnalysis::new(self.epsilon, selection)
            .with_step(self.step)
            .with_mode(mode)
    }

    /// Name shown in the rendered title.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.dataset_name {
            return name.clone();
        }
        match &self.source {
            Some(DatasetSource::File(path)) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Some(DatasetSource::Synthetic { exponent, .. }) => format!("Zipf(s = {exponent})"),
            None => "unnamed dataset".to_string(),
        }
    }

    /// Load or generate the score sequence.
    pub fn load_scores(&self) -> Result<ScoreSequence> {
        match &self.source {
            Some(DatasetSource::File(path)) => ScoreSequence::load(path)
                .with_context(|| format!("failed loading dataset {}", path.display())),
            Some(DatasetSource::Synthetic {
                items,
                exponent,
                seed,
            }) => {
                let mut rng = StdRng::seed_from_u64(*seed);
                let counts = synthetic_zipf_counts(&mut rng, *items, *exponent, SYNTHETIC_SCALE)?;
                info!(items, exponent, seed, "generated synthetic zipf dataset");
                Ok(ScoreSequence::from_counts(counts))
            }
            None => bail!("no dataset configured; pass a dataset path or --synthetic"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    dataset: Option<FileDatasetConfig>,
    #[serde(default)]
    analysis: Option<FileAnalysisConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileDatasetConfig {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    synthetic_items: Option<usize>,
    #[serde(default)]
    zipf_exponent: Option<f64>,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileAnalysisConfig {
    #[serde(default)]
    epsilon: Option<f64>,
    #[serde(default)]
    c: Option<usize>,
    #[serde(default)]
    sensitivity: Option<f64>,
    #[serde(default)]
    monotonic: Option<bool>,
    #[serde(default)]
    step: Option<usize>,
    #[serde(default)]
    parallel: Option<bool>,
}
