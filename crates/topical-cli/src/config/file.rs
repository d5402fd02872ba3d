use crate::error::{CliError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use topical::engine::sampler::FeatureDistribution;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileRunConfig {
    pub pool_size: Option<usize>,
    pub seed: Option<u64>,
    pub top_n: Option<usize>,
    pub policy: Option<String>,
}

/// Constraint bounds. With `enabled = false` only explicitly given bounds apply.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConstraintsConfig {
    pub enabled: Option<bool>,
    pub max_irritation: Option<f64>,
    pub min_stability: Option<f64>,
    pub max_fail_prob: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileReportConfig {
    pub top_k: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileEvidenceConfig {
    pub top_n: Option<usize>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum FileDistribution {
    Uniform { low: f64, high: f64 },
    LogNormal { mu: f64, sigma: f64 },
}

impl From<FileDistribution> for FeatureDistribution {
    fn from(d: FileDistribution) -> Self {
        match d {
            FileDistribution::Uniform { low, high } => FeatureDistribution::Uniform { low, high },
            FileDistribution::LogNormal { mu, sigma } => {
                FeatureDistribution::LogNormal { mu, sigma }
            }
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    /// Surrogate model coefficient file. Relative paths are resolved against the
    /// directory of the configuration file.
    pub models: Option<PathBuf>,
    pub run: Option<FileRunConfig>,
    pub constraints: Option<FileConstraintsConfig>,
    pub report: Option<FileReportConfig>,
    pub evidence: Option<FileEvidenceConfig>,
    /// Per-feature distribution overrides, keyed by feature name.
    pub sampling: Option<BTreeMap<String, FileDistribution>>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if let Some(models) = config.models.take() {
            let resolved = match path.parent() {
                Some(dir) if models.is_relative() => dir.join(models),
                _ => models,
            };
            config.models = Some(resolved);
        }
        Ok(config)
    }
}
