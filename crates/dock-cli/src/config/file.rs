use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSamplingConfig {
    pub samples: Option<usize>,
    pub max_trans: Option<f64>,
    pub seed: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileScoringConfig {
    pub contact_cut: Option<f64>,
    pub clash_factor: Option<f64>,
    pub w_contact: Option<f64>,
    pub w_clash: Option<f64>,
    pub soft: Option<f64>,
    pub atom_mode: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub top_n: Option<usize>,
    pub dup_angle: Option<f64>,
    pub dup_trans: Option<f64>,
}

/// Partially specified docking configuration as read from a TOML file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub sampling: Option<FileSamplingConfig>,
    pub scoring: Option<FileScoringConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::file(path, e))?;
        toml::from_str(&content).map_err(|e| CliError::file(path, e))
    }
}
