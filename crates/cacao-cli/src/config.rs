//! Pipeline configuration loading.
//!
//! Configuration is a JSON document matching [`PipelineConfig`]; every field
//! is optional and falls back to its default. Command-line overrides are
//! applied on top and the result is validated before use.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cacao_model::{CastMode, PipelineConfig};
use tracing::debug;

/// Values given on the command line that replace configured ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub mode_threshold: Option<f64>,
    pub drop_threshold: Option<f64>,
    pub cast_mode: Option<CastMode>,
    /// Appended to the configured normalization columns.
    pub normalize_columns: Vec<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(value) = self.mode_threshold {
            config.imputation.mode_threshold = value;
        }
        if let Some(value) = self.drop_threshold {
            config.imputation.drop_threshold = value;
        }
        if let Some(mode) = self.cast_mode {
            config.casts.mode = mode;
        }
        for column in &self.normalize_columns {
            if !config.normalize_columns.contains(column) {
                config.normalize_columns.push(column.clone());
            }
        }
    }
}

/// Reads a configuration file; defaults when `path` is `None`.
pub fn read_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: PipelineConfig = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;
    debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Reads, overrides and validates the pipeline configuration.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<PipelineConfig> {
    let mut config = read_config(path)?;
    overrides.apply(&mut config);
    config.validate().context("invalid pipeline configuration")?;
    Ok(config)
}
