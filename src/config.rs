//! Configuration handling for the TUI

use crate::state::Schema;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Built-in form layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchemaPreset {
    /// Full form with carpet fiber type and the extended product list
    #[default]
    Standard,
    /// Earlier form without fiber type
    Compact,
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Built-in schema to use
    pub preset: Option<SchemaPreset>,
    /// Complete schema override; takes precedence over `preset`
    pub schema: Option<Schema>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "job-summary", "job-summary-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: TuiConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Schema selected by this configuration, validated
    pub fn resolve_schema(&self) -> Result<Schema> {
        let schema = match (&self.schema, self.preset.unwrap_or_default()) {
            (Some(schema), _) => schema.clone(),
            (None, SchemaPreset::Standard) => Schema::standard(),
            (None, SchemaPreset::Compact) => Schema::compact(),
        };
        schema.validate().context("invalid schema in configuration")?;
        Ok(schema)
    }
}
