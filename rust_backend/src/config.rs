//! Pipeline configuration file support.
//!
//! This module reads the derivation settings from a TOML file. Every section
//! is optional and falls back to the defaults used by the web application.

use chrono::format::{Item, StrftimeItems};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static DEFAULT_CONFIG: Lazy<PipelineConfig> = Lazy::new(PipelineConfig::default);

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Derivation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub locations: LocationSettings,
    #[serde(default)]
    pub tabular: TabularSettings,
}

/// Spreadsheet/report export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// chrono strftime pattern for date widget cells
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

/// Location summary settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSettings {
    #[serde(default = "default_admin_levels")]
    pub admin_levels: u8,
}

/// Tabular field detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularSettings {
    #[serde(default = "default_datetime_formats")]
    pub datetime_formats: Vec<String>,
    #[serde(default = "default_skip_empty_cells")]
    pub skip_empty_cells: bool,
}

fn default_date_format() -> String {
    "%d-%m-%Y".to_string()
}

fn default_admin_levels() -> u8 {
    6
}

fn default_datetime_formats() -> Vec<String> {
    [
        "%Y-%m-%d",
        "%d-%m-%Y",
        "%d/%m/%Y",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_skip_empty_cells() -> bool {
    true
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            admin_levels: default_admin_levels(),
        }
    }
}

impl Default for TabularSettings {
    fn default() -> Self {
        Self {
            datetime_formats: default_datetime_formats(),
            skip_empty_cells: default_skip_empty_cells(),
        }
    }
}

impl PipelineConfig {
    /// Shared default configuration.
    pub fn default_ref() -> &'static PipelineConfig {
        &DEFAULT_CONFIG
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(PipelineConfig)` if the file was read, parsed and validated
    /// * `Err(ConfigError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded widget pipeline config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `widgets.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// Falls back to the defaults when no file exists; a file that exists but
    /// fails to parse is still an error.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("widgets.toml"),
            PathBuf::from("rust_backend/widgets.toml"),
            PathBuf::from("../widgets.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        log::debug!("No widgets.toml found, using default pipeline config");
        Ok(Self::default())
    }

    /// Check settings that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_strftime(&self.export.date_format) {
            return Err(ConfigError::Invalid(format!(
                "export.date_format '{}' is not a valid strftime pattern",
                self.export.date_format
            )));
        }
        if self.locations.admin_levels == 0 {
            return Err(ConfigError::Invalid(
                "locations.admin_levels must be at least 1".to_string(),
            ));
        }
        if self.tabular.datetime_formats.is_empty() {
            return Err(ConfigError::Invalid(
                "tabular.datetime_formats must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .tabular
            .datetime_formats
            .iter()
            .find(|f| !is_valid_strftime(f))
        {
            return Err(ConfigError::Invalid(format!(
                "tabular.datetime_formats entry '{}' is not a valid strftime pattern",
                bad
            )));
        }
        Ok(())
    }
}

fn is_valid_strftime(pattern: &str) -> bool {
    !pattern.is_empty() && StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}
