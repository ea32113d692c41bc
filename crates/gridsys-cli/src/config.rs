//! `gridsys.toml` configuration.
//!
//! ```toml
//! [query]
//! key = "gridSystem"
//!
//! [export]
//! tool = "figma"
//! artboard_width = 1280
//!
//! [log]
//! filter = "warn"
//! ```
//!
//! Every field has a default, so an empty file (or no file) is valid.

use std::path::{Path, PathBuf};

use gridsys_core::{DesignTool, VIEWPORT_WIDTH_MAX};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};

/// File picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "gridsys.toml";

/// Query-string parameter holding the snapshot.
pub const DEFAULT_QUERY_KEY: &str = "gridSystem";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridsysConfig {
    pub query: QueryConfig,
    pub export: ExportConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub key: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_QUERY_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub tool: DesignTool,
    pub artboard_width: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            tool: DesignTool::Figma,
            artboard_width: 1280,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl GridsysConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Resolve and validate the configuration.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
    /// the working directory is used if present, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) if !path.exists() => {
                return Err(CliError::MissingPath {
                    path: path.to_path_buf(),
                });
            }
            Some(path) => Self::from_toml_file(path)?,
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if local.is_file() {
                    Self::from_toml_file(&local)?
                } else {
                    Self::default()
                }
            }
        };

        let problems = config.validate();
        if !problems.is_empty() {
            return Err(CliError::Config { problems });
        }
        tracing::debug!(query_key = %config.query.key, tool = %config.export.tool, "config loaded");
        Ok(config)
    }

    /// Validate all parameters. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.query.key.trim().is_empty() {
            errors.push("query.key must not be empty".into());
        }

        if self.export.artboard_width == 0 || self.export.artboard_width > VIEWPORT_WIDTH_MAX {
            errors.push(format!(
                "export.artboard_width must be in [1, {VIEWPORT_WIDTH_MAX}], got {}",
                self.export.artboard_width
            ));
        }

        if let Err(error) = EnvFilter::try_new(&self.log.filter) {
            errors.push(format!("log.filter is not a valid directive: {error}"));
        }

        errors
    }
}
