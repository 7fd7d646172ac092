//! CLI configuration

use std::path::PathBuf;

use anyhow::Context;
use docpath_core::limits::{validate_batch_size, DEFAULT_BATCH_SIZE};
use docpath_core::TraversalPaths;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "DOCPATH_CONFIG";

/// Get the config file path
pub fn config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docpath")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Traversal paths used when `--paths` is not given
    pub default_paths: TraversalPaths,
    /// Batch size used when `--size` is not given
    pub batch_size: usize,
    /// Output format: table or json
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_paths: TraversalPaths::root(),
            batch_size: DEFAULT_BATCH_SIZE,
            format: "table".to_string(),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when missing or invalid
    pub fn load() -> Self {
        let path = config_file_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Ignoring invalid config at {}: {:#}", path.display(), e);
                }
                Self::default()
            }
        }
    }

    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["default_paths", "batch_size", "format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_paths" => Some(self.default_paths.to_string()),
            "batch_size" => Some(self.batch_size.to_string()),
            "format" => Some(self.format.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "default_paths" => self.default_paths = value.parse()?,
            "batch_size" => {
                let size: i64 = value
                    .parse()
                    .with_context(|| format!("`{}` is not an integer", value))?;
                self.batch_size = validate_batch_size(size)?;
            }
            "format" => {
                let format = OutputFormat::parse(value)
                    .with_context(|| format!("unknown format `{}`", value))?;
                self.format = format.as_str().to_string();
            }
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::parse(&self.format).unwrap_or(OutputFormat::Table)
    }
}
