//! TOML configuration file support.
//!
//! Writer settings can be kept in a config file instead of passed as flags:
//!
//! ```toml
//! # pixi.toml
//! [writer]
//! byte_order = "little"
//! deflate_level = 9
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use pixi::config::WriterConfig;

/// Root configuration structure for pixi.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Writer settings.
    #[serde(default)]
    pub writer: WriterConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
