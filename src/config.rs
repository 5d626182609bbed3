//! Site configuration module.
//!
//! Handles loading and validating the site config file (`site.toml` by
//! default). Most keys belong to the page renderer and are kept verbatim as
//! a TOML table; only `[processing]` is interpreted here.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional
//!
//! title = "Gallery"                 # Page title and heading
//! description = "Photos from *2024*" # Markdown, shown under the heading
//! author = "Jane Doe"               # Footer credit
//! static_dir = "static"             # Copied into the destination as-is
//!
//! [processing]
//! max_processes = 4                 # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Missing File
//!
//! The default path is optional: when it does not exist the stock defaults
//! are used. A path passed explicitly with `--config` must exist.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "site.toml";

/// Keys the renderer reads. Each must be a string when present.
const STRING_KEYS: [&str; 4] = ["title", "description", "author", "static_dir"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
    /// Every top-level key as written, `[processing]` included.
    pub values: toml::Table,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Raw value of a top-level key.
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.values.get(key)
    }

    /// String value of a top-level key; `None` if absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(toml::Value::as_str)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        for key in STRING_KEYS {
            if let Some(value) = self.get(key).filter(|v| !v.is_str()) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a string, found {}",
                    value.type_str()
                )));
            }
        }
        Ok(())
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Parse and validate config file content.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let values: toml::Table = toml::from_str(content)?;
    let processing = match values.get("processing") {
        Some(section) => section.clone().try_into()?,
        None => ProcessingConfig::default(),
    };
    let config = SiteConfig { values, processing };
    config.validate()?;
    Ok(config)
}

/// Load the site config.
///
/// `explicit` marks a path the user asked for: if it is missing that is an
/// error, whereas a missing default file yields [`SiteConfig::default`].
pub fn load_config(path: &Path, explicit: bool) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return if explicit {
            Err(ConfigError::NotFound(path.to_path_buf()))
        } else {
            Ok(SiteConfig::default())
        };
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# phogg site configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Keys other than the ones below are kept and ignored.

# Page title, also used as the main heading.
title = "Gallery"

# Short introduction shown under the heading. Markdown is supported.
# description = "Photographs from the *north coast*, summer 2024."

# Credit line in the page footer.
# author = "Jane Doe"

# Directory whose contents are copied verbatim into the destination
# (favicons, fonts, extra stylesheets). Relative to the working directory.
# static_dir = "static"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum number of photos processed in parallel.
# Omit to use all CPU cores. Values above the core count are clamped down.
# max_processes = 4
"##
}
