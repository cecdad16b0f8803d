//! Configuration for jsonextractor.
//!
//! Settings are read from `~/.config/jsonextractor/config.toml`. Every field
//! has a default, so a partial file (or none at all) is fine.
//!
//! # Example
//!
//! ```
//! use jsonextractor::config::Config;
//!
//! let config: Config = toml::from_str("[json]\nindent_size = 4\n").unwrap();
//! assert_eq!(config.json.indent_size, 4);
//! assert_eq!(config.json.max_depth, 128);
//! assert!(config.json.allow_comments);
//! assert_eq!(config.export.xml_root, "Results");
//! ```
//!
//! There is no query timeout or result cache setting: queries
//! always run to completion and are never cached.

use crate::document::parser::{ParseOptions, DEFAULT_MAX_DEPTH};
use crate::file::loader::{LoadOptions, DEFAULT_MAX_FILE_SIZE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub json: JsonConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter passed to `env_logger` when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// `[json]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonConfig {
    /// Spaces per indentation level for pretty output
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Deepest nesting accepted when parsing
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Largest accepted input in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Skip `//` and `/* */` comments in input
    #[serde(default = "default_true")]
    pub allow_comments: bool,

    /// Accept a comma after the last array element or object member
    #[serde(default = "default_true")]
    pub allow_trailing_commas: bool,
}

/// `[export]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Format used by `export` when none is given: csv, xml or json
    #[serde(default = "default_export_format")]
    pub default_format: String,

    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: String,

    #[serde(default = "default_xml_root")]
    pub xml_root: String,

    #[serde(default = "default_xml_item")]
    pub xml_item: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_indent_size() -> usize {
    2
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_true() -> bool {
    true
}

fn default_export_format() -> String {
    "json".to_string()
}

fn default_csv_delimiter() -> String {
    ",".to_string()
}

fn default_xml_root() -> String {
    "Results".to_string()
}

fn default_xml_item() -> String {
    "Item".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            indent_size: default_indent_size(),
            max_depth: default_max_depth(),
            max_file_size: default_max_file_size(),
            allow_comments: default_true(),
            allow_trailing_commas: default_true(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: default_export_format(),
            csv_delimiter: default_csv_delimiter(),
            xml_root: default_xml_root(),
            xml_item: default_xml_item(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/jsonextractor/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("jsonextractor");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't
    /// be read.
    pub fn load() -> Self {
        let Some(config_path) = Self::config_path() else {
            return Self::default();
        };

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config file {}: {:#}", config_path.display(), e);
                Self::default()
            }
        }
    }

    /// Loads configuration from an explicit file. Unlike [`Config::load`],
    /// a missing or malformed file is an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Input limits derived from the `[json]` section.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            parse: ParseOptions {
                max_depth: self.json.max_depth,
                allow_comments: self.json.allow_comments,
                allow_trailing_commas: self.json.allow_trailing_commas,
            },
            max_file_size: self.json.max_file_size,
        }
    }
}
