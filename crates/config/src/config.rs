//! Configuration management
//!
//! This module handles loading and saving xamin configuration.
//!
//! ```toml
//! [entry]
//! hintSize = 4096
//! textEncoding = "latin-1"
//! ```

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use xamin_core::{Error, TextEncoding};

/// Default number of bytes read from the start of a file for type detection
pub const DEFAULT_HINT_SIZE: usize = 2048;

/// Settings that change how entries sample, decode and encode files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Size (in bytes) of the hint to read from the file
    #[serde(default = "default_hint_size", rename = "hintSize")]
    pub hint_size: usize,

    /// Default text file encoding
    #[serde(default, rename = "textEncoding")]
    pub text_encoding: TextEncoding,
}

fn default_hint_size() -> usize {
    DEFAULT_HINT_SIZE
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            hint_size: default_hint_size(),
            text_encoding: TextEncoding::default(),
        }
    }
}

impl EntryConfig {
    /// Check that the settings are usable
    ///
    /// # Errors
    ///
    /// Returns error if the hint size is zero
    pub fn validate(&self) -> Result<()> {
        if self.hint_size == 0 {
            return Err(Error::Config("hintSize must be greater than 0".to_string()));
        }
        Ok(())
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Entry settings
    #[serde(default)]
    pub entry: EntryConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, TOML parsing fails or the
    /// settings are invalid
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(message) => Error::Config(format!(
                "Invalid config file {}: {message}",
                path.as_ref().display()
            )),
            other => other,
        })?;

        tracing::debug!(path = %path.as_ref().display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from TOML string
    ///
    /// # Errors
    ///
    /// Returns error if TOML parsing fails or the settings are invalid
    pub fn from_toml_str(toml_content: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_content)
            .map_err(|e| Error::Config(format!("Failed to parse config TOML: {e}")))?;
        config.entry.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit path or the default location
    ///
    /// An explicit path must exist. Without one, the default config file is
    /// used when present and built-in defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the chosen file cannot be read or parsed
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match crate::dirs::default_config_file() {
            Some(default_path) if default_path.is_file() => Self::load(default_path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!(
                    "Failed to create config directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        fs::write(path.as_ref(), content).map_err(|e| {
            Error::Config(format!(
                "Failed to write config file {}: {e}",
                path.as_ref().display()
            ))
        })?;

        Ok(())
    }
}
