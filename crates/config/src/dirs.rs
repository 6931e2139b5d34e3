//! XDG directory utilities
//!
//! This module provides XDG-compliant directory paths for xamin using the
//! `xdg` crate. `XDG_CONFIG_HOME` defaults to ~/.config.

use std::path::PathBuf;
use xdg::BaseDirectories;

/// Get the xamin config directory
///
/// Returns `$XDG_CONFIG_HOME/xamin` or `~/.config/xamin`
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    BaseDirectories::with_prefix("xamin").get_config_home()
}

/// Get the default config file path
///
/// Returns `$XDG_CONFIG_HOME/xamin/config.toml` or `~/.config/xamin/config.toml`
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_config_file_is_inside_config_dir() {
        if let (Some(dir), Some(file)) = (config_dir(), default_config_file()) {
            assert!(file.starts_with(&dir));
            assert_eq!(file.file_name().unwrap(), "config.toml");
            assert!(
                dir.to_string_lossy().contains("xamin"),
                "config_dir path should contain 'xamin': {dir:?}"
            );
        }
    }
}
