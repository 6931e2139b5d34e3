//! Common utilities and types shared across CLI commands

use crate::error::{CommandError, Result};
use std::path::Path;
use std::sync::Arc;
use xamin_config::{Config, EntryConfig};
use xamin_engine::AnyEntry;

/// Runtime context for CLI commands
///
/// Consolidates the state shared by every command. The config is shared via
/// `Arc` so contexts are cheap to clone.
///
/// # Examples
///
/// ```
/// use xamin::common::RuntimeContext;
/// use xamin_config::Config;
///
/// let context = RuntimeContext::new(Config::default());
/// assert_eq!(context.entry_config().hint_size, 2048);
/// ```
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    /// Shared configuration
    pub config: Arc<Config>,
}

impl RuntimeContext {
    /// Create a new runtime context
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Settings applied to every entry
    pub fn entry_config(&self) -> EntryConfig {
        self.config.entry
    }

    /// Detect the type of `path` and open it as an entry
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` for a missing path and `Undetectable` when no
    /// variant matches.
    pub fn open_entry(&self, path: &Path) -> Result<AnyEntry> {
        if !path.exists() {
            return Err(CommandError::FileNotFound(path.to_path_buf()));
        }
        AnyEntry::open(path, self.entry_config())?
            .ok_or_else(|| CommandError::Undetectable(path.to_path_buf()))
    }
}
