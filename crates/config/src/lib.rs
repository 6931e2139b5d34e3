//! Configuration management for xamin
//!
//! This crate handles:
//! - Entry settings (sample size, text encoding)
//! - Configuration file loading and saving
//! - XDG directory management
//! - Logging initialization

pub mod config;
pub mod dirs;
pub mod logging;

// Re-export error types from core
pub use xamin_core::{Error, Result};

// Re-export main types
pub use config::{Config, DEFAULT_HINT_SIZE, EntryConfig};
pub use dirs::{config_dir, default_config_file};
