//! Error types for CLI commands
//!
//! This module defines structured error types using thiserror, so commands
//! report what went wrong without stringly typed errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// No variant matched the file
    #[error("Cannot determine the type of {}", .0.display())]
    Undetectable(PathBuf),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Entry operation error
    #[error(transparent)]
    Entry(#[from] xamin_core::Error),

    /// Output serialization error
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::io;

    #[test]
    fn test_undetectable_error() {
        let error = CommandError::Undetectable(PathBuf::from("/tmp/mystery"));
        let error_msg = error.to_string();
        assert!(error_msg.contains("/tmp/mystery"));
        assert!(error_msg.contains("Cannot determine the type"));
    }

    #[test]
    fn test_entry_error_is_transparent() {
        let error: CommandError = xamin_core::Error::ExternalChangeConflict {
            path: PathBuf::from("data.csv"),
        }
        .into();
        assert_eq!(
            error.to_string(),
            xamin_core::Error::ExternalChangeConflict {
                path: PathBuf::from("data.csv")
            }
            .to_string()
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let error: CommandError = io::Error::other("disk on fire").into();
        assert!(matches!(error, CommandError::IoError(_)));
    }
}
