//! Base error types for xamin
//!
//! Every failure an entry, the type detector or the configuration layer can
//! report lives here, so collaborators only have to match on one enum.

use std::path::PathBuf;
use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// Save attempted on an entry that is not bound to any path
    #[error("Entry has no destination path to save to")]
    MissingDestination,

    /// Save attempted on a stale entry without overwrite intent
    #[error(
        "{} was modified on disk since it was last loaded or saved; \
         reload it or save with overwrite",
        path.display()
    )]
    ExternalChangeConflict { path: PathBuf },

    /// Content of the wrong representation given to a variant
    #[error("Type mismatch: expected {expected} content, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Error reading a file
    #[error("Failed to read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a file
    #[error("Failed to write file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File bytes could not be decoded into the variant's representation
    #[error("Failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// Content could not be encoded for writing
    #[error("Failed to encode content: {message}")]
    Encode { message: String },

    /// Detected variant has no entry implementation
    #[error("No entry implementation for variant '{name}'")]
    UnknownVariant { name: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error is an I/O failure during load or save
    ///
    /// These are propagated rather than absorbed, unlike sampling failures
    /// which degrade to "no match".
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Error::FileRead { .. } | Error::FileWrite { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_failure_classification() {
        let read = Error::FileRead {
            path: PathBuf::from("a.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(read.is_io_failure());
        assert!(!Error::MissingDestination.is_io_failure());
        assert!(
            !Error::ExternalChangeConflict {
                path: PathBuf::from("a.txt")
            }
            .is_io_failure()
        );
    }

    #[test]
    fn test_conflict_message_names_path() {
        let err = Error::ExternalChangeConflict {
            path: PathBuf::from("/tmp/notes.txt"),
        };
        assert!(err.to_string().contains("/tmp/notes.txt"));
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = Error::TypeMismatch {
            expected: "text",
            found: "bytes",
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch: expected text content, got bytes"
        );
    }
}
