//! System abstraction for filesystem operations
//!
//! This module provides a trait-based abstraction over the whole-file reads
//! and writes entries perform, enabling testing and dry-run saves.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;
use xamin_core::{Error, Result};

/// Abstraction over filesystem operations
///
/// This trait allows us to implement different backends:
/// - `RealSystem`: Actual filesystem operations
/// - `DryRunSystem`: Records writes without executing them
/// - Mock implementations for testing
pub trait System: Send + Sync {
    /// Read a file's contents
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    /// Read at most `max_bytes` from the start of a file
    fn read_prefix(&self, path: &Path, max_bytes: usize) -> Result<Vec<u8>>;

    /// Replace a file's contents
    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Modification time of a path, `None` if it is missing or unsupported
    fn modified(&self, path: &Path) -> Option<SystemTime>;

    /// Whether [`System::write_file`] actually changes the filesystem
    fn persists_writes(&self) -> bool {
        true
    }
}

/// Real filesystem implementation
///
/// This implementation performs actual filesystem operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealSystem;

impl System for RealSystem {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn read_prefix(&self, path: &Path, max_bytes: usize) -> Result<Vec<u8>> {
        let to_error = |e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        };

        let file = fs::File::open(path).map_err(to_error)?;
        let mut buffer = Vec::with_capacity(max_bytes.min(64 * 1024));
        file.take(max_bytes as u64)
            .read_to_end(&mut buffer)
            .map_err(to_error)?;
        Ok(buffer)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| Error::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, content).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn modified(&self, path: &Path) -> Option<SystemTime> {
        fs::metadata(path).and_then(|m| m.modified()).ok()
    }
}

/// Dry-run system that records writes without executing them
///
/// Reads go to the real filesystem so entries load normally; saves only
/// show what would be written.
#[derive(Debug, Default)]
pub struct DryRunSystem {
    operations: Mutex<Vec<Operation>>,
}

/// An operation that was performed or would be performed on the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Read a whole file
    ReadFile { path: PathBuf },
    /// Read a file prefix for sampling
    ReadPrefix { path: PathBuf, max_bytes: usize },
    /// Write a file
    WriteFile { path: PathBuf, size: usize },
}

impl DryRunSystem {
    /// Create a new dry-run system
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the list of operations seen so far
    pub fn operations(&self) -> Vec<Operation> {
        self.operations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of writes that would have been performed
    pub fn write_count(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, Operation::WriteFile { .. }))
            .count()
    }

    /// Record an operation
    fn record(&self, op: Operation) {
        self.operations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(op);
    }
}

impl System for DryRunSystem {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.record(Operation::ReadFile {
            path: path.to_path_buf(),
        });
        RealSystem.read_file(path)
    }

    fn read_prefix(&self, path: &Path, max_bytes: usize) -> Result<Vec<u8>> {
        self.record(Operation::ReadPrefix {
            path: path.to_path_buf(),
            max_bytes,
        });
        RealSystem.read_prefix(path, max_bytes)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        self.record(Operation::WriteFile {
            path: path.to_path_buf(),
            size: content.len(),
        });
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        RealSystem.exists(path)
    }

    fn modified(&self, path: &Path) -> Option<SystemTime> {
        RealSystem.modified(path)
    }

    fn persists_writes(&self) -> bool {
        false
    }
}
