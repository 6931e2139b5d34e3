//! Core types and utilities for xamin
//!
//! This is the foundation crate (Layer 0) that all other xamin crates depend on.
//! It provides:
//! - The error taxonomy shared by entries, detection and configuration
//! - Text encodings used for sampling and text decode/encode
//! - Content digests used for change tracking
//!
//! This crate has no dependencies on other xamin crates.

pub mod digest;
pub mod encoding;
pub mod error;

pub use encoding::TextEncoding;
pub use error::{Error, Result};
