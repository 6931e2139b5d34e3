//! Content sampling
//!
//! A sample (or hint) is the first few bytes of a file, decoded as text when
//! the configured encoding allows. Type detection classifies files from the
//! sample alone, without reading them whole.

use crate::system::{RealSystem, System};
use std::path::Path;
use xamin_config::EntryConfig;

/// A bounded prefix of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sample {
    /// The prefix decodes as text in the configured encoding
    Text(String),
    /// The prefix is not decodable text
    Binary(Vec<u8>),
}

impl Sample {
    /// Classify raw prefix bytes using the configured encoding
    pub fn from_bytes(bytes: Vec<u8>, config: &EntryConfig) -> Self {
        match config.text_encoding.decode_sample(&bytes) {
            Some(text) => Sample::Text(text),
            None => Sample::Binary(bytes),
        }
    }

    /// The decoded text, if this is a text sample
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Sample::Text(text) => Some(text),
            Sample::Binary(_) => None,
        }
    }

    /// Whether the sample decoded as text
    pub fn is_text(&self) -> bool {
        matches!(self, Sample::Text(_))
    }
}

/// Sample the start of `path` from the real filesystem
///
/// Returns `None` when the path is missing or unreadable; that is an
/// expected outcome meaning "undecidable", not an error.
pub fn sample(path: &Path, config: &EntryConfig) -> Option<Sample> {
    sample_with(&RealSystem, path, config)
}

/// Sample the start of `path` through the given system
pub fn sample_with(system: &dyn System, path: &Path, config: &EntryConfig) -> Option<Sample> {
    match system.read_prefix(path, config.hint_size) {
        Ok(bytes) => Some(Sample::from_bytes(bytes, config)),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Sample unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use xamin_core::TextEncoding;

    #[test]
    fn test_text_file_samples_as_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "This is my\ntest text file.").unwrap();

        let sample = sample(&path, &EntryConfig::default()).unwrap();
        assert_eq!(sample.as_text(), Some("This is my\ntest text file."));
    }

    #[test]
    fn test_binary_file_samples_as_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob.bin");
        let bytes = vec![0x00, 0xff, 0xfe, 0x80, 0x12];
        fs::write(&path, &bytes).unwrap();

        let sample = sample(&path, &EntryConfig::default()).unwrap();
        assert_eq!(sample, Sample::Binary(bytes));
        assert!(!sample.is_text());
    }

    #[test]
    fn test_sample_respects_hint_size() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("long.txt");
        fs::write(&path, "a".repeat(5000)).unwrap();

        let config = EntryConfig {
            hint_size: 16,
            ..EntryConfig::default()
        };
        let sample = sample(&path, &config).unwrap();
        assert_eq!(sample.as_text().unwrap().len(), 16);
    }

    #[test]
    fn test_multibyte_char_at_boundary_is_still_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("accents.txt");
        // 3 ASCII bytes then a 2-byte character straddling the 4-byte boundary
        fs::write(&path, "abcé and more").unwrap();

        let config = EntryConfig {
            hint_size: 4,
            ..EntryConfig::default()
        };
        let sample = sample(&path, &config).unwrap();
        assert_eq!(sample.as_text(), Some("abc"));
    }

    #[test]
    fn test_latin1_decodes_everything() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob.bin");
        fs::write(&path, [0xff, 0xfe]).unwrap();

        let config = EntryConfig {
            text_encoding: TextEncoding::Latin1,
            ..EntryConfig::default()
        };
        assert!(sample(&path, &config).unwrap().is_text());
    }

    #[test]
    fn test_missing_path_is_unavailable() {
        let temp = TempDir::new().unwrap();
        assert!(sample(&temp.path().join("missing"), &EntryConfig::default()).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_is_unavailable() {
        let temp = TempDir::new().unwrap();
        assert!(sample(temp.path(), &EntryConfig::default()).is_none());
    }
}
