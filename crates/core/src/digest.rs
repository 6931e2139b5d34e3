//! Content digests using SHA-256
//!
//! Digests are lowercase hex strings. The empty string is reserved as the
//! "no content yet" sentinel and is never produced for real content.

use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Sentinel digest for entries whose content has not been loaded
pub const NO_CONTENT: &str = "";

/// Hex SHA-256 of raw bytes
///
/// # Examples
///
/// ```
/// use xamin_core::digest::digest_bytes;
///
/// let hash = digest_bytes(b"");
/// assert_eq!(
///     hash,
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[must_use]
pub fn digest_bytes(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Hex SHA-256 of text in the given encoding
///
/// Text that cannot be represented in `encoding` is hashed as UTF-8, so the
/// digest is always defined; the failure surfaces later on save.
#[must_use]
pub fn digest_text(content: &str, encoding: TextEncoding) -> String {
    match encoding.encode(content) {
        Ok(bytes) => digest_bytes(&bytes),
        Err(_) => digest_bytes(content.as_bytes()),
    }
}

/// Hex SHA-256 of the canonical (compact JSON) serialization of a value
pub fn digest_serialized<T: Serialize + ?Sized>(content: &T) -> Result<String> {
    let canonical = serde_json::to_vec(content).map_err(|e| Error::Encode {
        message: format!("Failed to serialize content for hashing: {e}"),
    })?;
    Ok(digest_bytes(&canonical))
}
