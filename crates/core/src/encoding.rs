//! Text encodings
//!
//! The configured encoding is used both when sampling a file to decide
//! whether it is text and when text variants decode and encode content.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported text encoding
///
/// Parsed from and serialized to its label (`utf-8`, `ascii`, `latin-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TextEncoding {
    /// UTF-8
    #[default]
    Utf8,
    /// 7-bit US-ASCII
    Ascii,
    /// ISO-8859-1, every byte maps to the code point of the same value
    Latin1,
}

impl TextEncoding {
    /// Canonical label for this encoding
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin-1",
        }
    }

    /// Strictly decode a complete byte buffer
    ///
    /// The error carries no path; callers attach it through [`Error::Decode`].
    pub fn decode(self, bytes: &[u8]) -> std::result::Result<String, String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string()),
            Self::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
                Some(pos) => Err(format!(
                    "byte 0x{:02x} at offset {pos} is not ASCII",
                    bytes[pos]
                )),
            },
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Decode a file prefix, returning `None` if it is not text
    ///
    /// A multi-byte UTF-8 sequence cut off at the very end of the prefix is
    /// not treated as a decode failure, since the sample boundary is arbitrary.
    pub fn decode_sample(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => match std::str::from_utf8(bytes) {
                Ok(text) => Some(text.to_string()),
                Err(e) if e.error_len().is_none() => {
                    // Incomplete trailing sequence; the prefix before it is valid
                    let valid = &bytes[..e.valid_up_to()];
                    std::str::from_utf8(valid).ok().map(str::to_string)
                }
                Err(_) => None,
            },
            Self::Ascii | Self::Latin1 => self.decode(bytes).ok(),
        }
    }

    /// Encode text for writing
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Ascii => text
                .chars()
                .map(|c| {
                    if c.is_ascii() {
                        Ok(c as u8)
                    } else {
                        Err(unrepresentable(c, self))
                    }
                })
                .collect(),
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).map_err(|_| unrepresentable(c, self)))
                .collect(),
        }
    }
}

fn unrepresentable(c: char, encoding: TextEncoding) -> Error {
    Error::Encode {
        message: format!("character {c:?} cannot be represented in {encoding}"),
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Self::Latin1),
            other => Err(Error::Config(format!("Unsupported text encoding '{other}'"))),
        }
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TextEncoding> for String {
    fn from(value: TextEncoding) -> Self {
        value.label().to_string()
    }
}
