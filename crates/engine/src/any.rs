//! Entries of a type only known at runtime
//!
//! [`AnyEntry`] wraps the built-in entry variants so callers can open a path
//! without knowing its type up front. Content crosses the boundary as
//! [`Content`]; handing in the wrong representation is a
//! [`Error::TypeMismatch`].

use crate::detect::guess_type;
use crate::entry::{BinaryEntry, Entry, EntryState, TabularEntry, TextEntry};
use crate::registry::VariantDescriptor;
use crate::variant::{BinaryVariant, Rows, Shape, TabularVariant, TextVariant, Variant};
use std::path::{Path, PathBuf};
use xamin_config::EntryConfig;
use xamin_core::{Error, Result};

/// Content of any built-in variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Decoded text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Delimited rows
    Rows(Rows),
}

impl Content {
    /// Name of the representation
    pub fn kind(&self) -> &'static str {
        match self {
            Content::Text(_) => TextVariant::CONTENT_KIND,
            Content::Bytes(_) => BinaryVariant::CONTENT_KIND,
            Content::Rows(_) => TabularVariant::CONTENT_KIND,
        }
    }
}

/// An entry of one of the built-in variants
#[derive(Debug)]
pub enum AnyEntry {
    /// Plain text
    Text(TextEntry),
    /// Raw bytes
    Binary(BinaryEntry),
    /// Delimited text
    Tabular(TabularEntry),
}

/// Run the same expression against whichever entry is wrapped
macro_rules! dispatch {
    ($self:expr, $entry:ident => $body:expr) => {
        match $self {
            AnyEntry::Text($entry) => $body,
            AnyEntry::Binary($entry) => $body,
            AnyEntry::Tabular($entry) => $body,
        }
    };
}

impl AnyEntry {
    /// Detect the type of `path` and open a matching entry
    ///
    /// Returns `Ok(None)` when the file cannot be sampled or nothing matches.
    pub fn open(path: impl Into<PathBuf>, config: EntryConfig) -> Result<Option<Self>> {
        let path = path.into();
        let Some(descriptor) = guess_type(&path, None, &config) else {
            return Ok(None);
        };
        Self::for_variant(descriptor, path, config).map(Some)
    }

    /// Open `path` as the given variant
    pub fn for_variant(
        descriptor: &VariantDescriptor,
        path: impl Into<PathBuf>,
        config: EntryConfig,
    ) -> Result<Self> {
        let path = path.into();
        let entry = match descriptor.name {
            TextVariant::NAME => AnyEntry::Text(Entry::new(path).with_config(config)),
            BinaryVariant::NAME => AnyEntry::Binary(Entry::new(path).with_config(config)),
            TabularVariant::NAME => AnyEntry::Tabular(Entry::new(path).with_config(config)),
            other => {
                return Err(Error::UnknownVariant {
                    name: other.to_string(),
                });
            }
        };
        Ok(entry)
    }

    /// Name of the wrapped variant
    pub fn variant_name(&self) -> &'static str {
        match self {
            AnyEntry::Text(_) => TextVariant::NAME,
            AnyEntry::Binary(_) => BinaryVariant::NAME,
            AnyEntry::Tabular(_) => TabularVariant::NAME,
        }
    }

    /// See [`Entry::path`]
    pub fn path(&self) -> Option<&Path> {
        dispatch!(self, entry => entry.path())
    }

    /// See [`Entry::is_stale`]
    pub fn is_stale(&self) -> bool {
        dispatch!(self, entry => entry.is_stale())
    }

    /// See [`Entry::is_unsaved`]
    pub fn is_unsaved(&self) -> bool {
        dispatch!(self, entry => entry.is_unsaved())
    }

    /// See [`Entry::state`]
    pub fn state(&self) -> EntryState {
        dispatch!(self, entry => entry.state())
    }

    /// See [`Entry::hash`]
    pub fn hash(&self) -> String {
        dispatch!(self, entry => entry.hash())
    }

    /// See [`Entry::load`]
    pub fn load(&mut self) -> Result<()> {
        dispatch!(self, entry => entry.load())
    }

    /// See [`Entry::save`]
    pub fn save(&mut self, overwrite: bool) -> Result<bool> {
        dispatch!(self, entry => entry.save(overwrite))
    }

    /// See [`Entry::shape`]
    pub fn shape(&mut self) -> Result<Shape> {
        dispatch!(self, entry => entry.shape())
    }

    /// A copy of the content, loading it first if needed
    pub fn content(&mut self) -> Result<Content> {
        Ok(match self {
            AnyEntry::Text(entry) => Content::Text(entry.content()?.clone()),
            AnyEntry::Binary(entry) => Content::Bytes(entry.content()?.clone()),
            AnyEntry::Tabular(entry) => Content::Rows(entry.content()?.clone()),
        })
    }

    /// Replace the content; the representation must match the variant
    pub fn set_content(&mut self, content: Content) -> Result<()> {
        match (self, content) {
            (AnyEntry::Text(entry), Content::Text(text)) => entry.set_content(text),
            (AnyEntry::Binary(entry), Content::Bytes(bytes)) => entry.set_content(bytes),
            (AnyEntry::Tabular(entry), Content::Rows(rows)) => entry.set_content(rows),
            (entry, content) => Err(Error::TypeMismatch {
                expected: entry.content_kind(),
                found: content.kind(),
            }),
        }
    }

    fn content_kind(&self) -> &'static str {
        match self {
            AnyEntry::Text(_) => TextVariant::CONTENT_KIND,
            AnyEntry::Binary(_) => BinaryVariant::CONTENT_KIND,
            AnyEntry::Tabular(_) => TabularVariant::CONTENT_KIND,
        }
    }
}
