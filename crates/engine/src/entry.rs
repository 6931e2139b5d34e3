//! File entries
//!
//! An [`Entry`] owns one (path, in-memory content) pair. Content is loaded
//! lazily on first access and re-loaded whenever the backing file has been
//! modified since the last sync. Two independent flags describe the entry:
//!
//! - **stale**: the file on disk is newer than the in-memory content
//! - **unsaved**: the content digest differs from the digest at the last
//!   load or save
//!
//! Saving refuses to overwrite a file that changed on disk since the last
//! sync unless the caller passes `overwrite = true`.

use crate::system::{RealSystem, System};
use crate::variant::{BinaryVariant, Shape, TabularVariant, TextVariant, Variant};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use xamin_config::EntryConfig;
use xamin_core::digest::NO_CONTENT;
use xamin_core::{Error, Result};

/// A text file entry
pub type TextEntry = Entry<TextVariant>;

/// A binary file entry
pub type BinaryEntry = Entry<BinaryVariant>;

/// A delimited text file entry
pub type TabularEntry = Entry<TabularVariant>;

/// Combined change state of an entry, for UI indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Content has not been loaded or set
    Unloaded,
    /// Content matches the file as last synced, and the file has not changed
    Fresh,
    /// Content has unsaved changes
    Dirty,
    /// The file changed on disk since the last sync
    Stale,
    /// Unsaved changes and the file changed on disk: saving is a conflict
    DirtyStale,
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryState::Unloaded => "unloaded",
            EntryState::Fresh => "fresh",
            EntryState::Dirty => "dirty",
            EntryState::Stale => "stale",
            EntryState::DirtyStale => "dirty-stale",
        })
    }
}

/// An entry bound to an optional file path
pub struct Entry<V: Variant> {
    path: Option<PathBuf>,
    variant: V,
    content: Option<V::Content>,
    loaded_hash: String,
    data_mtime: Option<SystemTime>,
    config: EntryConfig,
    system: Arc<dyn System>,
}

impl<V: Variant> Entry<V> {
    /// Create an entry for `path`; nothing is read until content is needed
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_path(Some(path.into()))
    }

    /// Create an entry that is not backed by any file ("untitled")
    pub fn unbound() -> Self {
        Self::with_path(None)
    }

    fn with_path(path: Option<PathBuf>) -> Self {
        Self {
            path,
            variant: V::default(),
            content: None,
            loaded_hash: NO_CONTENT.to_string(),
            data_mtime: None,
            config: EntryConfig::default(),
            system: Arc::new(RealSystem),
        }
    }

    /// Use the given settings for decoding, encoding and hashing
    #[must_use]
    pub fn with_config(mut self, config: EntryConfig) -> Self {
        self.config = config;
        self
    }

    /// Use another filesystem backend
    #[must_use]
    pub fn with_system(mut self, system: Arc<dyn System>) -> Self {
        self.system = system;
        self
    }

    /// Use a pre-configured variant (for example a fixed dialect)
    #[must_use]
    pub fn with_variant(mut self, variant: V) -> Self {
        self.variant = variant;
        self
    }

    /// The backing path, `None` for untitled entries
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The entry settings
    pub fn config(&self) -> &EntryConfig {
        &self.config
    }

    /// The variant
    pub fn variant(&self) -> &V {
        &self.variant
    }

    /// Digest recorded at the last load or save
    pub fn loaded_hash(&self) -> &str {
        &self.loaded_hash
    }

    /// File modification time recorded at the last load or save
    pub fn data_mtime(&self) -> Option<SystemTime> {
        self.data_mtime
    }

    /// Whether content has been loaded or set
    pub fn is_loaded(&self) -> bool {
        self.content.is_some()
    }

    /// The in-memory content without loading anything
    pub fn cached_content(&self) -> Option<&V::Content> {
        self.content.as_ref()
    }

    /// Whether the backing file changed since content was last synced
    ///
    /// A missing backing file is not stale: there is nothing newer on disk.
    pub fn is_stale(&self) -> bool {
        let Some(path) = self.path.as_deref() else {
            return false;
        };
        let Some(mtime) = self.system.modified(path) else {
            return false;
        };
        if self.content.is_none() {
            return true;
        }
        self.data_mtime.is_none_or(|synced| mtime > synced)
    }

    /// Whether the content differs from what was last loaded or saved
    ///
    /// Untitled entries are always unsaved.
    pub fn is_unsaved(&self) -> bool {
        self.path.is_none() || self.hash() != self.loaded_hash
    }

    /// Combined change state
    pub fn state(&self) -> EntryState {
        if self.content.is_none() {
            return EntryState::Unloaded;
        }
        match (self.is_unsaved(), self.is_stale()) {
            (false, false) => EntryState::Fresh,
            (true, false) => EntryState::Dirty,
            (false, true) => EntryState::Stale,
            (true, true) => EntryState::DirtyStale,
        }
    }

    /// Digest of the in-memory content, empty if there is none
    ///
    /// Never touches the filesystem.
    pub fn hash(&self) -> String {
        self.content
            .as_ref()
            .map_or_else(String::new, |content| V::digest(content, &self.config))
    }

    /// The content, loading it first if the backing file is newer
    ///
    /// Entries with nothing to load from get the variant's default content.
    pub fn content(&mut self) -> Result<&V::Content> {
        self.refresh()?;
        Ok(self.content.get_or_insert_with(V::default_content))
    }

    /// Mutable access to the content, loading it first like [`Entry::content`]
    ///
    /// Changes made through the reference mark the entry unsaved.
    pub fn content_mut(&mut self) -> Result<&mut V::Content> {
        self.refresh()?;
        Ok(self.content.get_or_insert_with(V::default_content))
    }

    /// Replace the content
    ///
    /// The last sync point is kept, so the entry becomes unsaved unless the
    /// new content digests the same as what was loaded. An entry bound to an
    /// existing file that was never loaded is loaded first, so the file's
    /// state is known before it can be overwritten. If that file cannot be
    /// read or decoded, only its modification time is recorded; the new
    /// content replaces it either way.
    pub fn set_content(&mut self, content: V::Content) -> Result<()> {
        if self.content.is_none()
            && self.is_stale()
            && let Err(e) = self.load()
        {
            tracing::debug!(error = %e, "Replacing content of an unreadable file");
            self.loaded_hash = NO_CONTENT.to_string();
            self.data_mtime = self.path.as_deref().and_then(|p| self.system.modified(p));
        }
        self.content = Some(content);
        Ok(())
    }

    /// Read the backing file into memory and record the sync point
    pub fn load(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(Error::MissingDestination)?;

        if self.content.is_none() {
            self.content = Some(V::default_content());
        }

        let mtime = self.system.modified(&path);
        let bytes = self.system.read_file(&path)?;
        let content = self.variant.decode(&path, &bytes, &self.config)?;
        self.content = Some(content);
        self.mark_synced(mtime);

        tracing::debug!(
            path = %path.display(),
            variant = V::NAME,
            size = bytes.len(),
            "Loaded entry"
        );
        Ok(())
    }

    /// Write the content to the backing file
    ///
    /// Returns `Ok(false)` without touching the file when there is nothing to
    /// save. Fails with [`Error::ExternalChangeConflict`] if the file changed
    /// on disk since the last sync, unless `overwrite` is set.
    ///
    /// With a system that does not persist writes (such as
    /// [`DryRunSystem`](crate::system::DryRunSystem)) the write is only
    /// recorded and the entry stays unsaved.
    pub fn save(&mut self, overwrite: bool) -> Result<bool> {
        let path = self.path.clone().ok_or(Error::MissingDestination)?;

        if !overwrite && self.content.is_some() && self.is_stale() {
            tracing::warn!(
                path = %path.display(),
                "Refusing to save over a file modified on disk"
            );
            return Err(Error::ExternalChangeConflict { path });
        }

        if !self.is_unsaved() {
            tracing::debug!(path = %path.display(), "No unsaved changes, skipping save");
            return Ok(false);
        }

        let Some(content) = self.content.as_ref() else {
            return Ok(false);
        };
        let bytes = self.variant.encode(content, &self.config)?;
        self.system.write_file(&path, &bytes)?;
        if self.system.persists_writes() {
            let mtime = self.system.modified(&path);
            self.mark_synced(mtime);
        }

        tracing::debug!(
            path = %path.display(),
            variant = V::NAME,
            size = bytes.len(),
            "Saved entry"
        );
        Ok(true)
    }

    /// Write the content to `path` and bind the entry to it
    ///
    /// Saving to the current path is a plain [`Entry::save`]. A different
    /// path that already exists is only overwritten with `overwrite` set.
    /// Content that was never read is loaded from the current file first.
    /// The entry keeps its old binding if anything fails.
    pub fn save_as(&mut self, path: impl Into<PathBuf>, overwrite: bool) -> Result<bool> {
        let path = path.into();
        if self.path.as_deref() == Some(path.as_path()) {
            return self.save(overwrite);
        }

        if !overwrite && self.system.exists(&path) {
            tracing::warn!(path = %path.display(), "Refusing to save over an existing file");
            return Err(Error::ExternalChangeConflict { path });
        }

        if self.content.is_none() {
            self.refresh()?;
        }
        let content = self.content.get_or_insert_with(V::default_content);
        let bytes = self.variant.encode(content, &self.config)?;
        self.system.write_file(&path, &bytes)?;

        if self.system.persists_writes() {
            let mtime = self.system.modified(&path);
            self.mark_synced(mtime);
        } else {
            self.loaded_hash = NO_CONTENT.to_string();
            self.data_mtime = None;
        }

        tracing::debug!(
            from = ?self.path,
            to = %path.display(),
            variant = V::NAME,
            "Saved entry to new path"
        );
        self.path = Some(path);
        Ok(true)
    }

    /// Structural size of the content, loading it first if needed
    pub fn shape(&mut self) -> Result<Shape> {
        Ok(V::shape(self.content()?))
    }

    fn refresh(&mut self) -> Result<()> {
        if self.is_stale() {
            self.load()?;
        }
        Ok(())
    }

    fn mark_synced(&mut self, mtime: Option<SystemTime>) {
        self.loaded_hash = self.hash();
        self.data_mtime = mtime;
    }
}

impl<V: Variant> fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("variant", &V::NAME)
            .field("path", &self.path)
            .field("loaded", &self.content.is_some())
            .finish_non_exhaustive()
    }
}
