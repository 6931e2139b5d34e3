//! Entry variants
//!
//! A variant supplies everything an [`Entry`](crate::entry::Entry) needs to
//! know about one kind of file: the type predicate used by detection, how to
//! decode and encode content, the default "empty" content, the digest used
//! for change tracking and the shape descriptor.

mod binary;
mod tabular;
mod text;

pub use binary::BinaryVariant;
pub use tabular::{Rows, TabularVariant};
pub use text::TextVariant;

use crate::sample::{self as sampler, Sample};
use std::fmt;
use std::path::Path;
use xamin_config::EntryConfig;
use xamin_core::Result;

/// Structural size of content: `[length]` or `[rows, columns]`
pub type Shape = Vec<usize>;

/// Capability interface implemented by every entry variant
pub trait Variant: Default + Send + Sync + 'static {
    /// In-memory representation of the content
    type Content: Clone + PartialEq + fmt::Debug + Send + Sync;

    /// Unique variant name, used by the registry
    const NAME: &'static str;

    /// Name of the classification this variant specializes
    const PARENT: Option<&'static str> = None;

    /// Name of the content representation, used in type mismatch errors
    const CONTENT_KIND: &'static str;

    /// Type predicate over an already taken sample
    fn matches_sample(path: &Path, sample: &Sample, config: &EntryConfig) -> bool;

    /// Type predicate, sampling the file when no sample is given
    fn is_type(path: &Path, sample: Option<&Sample>, config: &EntryConfig) -> bool {
        match sample {
            Some(sample) => Self::matches_sample(path, sample, config),
            None => sampler::sample(path, config)
                .is_some_and(|sample| Self::matches_sample(path, &sample, config)),
        }
    }

    /// Content installed before the first load
    fn default_content() -> Self::Content;

    /// Turn the bytes of `path` into content
    fn decode(&mut self, path: &Path, bytes: &[u8], config: &EntryConfig)
    -> Result<Self::Content>;

    /// Turn content into the bytes to write
    fn encode(&self, content: &Self::Content, config: &EntryConfig) -> Result<Vec<u8>>;

    /// Digest of the content, never the empty sentinel
    fn digest(content: &Self::Content, config: &EntryConfig) -> String;

    /// Structural size of the content
    fn shape(content: &Self::Content) -> Shape;
}
