//! # Xamin Engine
//!
//! File entry abstraction for the xamin file inspector.
//!
//! - **Sampling**: Bounded reads that classify a file as text or binary
//! - **Registry**: Entry variants ranked by how specific their classification is
//! - **Detection**: Picking the most specific variant for a file
//! - **Entries**: Lazily loaded content with stale/unsaved tracking and
//!   conflict-safe saves
//! - **System Abstraction**: Filesystem operations abstracted for testing

pub mod any;
pub mod detect;
pub mod dialect;
pub mod entry;
pub mod registry;
pub mod sample;
pub mod system;
pub mod variant;

// Re-export error types from core
pub use xamin_core::{Error, Result};

// Re-export commonly used types
pub use any::{AnyEntry, Content};
pub use detect::{Detection, detect, guess_type};
pub use entry::{BinaryEntry, Entry, EntryState, TabularEntry, TextEntry};
pub use registry::{Registry, VariantDescriptor, registry};
pub use sample::Sample;
pub use variant::{BinaryVariant, Rows, Shape, TabularVariant, TextVariant, Variant};
