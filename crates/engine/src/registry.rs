//! Type registry
//!
//! The registry is an explicit list of variant descriptors. Each descriptor
//! names its parent classification; specificity is the number of classified
//! ancestors above it, so root classifications (`text`, `binary`) rank 0 and
//! a specialization such as `tabular` ranks one higher than its parent.
//!
//! Ranks are computed once, on the first call to [`Registry::discover`].
//! Descriptors registered after that are not seen by detection.

use crate::sample::Sample;
use crate::variant::{BinaryVariant, TabularVariant, TextVariant, Variant};
use std::fmt;
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};
use xamin_config::EntryConfig;

/// Type predicate: does the sampled file belong to this variant?
///
/// Predicates must be pure: no I/O beyond the given sample, no entry state.
pub type Predicate = fn(&Path, &Sample, &EntryConfig) -> bool;

/// Describes one concrete entry variant to the registry
#[derive(Clone, Copy)]
pub struct VariantDescriptor {
    /// Unique variant name
    pub name: &'static str,
    /// Name of the classification this variant specializes
    pub parent: Option<&'static str>,
    /// Type predicate
    pub predicate: Predicate,
}

impl VariantDescriptor {
    /// Descriptor for a statically known variant
    pub fn of<V: Variant>() -> Self {
        Self {
            name: V::NAME,
            parent: V::PARENT,
            predicate: V::matches_sample,
        }
    }

    /// Evaluate the type predicate
    pub fn matches(&self, path: &Path, sample: &Sample, config: &EntryConfig) -> bool {
        (self.predicate)(path, sample, config)
    }
}

impl fmt::Debug for VariantDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantDescriptor")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

/// A descriptor together with its computed specificity
#[derive(Debug, Clone, Copy)]
pub struct RankedVariant {
    /// Number of classified ancestors
    pub specificity: usize,
    /// The variant
    pub descriptor: VariantDescriptor,
}

/// Registry of entry variants, ranked on first discovery
#[derive(Debug, Default)]
pub struct Registry {
    pending: Mutex<Vec<VariantDescriptor>>,
    discovered: OnceLock<Vec<RankedVariant>>,
}

impl Registry {
    /// Create a registry from descriptors, kept in the given order
    pub fn new(descriptors: impl IntoIterator<Item = VariantDescriptor>) -> Self {
        Self {
            pending: Mutex::new(descriptors.into_iter().collect()),
            discovered: OnceLock::new(),
        }
    }

    /// Registry holding the built-in text, binary and tabular variants
    pub fn builtin() -> Self {
        Self::new([
            VariantDescriptor::of::<TextVariant>(),
            VariantDescriptor::of::<BinaryVariant>(),
            VariantDescriptor::of::<TabularVariant>(),
        ])
    }

    /// Add a descriptor after the existing ones
    ///
    /// Returns `false` if discovery already ran, in which case the
    /// descriptor will not take part in detection.
    pub fn register(&self, descriptor: VariantDescriptor) -> bool {
        if self.discovered.get().is_some() {
            tracing::warn!(
                variant = descriptor.name,
                "Variant registered after discovery; it will not be detected"
            );
            return false;
        }

        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(descriptor);
        true
    }

    /// All variants with their specificity, in registration order
    pub fn discover(&self) -> &[RankedVariant] {
        self.discovered.get_or_init(|| {
            let descriptors = self
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            let ranked = rank(&descriptors);
            tracing::debug!(count = ranked.len(), "Discovered entry variants");
            ranked
        })
    }

    /// Look up a discovered variant by name
    pub fn get(&self, name: &str) -> Option<&RankedVariant> {
        self.discover().iter().find(|v| v.descriptor.name == name)
    }
}

fn rank(descriptors: &[VariantDescriptor]) -> Vec<RankedVariant> {
    descriptors
        .iter()
        .map(|descriptor| RankedVariant {
            specificity: specificity(descriptor, descriptors),
            descriptor: *descriptor,
        })
        .collect()
}

/// Count classified ancestors, ignoring parents that are not registered
fn specificity(descriptor: &VariantDescriptor, all: &[VariantDescriptor]) -> usize {
    let mut depth = 0;
    let mut parent = descriptor.parent;

    // A chain longer than the registry means a cycle
    while let Some(name) = parent
        && depth < all.len()
    {
        let Some(ancestor) = all.iter().find(|d| d.name == name) else {
            break;
        };
        depth += 1;
        parent = ancestor.parent;
    }

    depth
}

/// The process-wide registry of built-in variants
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::builtin)
}
