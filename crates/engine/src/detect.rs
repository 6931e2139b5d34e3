//! Type detection
//!
//! Every registered predicate is evaluated against a sample of the file and
//! the match with the greatest specificity wins. On equal specificity the
//! variant registered first wins; the other top-ranked matches are reported
//! in [`Detection::ties`] so callers can flag the ambiguity.

use crate::registry::{Registry, VariantDescriptor, registry};
use crate::sample::{self as sampler, Sample};
use std::path::Path;
use xamin_config::EntryConfig;

/// Outcome of a successful detection
#[derive(Debug, Clone)]
pub struct Detection<'r> {
    /// The most specific matching variant
    pub variant: &'r VariantDescriptor,
    /// Its specificity
    pub specificity: usize,
    /// Other matches with the same specificity, in registry order
    pub ties: Vec<&'static str>,
}

impl Detection<'_> {
    /// Whether another variant matched at the same specificity
    pub fn is_ambiguous(&self) -> bool {
        !self.ties.is_empty()
    }
}

impl Registry {
    /// Detect the best matching variant for `path`
    ///
    /// When `sample` is `None` one is read from the file. Returns `None` if
    /// no sample can be obtained or no variant matches.
    pub fn detect(
        &self,
        path: &Path,
        sample: Option<&Sample>,
        config: &EntryConfig,
    ) -> Option<Detection<'_>> {
        let owned;
        let sample = match sample {
            Some(sample) => sample,
            None => {
                owned = sampler::sample(path, config)?;
                &owned
            }
        };

        let mut best: Option<Detection<'_>> = None;
        for ranked in self.discover() {
            if !ranked.descriptor.matches(path, sample, config) {
                continue;
            }

            let outranks = best
                .as_ref()
                .is_none_or(|current| ranked.specificity > current.specificity);
            if outranks {
                best = Some(Detection {
                    variant: &ranked.descriptor,
                    specificity: ranked.specificity,
                    ties: Vec::new(),
                });
            } else if let Some(current) = best.as_mut()
                && current.specificity == ranked.specificity
            {
                current.ties.push(ranked.descriptor.name);
            }
        }

        match &best {
            Some(detection) if detection.is_ambiguous() => tracing::debug!(
                path = %path.display(),
                variant = detection.variant.name,
                ties = ?detection.ties,
                "Ambiguous type detection, keeping first registered"
            ),
            Some(detection) => tracing::debug!(
                path = %path.display(),
                variant = detection.variant.name,
                "Detected entry type"
            ),
            None => tracing::debug!(path = %path.display(), "No entry type matched"),
        }

        best
    }

    /// Guess the variant for `path`, ignoring ambiguity details
    pub fn guess_type(
        &self,
        path: &Path,
        sample: Option<&Sample>,
        config: &EntryConfig,
    ) -> Option<&VariantDescriptor> {
        self.detect(path, sample, config).map(|d| d.variant)
    }
}

/// Detect using the process-wide registry
pub fn detect(
    path: &Path,
    sample: Option<&Sample>,
    config: &EntryConfig,
) -> Option<Detection<'static>> {
    registry().detect(path, sample, config)
}

/// Guess the variant for `path` using the process-wide registry
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use xamin_config::EntryConfig;
/// use xamin_engine::detect::guess_type;
///
/// if let Some(variant) = guess_type(Path::new("data.csv"), None, &EntryConfig::default()) {
///     println!("{}", variant.name);
/// }
/// ```
pub fn guess_type(
    path: &Path,
    sample: Option<&Sample>,
    config: &EntryConfig,
) -> Option<&'static VariantDescriptor> {
    registry().guess_type(path, sample, config)
}
