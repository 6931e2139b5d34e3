use super::{Shape, Variant};
use crate::sample::Sample;
use std::path::Path;
use xamin_config::EntryConfig;
use xamin_core::Result;
use xamin_core::digest::digest_bytes;

/// Opaque bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryVariant;

impl Variant for BinaryVariant {
    type Content = Vec<u8>;

    const NAME: &'static str = "binary";
    const CONTENT_KIND: &'static str = "bytes";

    fn matches_sample(_path: &Path, sample: &Sample, _config: &EntryConfig) -> bool {
        !sample.is_text()
    }

    fn default_content() -> Vec<u8> {
        Vec::new()
    }

    fn decode(&mut self, _path: &Path, bytes: &[u8], _config: &EntryConfig) -> Result<Vec<u8>> {
        Ok(bytes.to_vec())
    }

    fn encode(&self, content: &Vec<u8>, _config: &EntryConfig) -> Result<Vec<u8>> {
        Ok(content.clone())
    }

    fn digest(content: &Vec<u8>, _config: &EntryConfig) -> String {
        digest_bytes(content)
    }

    fn shape(content: &Vec<u8>) -> Shape {
        vec![content.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_is_inverse_of_text() {
        let config = EntryConfig::default();
        let path = Path::new("x");
        assert!(BinaryVariant::matches_sample(
            path,
            &Sample::Binary(vec![0]),
            &config
        ));
        assert!(!BinaryVariant::matches_sample(
            path,
            &Sample::Text(String::new()),
            &config
        ));
    }

    #[test]
    fn test_digest_of_empty_is_not_sentinel() {
        assert!(!BinaryVariant::digest(&Vec::new(), &EntryConfig::default()).is_empty());
    }
}
