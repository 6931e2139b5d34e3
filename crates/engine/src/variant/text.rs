use super::{Shape, Variant};
use crate::sample::Sample;
use std::path::Path;
use xamin_config::EntryConfig;
use xamin_core::digest::digest_text;
use xamin_core::{Error, Result};

/// Plain text in the configured encoding
#[derive(Debug, Clone, Copy, Default)]
pub struct TextVariant;

impl Variant for TextVariant {
    type Content = String;

    const NAME: &'static str = "text";
    const CONTENT_KIND: &'static str = "text";

    fn matches_sample(_path: &Path, sample: &Sample, _config: &EntryConfig) -> bool {
        sample.is_text()
    }

    fn default_content() -> String {
        String::new()
    }

    fn decode(&mut self, path: &Path, bytes: &[u8], config: &EntryConfig) -> Result<String> {
        config
            .text_encoding
            .decode(bytes)
            .map_err(|message| Error::Decode {
                path: path.to_path_buf(),
                message,
            })
    }

    fn encode(&self, content: &String, config: &EntryConfig) -> Result<Vec<u8>> {
        config.text_encoding.encode(content)
    }

    fn digest(content: &String, config: &EntryConfig) -> String {
        digest_text(content, config.text_encoding)
    }

    fn shape(content: &String) -> Shape {
        vec![content.chars().count()]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_predicate_follows_sample_kind() {
        let config = EntryConfig::default();
        let path = Path::new("x");
        assert!(TextVariant::matches_sample(
            path,
            &Sample::Text("hi".into()),
            &config
        ));
        assert!(!TextVariant::matches_sample(
            path,
            &Sample::Binary(vec![0xff]),
            &config
        ));
    }

    #[test]
    fn test_shape_counts_characters() {
        assert_eq!(TextVariant::shape(&"line one\nline two".to_string()), vec![17]);
        assert_eq!(TextVariant::shape(&"naïve".to_string()), vec![5]);
        assert_eq!(TextVariant::shape(&String::new()), vec![0]);
    }

    #[test]
    fn test_decode_invalid_utf8_fails() {
        let err = TextVariant
            .decode(Path::new("bad.txt"), &[0xff, 0xfe], &EntryConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
