use super::{Shape, TextVariant, Variant};
use crate::dialect::{self, Dialect};
use crate::sample::Sample;
use std::path::Path;
use xamin_config::EntryConfig;
use xamin_core::digest::{digest_bytes, digest_serialized};
use xamin_core::{Error, Result};

/// Ordered rows of string fields
pub type Rows = Vec<Vec<String>>;

/// Delimited text (CSV, TSV, ...), a specialization of [`TextVariant`]
///
/// The dialect is sniffed on first decode and reused for encoding, so a
/// file is written back with the delimiter and quoting it was read with.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularVariant {
    dialect: Option<Dialect>,
}

impl TabularVariant {
    /// Variant that reads and writes with a fixed dialect
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self {
            dialect: Some(dialect),
        }
    }

    /// The dialect in use, once known
    pub fn dialect(&self) -> Option<Dialect> {
        self.dialect
    }
}

impl Variant for TabularVariant {
    type Content = Rows;

    const NAME: &'static str = "tabular";
    const PARENT: Option<&'static str> = Some(TextVariant::NAME);
    const CONTENT_KIND: &'static str = "rows";

    fn matches_sample(_path: &Path, sample: &Sample, _config: &EntryConfig) -> bool {
        sample.as_text().and_then(dialect::sniff).is_some()
    }

    fn default_content() -> Rows {
        Vec::new()
    }

    fn decode(&mut self, path: &Path, bytes: &[u8], config: &EntryConfig) -> Result<Rows> {
        let to_error = |message: String| Error::Decode {
            path: path.to_path_buf(),
            message,
        };

        let text = config.text_encoding.decode(bytes).map_err(to_error)?;

        let dialect = match self.dialect {
            Some(dialect) => dialect,
            None => {
                let dialect =
                    dialect::sniff(hint_prefix(&text, config.hint_size)).unwrap_or_default();
                tracing::debug!(
                    path = %path.display(),
                    delimiter = %char::from(dialect.delimiter).escape_default(),
                    "Sniffed dialect"
                );
                self.dialect = Some(dialect);
                dialect
            }
        };

        dialect
            .reader(text.as_bytes())
            .records()
            .map(|record| {
                record
                    .map(|record| record.iter().map(str::to_string).collect())
                    .map_err(|e| to_error(e.to_string()))
            })
            .collect()
    }

    fn encode(&self, content: &Rows, config: &EntryConfig) -> Result<Vec<u8>> {
        let to_error = |message: String| Error::Encode { message };

        let mut writer = self.dialect.unwrap_or_default().writer(Vec::new());
        for row in content {
            writer
                .write_record(row)
                .map_err(|e| to_error(e.to_string()))?;
        }
        let bytes = writer.into_inner().map_err(|e| to_error(e.to_string()))?;

        // The csv writer only emits the UTF-8 fields it was given
        let text = String::from_utf8(bytes).map_err(|e| to_error(e.to_string()))?;
        config.text_encoding.encode(&text)
    }

    fn digest(content: &Rows, _config: &EntryConfig) -> String {
        digest_serialized(content)
            .unwrap_or_else(|_| digest_bytes(format!("{content:?}").as_bytes()))
    }

    fn shape(content: &Rows) -> Shape {
        vec![content.len(), content.first().map_or(0, Vec::len)]
    }
}

/// The longest prefix of `text` that fits in `max_bytes`
fn hint_prefix(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::dialect::LineTerminator;

    fn rows(data: &[&[&str]]) -> Rows {
        data.iter()
            .map(|row| row.iter().map(|s| (*s).to_string()).collect())
            .collect()
    }

    #[test]
    fn test_decode_sniffs_and_caches_dialect() {
        let mut variant = TabularVariant::default();
        let content = variant
            .decode(
                Path::new("data.tsv"),
                b"a\tb\n1\t2\n",
                &EntryConfig::default(),
            )
            .unwrap();

        assert_eq!(content, rows(&[&["a", "b"], &["1", "2"]]));
        assert_eq!(variant.dialect().unwrap().delimiter, b'\t');
    }

    #[test]
    fn test_encode_uses_sniffed_dialect() {
        let mut variant = TabularVariant::default();
        let config = EntryConfig::default();
        let content = variant
            .decode(Path::new("data.csv"), b"x;y\r\n1;2\r\n", &config)
            .unwrap();

        let bytes = variant.encode(&content, &config).unwrap();
        assert_eq!(bytes, b"x;y\r\n1;2\r\n");
    }

    #[test]
    fn test_encode_quotes_when_needed() {
        let variant = TabularVariant::with_dialect(Dialect {
            delimiter: b',',
            quote: b'"',
            terminator: LineTerminator::Lf,
        });
        let bytes = variant
            .encode(&rows(&[&["a,b", "c"]]), &EntryConfig::default())
            .unwrap();
        assert_eq!(bytes, b"\"a,b\",c\n");
    }

    #[test]
    fn test_shape() {
        assert_eq!(TabularVariant::shape(&Vec::new()), vec![0, 0]);
        assert_eq!(
            TabularVariant::shape(&rows(&[&["1", "2", "3"], &["4"]])),
            vec![2, 3]
        );
    }

    #[test]
    fn test_digest_tracks_cell_boundaries() {
        let config = EntryConfig::default();
        assert_ne!(
            TabularVariant::digest(&rows(&[&["ab", "c"]]), &config),
            TabularVariant::digest(&rows(&[&["a", "bc"]]), &config)
        );
    }

    #[test]
    fn test_predicate_requires_dialect() {
        let config = EntryConfig::default();
        let path = Path::new("x");
        assert!(TabularVariant::matches_sample(
            path,
            &Sample::Text("1,2\n3,4\n".into()),
            &config
        ));
        assert!(!TabularVariant::matches_sample(
            path,
            &Sample::Text("line one\nline two".into()),
            &config
        ));
        assert!(!TabularVariant::matches_sample(
            path,
            &Sample::Binary(vec![b',', b'\n']),
            &config
        ));
    }

    #[test]
    fn test_hint_prefix_respects_char_boundary() {
        assert_eq!(hint_prefix("abcé", 4), "abc");
        assert_eq!(hint_prefix("abc", 10), "abc");
    }
}
