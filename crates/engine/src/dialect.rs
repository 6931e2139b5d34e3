//! Delimited-text dialect sniffing
//!
//! A dialect is sniffed from a text sample by looking for a delimiter that
//! splits every record into the same number of fields. Quoted fields are
//! skipped while counting, so a quoted `"a,b"` does not add a field.

/// Delimiters tried while sniffing, in order of preference
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b';', b'|'];

/// Record terminator used when writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineTerminator {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineTerminator {
    /// Terminator for the `csv` writer
    pub fn to_csv(self) -> csv::Terminator {
        match self {
            LineTerminator::Lf => csv::Terminator::Any(b'\n'),
            LineTerminator::CrLf => csv::Terminator::CRLF,
        }
    }
}

/// Delimiter and quoting conventions of a delimited text file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Field delimiter
    pub delimiter: u8,
    /// Quote character
    pub quote: u8,
    /// Record terminator
    pub terminator: LineTerminator,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            terminator: LineTerminator::Lf,
        }
    }
}

impl Dialect {
    /// Reader configured for this dialect
    pub fn reader<R: std::io::Read>(&self, source: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .from_reader(source)
    }

    /// Writer configured for this dialect
    pub fn writer<W: std::io::Write>(&self, sink: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .terminator(self.terminator.to_csv())
            .from_writer(sink)
    }
}

/// Sniff a dialect from a text sample
///
/// Returns `None` when no candidate delimiter appears the same non-zero
/// number of times in every record, which is the case for plain prose.
///
/// # Examples
///
/// ```
/// use xamin_engine::dialect::sniff;
///
/// let dialect = sniff("a;b;c\n1;2;3\n").unwrap();
/// assert_eq!(dialect.delimiter, b';');
/// assert!(sniff("line one\nline two").is_none());
/// ```
pub fn sniff(text: &str) -> Option<Dialect> {
    let quote = guess_quote(text);
    let records = split_records(text, quote);
    let (first, rest) = records.split_first()?;

    let delimiter = CANDIDATE_DELIMITERS.into_iter().find(|&delimiter| {
        let expected = count_delimiters(first, delimiter, quote);
        expected > 0
            && rest
                .iter()
                .all(|record| count_delimiters(record, delimiter, quote) == expected)
    })?;

    let terminator = if text.contains("\r\n") {
        LineTerminator::CrLf
    } else {
        LineTerminator::Lf
    };

    Some(Dialect {
        delimiter,
        quote,
        terminator,
    })
}

/// Pick `'` only when fields are single-quoted and `"` never appears
///
/// Every complete line must hold an even number of `'`, so apostrophes in
/// unquoted words (`'tis`, `it's`) keep the default `"`.
fn guess_quote(text: &str) -> u8 {
    if text.contains('"') {
        return b'"';
    }

    let single_quoted = text.lines().any(|line| line.starts_with('\''))
        || CANDIDATE_DELIMITERS.iter().any(|&d| {
            let opening = [d, b'\''];
            text.as_bytes().windows(2).any(|pair| pair == opening)
        });

    // The sample boundary may cut the last line inside a quoted field
    let complete = if text.ends_with('\n') {
        text
    } else {
        text.rsplit_once('\n').map_or(text, |(head, _)| head)
    };
    let balanced = complete
        .lines()
        .all(|line| line.bytes().filter(|&b| b == b'\'').count().is_multiple_of(2));

    if single_quoted && balanced { b'\'' } else { b'"' }
}

/// Split a sample into non-blank records, honoring quoted line breaks
///
/// An unterminated final record is dropped once two complete records precede
/// it, since the sample boundary may have cut it short.
fn split_records(text: &str, quote: u8) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (i, &byte) in text.as_bytes().iter().enumerate() {
        if byte == quote {
            in_quotes = !in_quotes;
        } else if byte == b'\n' && !in_quotes {
            records.push(&text[start..i]);
            start = i + 1;
        }
    }

    let tail = &text[start..];
    if records.len() < 2 {
        records.push(tail);
    }

    records
        .into_iter()
        .map(|record| record.trim_end_matches('\r'))
        .filter(|record| !record.trim().is_empty())
        .collect()
}

fn count_delimiters(record: &str, delimiter: u8, quote: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for &byte in record.as_bytes() {
        if byte == quote {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_sniff_comma() {
        let dialect = sniff("0,1,2\n3,4,5\n6,7,8\n").unwrap();
        assert_eq!(dialect, Dialect::default());
    }

    #[test]
    fn test_sniff_tab_and_crlf() {
        let dialect = sniff("a\tb\r\nc\td\r\n").unwrap();
        assert_eq!(dialect.delimiter, b'\t');
        assert_eq!(dialect.terminator, LineTerminator::CrLf);
    }

    #[test]
    fn test_sniff_pipe() {
        assert_eq!(sniff("a|b|c\nd|e|f").unwrap().delimiter, b'|');
    }

    #[test]
    fn test_prose_is_not_delimited() {
        assert!(sniff("This is my\ntest text file.").is_none());
        assert!(sniff("line one\nline two").is_none());
        assert!(sniff("").is_none());
    }

    #[test]
    fn test_inconsistent_counts_rejected() {
        assert!(sniff("a,b,c\nd,e\nf,g,h\n").is_none());
    }

    #[test]
    fn test_quoted_delimiters_ignored() {
        let dialect = sniff("\"x,y\",1\n\"z\",2\n").unwrap();
        assert_eq!(dialect.delimiter, b',');
        assert_eq!(dialect.quote, b'"');
    }

    #[test]
    fn test_quoted_line_break_stays_in_record() {
        let dialect = sniff("\"multi\nline\",1\nplain,2\n").unwrap();
        assert_eq!(dialect.delimiter, b',');
    }

    #[test]
    fn test_single_quote_detection() {
        let dialect = sniff("'a;b';1\n'c';2\n").unwrap();
        assert_eq!(dialect.quote, b'\'');
        assert_eq!(dialect.delimiter, b';');
    }

    #[test]
    fn test_leading_apostrophe_is_not_a_quote() {
        let dialect = sniff("'tis,a\nfoo,b\n").unwrap();
        assert_eq!(dialect.delimiter, b',');
        assert_eq!(dialect.quote, b'"');

        let dialect = sniff("name;note\nx;it's\n").unwrap();
        assert_eq!(dialect.delimiter, b';');
        assert_eq!(dialect.quote, b'"');
    }

    #[test]
    fn test_single_quote_with_cut_tail() {
        assert_eq!(guess_quote("'a';1\n'b';2\n'c,d"), b'\'');
    }

    #[test]
    fn test_truncated_tail_ignored() {
        // The last record was cut by the sample boundary
        let dialect = sniff("1,2,3\n4,5,6\n7,8");
        assert_eq!(dialect.unwrap().delimiter, b',');
    }

    #[test]
    fn test_preference_order() {
        // Both ',' and ';' are consistent; ',' is preferred
        assert_eq!(sniff("a,b;c\nd,e;f\n").unwrap().delimiter, b',');
    }

    #[test]
    fn test_reader_and_writer_use_dialect() {
        let dialect = Dialect {
            delimiter: b';',
            quote: b'"',
            terminator: LineTerminator::CrLf,
        };

        let mut writer = dialect.writer(Vec::new());
        writer.write_record(["a", "b;c"]).unwrap();
        let bytes = writer.into_inner().unwrap();
        assert_eq!(bytes, b"a;\"b;c\"\r\n");

        let mut reader = dialect.reader(bytes.as_slice());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.iter().collect::<Vec<_>>(), vec!["a", "b;c"]);
    }
}
