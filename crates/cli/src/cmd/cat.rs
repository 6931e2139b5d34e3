//! Cat command implementation
//!
//! Display the content of a file the way its detected type reads it.

use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use xamin_engine::{AnyEntry, Variant};

/// Bytes shown per hex dump line
const HEX_LINE_WIDTH: usize = 16;

/// Cat command
#[derive(Debug, Args)]
pub struct CatCommand {
    /// File to display
    pub path: PathBuf,
}

impl Command for CatCommand {
    type Output = ();
    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let mut entry = context.open_entry(&self.path)?;
        let rendered = render(&mut entry)?;

        let mut stdout = io::stdout().lock();
        stdout.write_all(&rendered)?;
        stdout.flush()?;
        Ok(())
    }
}

/// Render the entry content for display
fn render(entry: &mut AnyEntry) -> Result<Vec<u8>> {
    let rendered = match entry {
        AnyEntry::Text(text) => text.content()?.clone().into_bytes(),
        AnyEntry::Tabular(tabular) => {
            let rows = tabular.content()?.clone();
            tabular.variant().encode(&rows, tabular.config())?
        }
        AnyEntry::Binary(binary) => hex_dump(binary.content()?).into_bytes(),
    };
    Ok(rendered)
}

/// Format bytes as offset, hex and printable ASCII columns
fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (line, chunk) in bytes.chunks(HEX_LINE_WIDTH).enumerate() {
        let ascii: String = chunk
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    char::from(b)
                } else {
                    '.'
                }
            })
            .collect();
        out.push_str(&format!(
            "{:08x}  {:<width$}  |{ascii}|\n",
            line * HEX_LINE_WIDTH,
            hex::encode(chunk),
            width = HEX_LINE_WIDTH * 2
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use xamin_config::Config;

    fn open(path: &std::path::Path) -> AnyEntry {
        RuntimeContext::new(Config::default())
            .open_entry(path)
            .unwrap()
    }

    #[test]
    fn test_hex_dump_lines() {
        let bytes: Vec<u8> = (0u8..20).collect();
        let dump = hex_dump(&bytes);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00000000  000102030405060708090a0b0c0d0e0f"));
        assert!(lines[1].starts_with("00000010  10111213"));
        assert!(lines[1].ends_with("|....|"));
    }

    #[test]
    fn test_render_tabular_keeps_dialect() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.csv");
        fs::write(&path, "a;b\n\"x;y\";2\n").unwrap();

        let mut entry = open(&path);
        let rendered = render(&mut entry).unwrap();
        assert_eq!(rendered, b"a;b\n\"x;y\";2\n");
    }

    #[test]
    fn test_render_text_verbatim() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "just some words").unwrap();

        let mut entry = open(&path);
        assert_eq!(render(&mut entry).unwrap(), b"just some words");
    }

    #[test]
    fn test_render_binary_as_hex() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob.bin");
        fs::write(&path, [0xff, 0x00, b'A']).unwrap();

        let mut entry = open(&path);
        let rendered = String::from_utf8(render(&mut entry).unwrap()).unwrap();
        assert!(rendered.starts_with("00000000  ff0041"));
        assert!(rendered.contains("|..A|"));
    }
}
