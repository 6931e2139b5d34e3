//! Info command implementation
//!
//! Display the detected type, shape, digest and change state of a file.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use xamin_engine::AnyEntry;
use xamin_engine::dialect::{Dialect, LineTerminator};

/// Info command
#[derive(Debug, Args)]
pub struct InfoCommand {
    /// File to inspect
    pub path: PathBuf,

    /// Output in JSON format (default: table format)
    #[arg(long)]
    pub json: bool,
}

/// Information about one entry
#[derive(Debug, Serialize)]
struct InfoData {
    path: PathBuf,
    variant: &'static str,
    state: String,
    shape: Vec<usize>,
    digest: String,
    encoding: String,
    dialect: Option<DialectInfo>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct DialectInfo {
    delimiter: String,
    quote: String,
    terminator: &'static str,
}

impl From<Dialect> for DialectInfo {
    fn from(dialect: Dialect) -> Self {
        Self {
            delimiter: char::from(dialect.delimiter).escape_default().to_string(),
            quote: char::from(dialect.quote).to_string(),
            terminator: match dialect.terminator {
                LineTerminator::Lf => "\\n",
                LineTerminator::CrLf => "\\r\\n",
            },
        }
    }
}

impl Command for InfoCommand {
    type Output = ();
    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let mut entry = context.open_entry(&self.path)?;
        let info = gather_info(&mut entry, context)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            display_table(&info);
        }
        Ok(())
    }
}

fn gather_info(entry: &mut AnyEntry, context: &RuntimeContext) -> Result<InfoData> {
    let shape = entry.shape()?;
    let dialect = match entry {
        AnyEntry::Tabular(tabular) => tabular.variant().dialect().map(DialectInfo::from),
        AnyEntry::Text(_) | AnyEntry::Binary(_) => None,
    };

    Ok(InfoData {
        path: entry.path().map(PathBuf::from).unwrap_or_default(),
        variant: entry.variant_name(),
        state: entry.state().to_string(),
        shape,
        digest: entry.hash(),
        encoding: context.entry_config().text_encoding.to_string(),
        dialect,
    })
}

/// Print a section header
fn print_section_header(name: &str) {
    println!("{}", name.bright_white().bold());
}

/// Print a single table row
fn print_row(label: &str, value: &str) {
    println!("  {label:12} {}", value.bright_white());
}

fn display_table(info: &InfoData) {
    print_section_header(&info.path.display().to_string());
    print_row("Type", info.variant);
    print_row("State", &info.state);
    print_row("Shape", &format_shape(&info.shape));
    print_row("Digest", &info.digest);
    print_row("Encoding", &info.encoding);

    if let Some(dialect) = &info.dialect {
        println!();
        print_section_header("Dialect");
        print_row("Delimiter", &dialect.delimiter);
        print_row("Quote", &dialect.quote);
        print_row("Terminator", dialect.terminator);
    }
}

fn format_shape(shape: &[usize]) -> String {
    let dims: Vec<String> = shape.iter().map(ToString::to_string).collect();
    format!("({})", dims.join(" x "))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use xamin_config::Config;

    #[test]
    fn test_gather_info_tabular() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.tsv");
        fs::write(&path, "a\tb\tc\n1\t2\t3\n").unwrap();

        let context = RuntimeContext::new(Config::default());
        let mut entry = context.open_entry(&path).unwrap();
        let info = gather_info(&mut entry, &context).unwrap();

        assert_eq!(info.variant, "tabular");
        assert_eq!(info.shape, vec![2, 3]);
        assert_eq!(info.state, "fresh");
        assert_eq!(info.digest.len(), 64);
        assert_eq!(
            info.dialect,
            Some(DialectInfo {
                delimiter: "\\t".to_string(),
                quote: "\"".to_string(),
                terminator: "\\n",
            })
        );
    }

    #[test]
    fn test_gather_info_text_has_no_dialect() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "line one\nline two").unwrap();

        let context = RuntimeContext::new(Config::default());
        let mut entry = context.open_entry(&path).unwrap();
        let info = gather_info(&mut entry, &context).unwrap();

        assert_eq!(info.variant, "text");
        assert_eq!(info.shape, vec![17]);
        assert_eq!(info.encoding, "utf-8");
        assert!(info.dialect.is_none());
    }

    #[test]
    fn test_format_shape() {
        assert_eq!(format_shape(&[16]), "(16)");
        assert_eq!(format_shape(&[8, 6]), "(8 x 6)");
    }
}
