//! Detect command implementation
//!
//! Report the most specific entry type of each given file.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use xamin_config::EntryConfig;

/// Detect command
#[derive(Debug, Args)]
pub struct DetectCommand {
    /// Files to classify
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Detection outcome for one path
#[derive(Debug, Serialize, PartialEq, Eq)]
struct DetectReport {
    path: PathBuf,
    variant: Option<&'static str>,
    specificity: Option<usize>,
    ties: Vec<&'static str>,
}

impl Command for DetectCommand {
    type Output = ();
    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let config = context.entry_config();
        let reports: Vec<DetectReport> = self
            .paths
            .iter()
            .map(|path| detect_one(path, &config))
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            reports.iter().for_each(print_report);
        }
        Ok(())
    }
}

fn detect_one(path: &Path, config: &EntryConfig) -> DetectReport {
    match xamin_engine::detect(path, None, config) {
        Some(detection) => DetectReport {
            path: path.to_path_buf(),
            variant: Some(detection.variant.name),
            specificity: Some(detection.specificity),
            ties: detection.ties,
        },
        None => DetectReport {
            path: path.to_path_buf(),
            variant: None,
            specificity: None,
            ties: Vec::new(),
        },
    }
}

fn print_report(report: &DetectReport) {
    let path = report.path.display();
    match (report.variant, report.specificity) {
        (Some(variant), Some(specificity)) => {
            let line = format!(
                "  {} {path}  {} {}",
                "✓".bright_green(),
                variant.bright_white().bold(),
                format!("(specificity {specificity})").dimmed()
            );
            if report.ties.is_empty() {
                println!("{line}");
            } else {
                println!(
                    "{line} {}",
                    format!("ambiguous with {}", report.ties.join(", ")).yellow()
                );
            }
        }
        _ => println!("  {} {path}  {}", "✗".bright_red(), "unknown".dimmed()),
    }
}
