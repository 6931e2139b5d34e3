//! Xamin CLI library
//!
//! This library contains the CLI logic for xamin, making it reusable for
//! testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use command::Command;
use common::RuntimeContext;
use xamin_config::Config;

/// Xamin - inspect files by detected type
#[derive(Parser)]
#[command(name = "xamin")]
#[command(about = "Detect file types and inspect their content")]
#[command(version)]
#[command(long_about = "Detect file types and inspect their content

Files are classified as text or binary from a short sample, then refined
to the most specific type that matches (for example delimited tables).")]
pub struct Cli {
    /// Path to the config file
    #[arg(long, env = "XAMIN_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "XAMIN_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for xamin CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Detect the type of one or more files
    Detect(cmd::detect::DetectCommand),

    /// Show the type, shape, digest and state of a file
    Info(cmd::info::InfoCommand),

    /// Display file contents according to their type
    Cat(cmd::cat::CatCommand),
}

/// Run the CLI
///
/// # Errors
///
/// Returns an error if logging or configuration cannot be set up, or if the
/// command fails.
pub fn run(cli: Cli) -> Result<()> {
    xamin_config::logging::init(cli.verbose, cli.log_file.as_deref())
        .context("Failed to initialize logging")?;

    let config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    tracing::debug!(path = ?cli.config, ?config, "Loaded configuration");

    let context = RuntimeContext::new(config);
    execute_command(cli.command, &context)
}

fn execute_command(command: Commands, context: &RuntimeContext) -> Result<()> {
    match command {
        Commands::Detect(detect_cmd) => detect_cmd.execute(context)?,
        Commands::Info(info_cmd) => info_cmd.execute(context)?,
        Commands::Cat(cat_cmd) => cat_cmd.execute(context)?,
    }
    Ok(())
}
