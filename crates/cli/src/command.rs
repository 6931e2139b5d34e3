//! Command trait for the xamin CLI
//!
//! Every subcommand implements [`Command`], which gives them a uniform
//! interface and keeps them testable without going through argument parsing.

use crate::common::RuntimeContext;
use crate::error::Result;

/// Trait for all xamin commands
///
/// The `execute` method receives a [`RuntimeContext`] holding shared state
/// such as the loaded configuration.
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command with the given runtime context
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` if the command fails to execute.
    fn execute(&self, context: &RuntimeContext) -> Result<Self::Output>;
}
