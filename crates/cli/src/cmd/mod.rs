//! CLI command implementations
//!
//! This module contains all command implementations for the xamin CLI.

pub mod cat;
pub mod detect;
pub mod info;
