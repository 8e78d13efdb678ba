//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the claquette binary.

mod commands;
mod run;

pub use commands::{BriefArgs, Cli, Commands};
pub use run::{run_characters, run_generate, run_poster};
