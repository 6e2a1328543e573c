//! CLI module for EasyBook
//!
//! Provides command-line interface for:
//! - serve: Load config and fixtures, then run the HTTP API
//! - query: One-shot list query printed as JSON

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ListArgs};
pub use commands::{list_table, query, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
