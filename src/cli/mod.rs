//! CLI module for ModelForge
//!
//! Provides command-line interface for:
//! - start: Serve the HTTP API
//! - schema: Print record kind names

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, CORS_ORIGINS_ENV, PORT_ENV, PUBLIC_URL_ENV};
pub use commands::{run, run_command, schema, start, StoreMode};
pub use errors::{CliError, CliResult};
pub use io::{write_json, write_response};
