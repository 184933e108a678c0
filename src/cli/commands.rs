//! CLI command implementations
//!
//! `start` resolves configuration, sets up the store and runs the HTTP
//! server on a tokio runtime until ctrl-c. `schema` prints the record kinds.

use std::sync::Arc;

use serde::Serialize;

use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::schema::RecordKind;
use crate::store::{MemoryStore, StoreAdapter, StoreConfig};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Where records are kept for this process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreMode {
    /// MongoDB when configured, degraded otherwise
    Database(StoreConfig),
    /// Process memory; lost on exit
    Memory,
}

impl StoreMode {
    fn label(&self) -> &'static str {
        match self {
            StoreMode::Memory => "memory",
            StoreMode::Database(config) if config.target().is_some() => "mongodb",
            StoreMode::Database(_) => "none",
        }
    }
}

#[derive(Debug, Serialize)]
struct SchemaOutput {
    models: Vec<&'static str>,
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Start {
            database_url,
            database_name,
            public_url,
            host,
            port,
            cors_origins,
            memory,
        } => {
            let mut server_config = ServerConfig::with_port(port)
                .public_base_url(public_url)
                .cors_origins(cors_origins);
            server_config.host = host;

            let mode = if memory {
                StoreMode::Memory
            } else {
                StoreMode::Database(StoreConfig::new(database_url, database_name))
            };

            start(server_config, mode)
        }
        Command::Schema => schema(),
    }
}

/// Start the HTTP API server
///
/// Store problems never stop startup; the server comes up degraded and
/// data endpoints answer "Database not configured".
pub fn start(server_config: ServerConfig, mode: StoreMode) -> CliResult<()> {
    log_event(Event::StartupBegin);

    validate_host(&server_config.host)?;

    let addr = server_config.socket_addr();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("addr", addr.as_str()),
            ("public_base_url", server_config.public_base_url.as_str()),
            ("store", mode.label()),
        ],
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::BootFailed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async move {
        let store = match &mode {
            StoreMode::Memory => {
                let store = StoreAdapter::new(Arc::new(MemoryStore::new()));
                store.log_connected();
                store
            }
            StoreMode::Database(config) => StoreAdapter::connect(config).await,
        };

        HttpServer::new(server_config, store)
            .start()
            .await
            .map_err(|e| CliError::BootFailed(format!("HTTP server failed: {}", e)))
    })
}

/// Print the record kind names as one JSON line
pub fn schema() -> CliResult<()> {
    write_response(&SchemaOutput {
        models: RecordKind::collection_names(),
    })
}

fn validate_host(host: &str) -> CliResult<()> {
    if host.trim().is_empty() {
        return Err(CliError::Config("host must not be empty".to_string()));
    }
    Ok(())
}
