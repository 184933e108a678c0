//! CLI argument definitions using clap
//!
//! Commands:
//! - modelforge start [--database-url <url>] [--database-name <name>] [--port <port>] ...
//! - modelforge schema

use clap::{Parser, Subcommand};

use crate::store::{DATABASE_NAME_ENV, DATABASE_URL_ENV};

/// Environment variable holding the public base address of the service
pub const PUBLIC_URL_ENV: &str = "PUBLIC_BACKEND_URL";

/// Environment variable holding the listen port
pub const PORT_ENV: &str = "PORT";

/// Environment variable holding comma-separated CORS origins
pub const CORS_ORIGINS_ENV: &str = "CORS_ORIGINS";

/// ModelForge - prompt-to-model platform API
#[derive(Parser, Debug)]
#[command(name = "modelforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Start {
        /// MongoDB connection string
        #[arg(long, env = DATABASE_URL_ENV)]
        database_url: Option<String>,

        /// MongoDB database name
        #[arg(long, env = DATABASE_NAME_ENV)]
        database_name: Option<String>,

        /// Public base address used in deployment URLs
        #[arg(long = "public-url", env = PUBLIC_URL_ENV, default_value = "")]
        public_url: String,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(long, env = PORT_ENV, default_value_t = 8000)]
        port: u16,

        /// Allowed CORS origin; repeat for several. Any origin when omitted
        #[arg(long = "cors-origin", env = CORS_ORIGINS_ENV, value_delimiter = ',')]
        cors_origins: Vec<String>,

        /// Keep records in process memory instead of MongoDB
        #[arg(long)]
        memory: bool,
    },

    /// Print the record kind names as JSON and exit
    Schema,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_flags() {
        let cli = Cli::try_parse_from([
            "modelforge",
            "start",
            "--database-url",
            "mongodb://localhost:27017",
            "--database-name",
            "platform",
            "--port",
            "9001",
            "--public-url",
            "https://api.example.com",
        ])
        .unwrap();

        match cli.command {
            Command::Start {
                database_url,
                database_name,
                public_url,
                port,
                memory,
                ..
            } => {
                assert_eq!(database_url.as_deref(), Some("mongodb://localhost:27017"));
                assert_eq!(database_name.as_deref(), Some("platform"));
                assert_eq!(public_url, "https://api.example.com");
                assert_eq!(port, 9001);
                assert!(!memory);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cors_origin_flag() {
        let cli = Cli::try_parse_from([
            "modelforge",
            "start",
            "--cors-origin",
            "https://ui.example.com",
            "--cors-origin",
            "https://admin.example.com,https://ops.example.com",
        ])
        .unwrap();

        match cli.command {
            Command::Start { cors_origins, .. } => {
                assert_eq!(
                    cors_origins,
                    vec![
                        "https://ui.example.com",
                        "https://admin.example.com",
                        "https://ops.example.com",
                    ]
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_schema_command() {
        let cli = Cli::try_parse_from(["modelforge", "schema"]).unwrap();
        assert!(matches!(cli.command, Command::Schema));
    }

    #[test]
    fn test_memory_flag() {
        let cli = Cli::try_parse_from(["modelforge", "start", "--memory", "--host", "127.0.0.1"])
            .unwrap();
        match cli.command {
            Command::Start { memory, host, .. } => {
                assert!(memory);
                assert_eq!(host, "127.0.0.1");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
