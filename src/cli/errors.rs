//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code. The
//! rendered message starts with a stable code.

use std::io;

use thiserror::Error;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid flags or environment
    #[error("MF_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// Writing command output failed
    #[error("MF_CLI_IO_ERROR: {0}")]
    Io(String),

    /// Runtime or listener could not start
    #[error("MF_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),
}

impl CliError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "MF_CLI_CONFIG_ERROR",
            CliError::Io(_) => "MF_CLI_IO_ERROR",
            CliError::BootFailed(_) => "MF_CLI_BOOT_FAILED",
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::BootFailed("port in use".to_string());
        assert_eq!(err.to_string(), "MF_CLI_BOOT_FAILED: port in use");
        assert_eq!(err.code(), "MF_CLI_BOOT_FAILED");
    }

    #[test]
    fn test_from_io_error() {
        let err: CliError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert_eq!(err.code(), "MF_CLI_IO_ERROR");
    }
}
