//! Store adapter errors

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the document store adapter
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No store handle exists (connection string or database name missing,
    /// or the client could not be created at startup)
    #[error("Database not configured")]
    NotConfigured,

    /// Could not reach the database
    #[error("Connection error: {0}")]
    Connection(String),

    /// The database rejected or failed an operation
    #[error("Execution error: {0}")]
    Execution(String),

    /// A record could not be converted to or from a document
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A record failed its field constraints
    #[error("Validation error: {0}")]
    Validation(#[from] SchemaError),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match *err.kind {
            ErrorKind::Io(_) | ErrorKind::ServerSelection { .. } => {
                StoreError::Connection(err.to_string())
            }
            _ => StoreError::Execution(err.to_string()),
        }
    }
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
