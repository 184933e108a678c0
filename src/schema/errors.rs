//! Record validation errors

use thiserror::Error;

/// Result type for record validation
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A record failed a field-level constraint
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Numeric field outside its allowed range
    #[error("{kind}.{field} out of range: {detail}")]
    OutOfRange {
        kind: &'static str,
        field: &'static str,
        detail: String,
    },

    /// Required text field is blank
    #[error("{kind}.{field} must not be empty")]
    Empty {
        kind: &'static str,
        field: &'static str,
    },

    /// Status change not allowed by the job lifecycle
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl SchemaError {
    pub fn out_of_range(kind: &'static str, field: &'static str, detail: impl Into<String>) -> Self {
        Self::OutOfRange {
            kind,
            field,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = SchemaError::out_of_range("User", "age", "121 > 120");
        assert_eq!(err.to_string(), "User.age out of range: 121 > 120");

        let err = SchemaError::Empty {
            kind: "Deployment",
            field: "model_id",
        };
        assert_eq!(err.to_string(), "Deployment.model_id must not be empty");
    }
}
