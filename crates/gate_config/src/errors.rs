//! Configuration system error types.
//!
//! Domain-specific errors for loading, storing and validating
//! transition gate configurations.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Configuration system errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Failed to read configuration store: {reason}")]
    StoreReadFailed { reason: String },

    #[error("Failed to write configuration store: {reason}")]
    StoreWriteFailed { reason: String },

    #[error("Failed to parse stored configuration: {reason}")]
    ParseError { reason: String },

    #[error("Configuration not found: {id}")]
    NotFound { id: String },

    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("Configuration scope overlaps configuration '{existing_id}' in project {project_id} for issue types {issue_type_ids:?}")]
    OverlappingScope {
        existing_id: String,
        project_id: String,
        issue_type_ids: Vec<String>,
    },
}

impl ConfigurationError {
    /// Whether the failure came from the underlying store rather than the caller's input.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            ConfigurationError::StoreReadFailed { .. }
                | ConfigurationError::StoreWriteFailed { .. }
                | ConfigurationError::ParseError { .. }
        )
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidConfiguration {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
