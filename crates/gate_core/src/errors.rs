//! Error types for the transition gate.
//!
//! Every operation of the gate reports failures through [`GateError`]. Variants separate
//! the caller's mistakes (validation, unknown records, illegal transitions) from failures
//! of the collaborators the gate depends on (the configuration store and the tracker).

use gate_config::ConfigurationError;
use thiserror::Error;

use crate::GateAction;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Transition gate errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("Configuration storage failed: {reason}")]
    Persistence { reason: String },

    #[error("Tracker query failed: {reason}")]
    RemoteQuery { reason: String, status: Option<u16> },

    #[error("Transition '{transition_id}' is not currently available for issue {issue_key}")]
    IllegalTransition {
        issue_key: String,
        transition_id: String,
    },

    #[error("Tracker failed to execute transition '{transition_id}' for issue {issue_key}: {reason}")]
    RemoteExecution {
        issue_key: String,
        transition_id: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("Configuration not found: {id}")]
    NotFound { id: String },

    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Configuration '{existing_id}' already covers issue types {issue_type_ids:?} in project {project_id}")]
    OverlappingScope {
        existing_id: String,
        project_id: String,
        issue_type_ids: Vec<String>,
    },

    #[error("The {action} action is not available for issue {issue_key}")]
    ActionUnavailable { issue_key: String, action: GateAction },
}

impl GateError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        GateError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn remote_query(error: &tracker_client::Error) -> Self {
        GateError::RemoteQuery {
            reason: error.to_string(),
            status: error.status_code(),
        }
    }

    /// Whether the failure originated in a collaborator rather than the request itself.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            GateError::Persistence { .. }
                | GateError::RemoteQuery { .. }
                | GateError::RemoteExecution { .. }
        )
    }
}

impl From<ConfigurationError> for GateError {
    fn from(error: ConfigurationError) -> Self {
        match error {
            ConfigurationError::NotFound { id } => GateError::NotFound { id },
            ConfigurationError::InvalidConfiguration { field, reason } => {
                GateError::Validation { field, reason }
            }
            ConfigurationError::OverlappingScope {
                existing_id,
                project_id,
                issue_type_ids,
            } => GateError::OverlappingScope {
                existing_id,
                project_id,
                issue_type_ids,
            },
            other => GateError::Persistence {
                reason: other.to_string(),
            },
        }
    }
}

/// Result type alias for gate operations.
pub type GateResult<T> = Result<T, GateError>;
