//! Error handling and HTTP error conversion
//!
//! This module defines how domain errors are translated to HTTP error responses.
//!
//! # Architecture
//!
//! Domain errors from `gate_core` and `gate_config` are converted to HTTP responses with
//! appropriate status codes and error messages. This conversion happens at the HTTP
//! boundary. Store failures and tracker failures are reported without their internal
//! detail; the full error is logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gate_config::ConfigurationError;
use gate_core::GateError;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Standard error response for all API errors.
///
/// All error responses follow this consistent structure to provide
/// machine-readable error codes and human-readable messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetails,
}

/// Error details structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional context (optional, type varies by error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self {
            error: ErrorDetails {
                code: code.to_string(),
                message: message.into(),
                details,
            },
        }
    }
}

/// Axum response wrapper for API errors
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(State(state): State<AppState>) -> Result<Json<Vec<Configuration>>, ApiError> {
///     let configurations = state.repository.list().await?;
///     Ok(Json(configurations))
/// }
/// ```
#[derive(Debug)]
pub enum ApiError {
    /// A failure reported by the gate
    Gate(GateError),

    /// The request itself is malformed
    Validation { field: String, message: String },
}

impl ApiError {
    /// Create a validation error with field information
    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        ApiError::Gate(err)
    }
}

impl From<ConfigurationError> for ApiError {
    fn from(err: ConfigurationError) -> Self {
        ApiError::Gate(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ApiError::Gate(err) => convert_gate_error(err),
            ApiError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    "ValidationError",
                    format!("Invalid {}: {}", field, message),
                    Some(json!({ "field": field })),
                ),
            ),
        };

        log_error(&self, status);

        (status, Json(error_response)).into_response()
    }
}

/// Convert a gate error to HTTP status code and error response
pub fn convert_gate_error(error: &GateError) -> (StatusCode, ErrorResponse) {
    match error {
        GateError::Validation { field, .. } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(
                "ValidationError",
                error.to_string(),
                Some(json!({ "field": field })),
            ),
        ),
        GateError::OverlappingScope {
            existing_id,
            project_id,
            issue_type_ids,
        } => (
            StatusCode::CONFLICT,
            ErrorResponse::new(
                "OverlappingScope",
                error.to_string(),
                Some(json!({
                    "existingId": existing_id,
                    "projectId": project_id,
                    "issueTypeIds": issue_type_ids,
                })),
            ),
        ),
        GateError::NotFound { id } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new("NotFound", error.to_string(), Some(json!({ "id": id }))),
        ),
        GateError::IllegalTransition {
            issue_key,
            transition_id,
        } => (
            StatusCode::CONFLICT,
            ErrorResponse::new(
                "IllegalTransition",
                error.to_string(),
                Some(json!({ "issueKey": issue_key, "transitionId": transition_id })),
            ),
        ),
        GateError::ActionUnavailable { issue_key, action } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorResponse::new(
                "ActionUnavailable",
                error.to_string(),
                Some(json!({ "issueKey": issue_key, "action": action })),
            ),
        ),
        GateError::RemoteQuery { status, .. } => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse::new(
                "TrackerQueryFailed",
                "The issue tracker could not be queried",
                status.map(|s| json!({ "trackerStatus": s })),
            ),
        ),
        GateError::RemoteExecution {
            issue_key,
            transition_id,
            status,
            ..
        } => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse::new(
                "TrackerExecutionFailed",
                format!(
                    "The issue tracker failed to execute transition '{}' for issue {}",
                    transition_id, issue_key
                ),
                Some(json!({
                    "issueKey": issue_key,
                    "transitionId": transition_id,
                    "trackerStatus": status,
                })),
            ),
        ),
        GateError::Persistence { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("InternalError", "An internal error occurred", None),
        ),
    }
}

/// Log error with appropriate level based on HTTP status
fn log_error(error: &ApiError, status: StatusCode) {
    let message = match error {
        ApiError::Gate(err) => err.to_string(),
        ApiError::Validation { field, message } => format!("{}: {}", field, message),
    };

    match status {
        StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY => {
            tracing::error!("API error: {} - {}", status, message);
        }
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
            tracing::warn!("API error: {} - {}", status, message);
        }
        _ => {
            tracing::info!("API error: {} - {}", status, message);
        }
    }
}
