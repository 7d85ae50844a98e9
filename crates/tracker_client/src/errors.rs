//! Error types for tracker client operations.
//!
//! This module defines the error types that can occur when talking to the remote
//! issue tracker through the tracker_client crate. Each variant keeps enough
//! context (HTTP status, an excerpt of the response body) for callers to report an actionable failure.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during tracker client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use tracker_client::Error;
///
/// match client.list_legal_transitions("PROJ-1").await {
///     Ok(transitions) => println!("{} transitions available", transitions.len()),
///     Err(Error::AuthError(msg)) => eprintln!("Authentication failed: {}", msg),
///     Err(Error::NotFound) => eprintln!("Issue does not exist"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tracker rejected the configured credentials.
    ///
    /// Returned for HTTP 401 and 403 responses. The contained string carries
    /// the response body returned by the tracker.
    #[error("Failed to authenticate with the issue tracker: {0}")]
    AuthError(String),

    /// Error deserializing the response from the tracker.
    ///
    /// This error occurs when the tracker returns a body that cannot be
    /// parsed into the expected data structure, usually after an API change.
    #[error("Failed to deserialize tracker response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The client configuration could not be turned into a working client.
    #[error("Invalid tracker client configuration: {0}")]
    InvalidConfiguration(String),

    /// A caller-supplied id cannot be used as a segment of a request path.
    #[error("'{0}' is not a valid path segment for a tracker request")]
    InvalidPathSegment(String),

    /// The requested resource (project, issue) was not found.
    #[error("Resource not found")]
    NotFound,

    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("Request to the issue tracker failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The tracker answered with a status code the operation does not accept.
    #[error("Issue tracker returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl Error {
    /// The HTTP status reported by the tracker, when the failure carried one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::NotFound => Some(404),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
