//! Transition Gate REST API
//!
//! This crate exposes the transition gate over HTTP: configuration administration,
//! visibility and status resolution for the issue view, and guarded execution of
//! workflow transitions.
//!
//! # Architecture
//!
//! This crate exists in the HTTP layer and handles:
//! - HTTP request/response translation
//! - Error mapping from domain to HTTP
//! - Routing and server configuration
//! - Loading settings from the environment
//!
//! The dependency flows from this crate to `gate_core`, `gate_config` and
//! `tracker_client`, never the reverse.

use std::sync::Arc;

use gate_config::ConfigurationRepository;
use gate_core::GateService;
use tracker_client::TrackerClient;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

// Re-export key types for convenience
pub use config::{GateSettings, SettingsError};
pub use errors::{ApiError, ErrorResponse};
pub use models::{request, response};
pub use server::{ApiConfig, ApiServer};

/// API version
pub const API_VERSION: &str = "v1";

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Gate orchestration for issue views
    pub gate: Arc<GateService>,

    /// Configuration administration
    pub repository: Arc<ConfigurationRepository>,
}

impl AppState {
    /// Create application state over a configuration repository and tracker client.
    pub fn new(repository: Arc<ConfigurationRepository>, tracker: Arc<dyn TrackerClient>) -> Self {
        Self {
            gate: Arc::new(GateService::new(repository.clone(), tracker)),
            repository,
        }
    }
}

#[cfg(test)]
mod test_support;
