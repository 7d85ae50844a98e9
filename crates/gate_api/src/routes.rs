//! HTTP routing configuration
//!
//! This module defines all HTTP routes and their corresponding handlers.
//!
//! # Route Structure
//!
//! All routes are prefixed with `/api/v1`:
//!
//! - GET    /api/v1/health - Health check
//! - GET    /api/v1/configurations - List configurations
//! - POST   /api/v1/configurations - Create configuration
//! - PUT    /api/v1/configurations/:id - Replace configuration
//! - DELETE /api/v1/configurations/:id - Delete configuration
//! - GET    /api/v1/visibility - Gate visibility for a project and issue type
//! - GET    /api/v1/projects - List tracker projects
//! - GET    /api/v1/projects/:project_id/issue-types - List issue types of a project
//! - GET    /api/v1/issues/:issue_key/status - Current issue status
//! - GET    /api/v1/issues/:issue_key/context - Resolved gate context
//! - POST   /api/v1/issues/:issue_key/transitions - Execute a legal transition
//! - POST   /api/v1/issues/:issue_key/actions - Run a gate action

use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{handlers, middleware as api_middleware, AppState};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Create the complete API router with all routes configured.
///
/// This function sets up:
/// - All endpoint routes
/// - CORS configuration
/// - Request tracing
/// - Timeout handling
pub fn create_router(state: AppState) -> Router {
    // The issue view is served from the tracker's origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(false)
        .max_age(Duration::from_secs(3600));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().include_headers(false))
        .on_response(DefaultOnResponse::new().include_headers(false));

    let timeout_layer = TimeoutLayer::new(Duration::from_secs(30));

    let api_v1 = Router::new()
        .route("/health", get(handlers::health_check))
        .merge(configuration_routes())
        .route("/visibility", get(handlers::get_visibility))
        .route("/projects", get(handlers::list_projects))
        .route(
            "/projects/:project_id/issue-types",
            get(handlers::list_issue_types),
        )
        .merge(issue_routes())
        .layer(middleware::from_fn(api_middleware::tracing_middleware))
        .layer(timeout_layer)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);

    Router::new().nest("/api/v1", api_v1)
}

/// Configuration administration
fn configuration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/configurations",
            get(handlers::list_configurations).post(handlers::create_configuration),
        )
        .route(
            "/configurations/:id",
            put(handlers::update_configuration).delete(handlers::delete_configuration),
        )
}

/// Issue view routes
fn issue_routes() -> Router<AppState> {
    Router::new()
        .route("/issues/:issue_key/status", get(handlers::get_issue_status))
        .route("/issues/:issue_key/context", get(handlers::get_issue_context))
        .route(
            "/issues/:issue_key/transitions",
            post(handlers::execute_transition),
        )
        .route("/issues/:issue_key/actions", post(handlers::trigger_action))
}
