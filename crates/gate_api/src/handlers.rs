//! HTTP request handlers
//!
//! Each handler:
//! 1. Extracts HTTP request data (path params, query params, body)
//! 2. Translates HTTP types to domain types
//! 3. Calls the configuration repository or the gate service
//! 4. Translates domain results to HTTP responses

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use gate_config::ConfigurationFields;
use gate_core::{IssueContext, IssueKey, ResolvedContext, TransitionReceipt};
use tracker_client::{IssueType, Project};

use crate::{
    errors::ApiError,
    models::{
        request::{
            ConfigurationRequest, ExecuteTransitionRequest, IssueScopeQuery, TriggerActionRequest,
        },
        response::{
            ConfigurationResponse, HealthCheckResponse, IssueStatusResponse, VisibilityResponse,
        },
    },
    AppState,
};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// GET /api/v1/health
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /api/v1/configurations
///
/// Lists every configuration in stored order.
pub async fn list_configurations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConfigurationResponse>>, ApiError> {
    let configurations = state.repository.list().await?;

    Ok(Json(
        configurations
            .into_iter()
            .map(ConfigurationResponse::from)
            .collect(),
    ))
}

/// POST /api/v1/configurations
pub async fn create_configuration(
    State(state): State<AppState>,
    Json(request): Json<ConfigurationRequest>,
) -> Result<(StatusCode, Json<ConfigurationResponse>), ApiError> {
    let created = state
        .repository
        .create(ConfigurationFields::from(request))
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /api/v1/configurations/:id
///
/// Replaces every field of an existing configuration.
pub async fn update_configuration(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ConfigurationRequest>,
) -> Result<Json<ConfigurationResponse>, ApiError> {
    let updated = state
        .repository
        .update(&id, ConfigurationFields::from(request))
        .await?;

    Ok(Json(updated.into()))
}

/// DELETE /api/v1/configurations/:id
///
/// Succeeds whether or not the configuration existed.
pub async fn delete_configuration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.repository.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/visibility?projectId=..&issueTypeId=..
pub async fn get_visibility(
    State(state): State<AppState>,
    Query(query): Query<IssueScopeQuery>,
) -> Result<Json<VisibilityResponse>, ApiError> {
    let (project_id, issue_type_id) = require_scope(query)?;

    let configuration = state
        .gate
        .visible_configuration(&project_id, &issue_type_id)
        .await?;

    Ok(Json(configuration.into()))
}

/// GET /api/v1/projects
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.gate.list_projects().await?))
}

/// GET /api/v1/projects/:project_id/issue-types
pub async fn list_issue_types(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<IssueType>>, ApiError> {
    Ok(Json(state.gate.list_issue_types(&project_id).await?))
}

/// GET /api/v1/issues/:issue_key/status
pub async fn get_issue_status(
    State(state): State<AppState>,
    Path(issue_key): Path<String>,
) -> Result<Json<IssueStatusResponse>, ApiError> {
    let issue_key = IssueKey::new(issue_key)?;

    let status = state.gate.current_status(&issue_key).await?;

    Ok(Json(IssueStatusResponse::new(issue_key, status)))
}

/// GET /api/v1/issues/:issue_key/context?projectId=..&issueTypeId=..
///
/// Everything the issue view needs to render the gate.
pub async fn get_issue_context(
    State(state): State<AppState>,
    Path(issue_key): Path<String>,
    Query(query): Query<IssueScopeQuery>,
) -> Result<Json<ResolvedContext>, ApiError> {
    let issue_key = IssueKey::new(issue_key)?;
    let (project_id, issue_type_id) = require_scope(query)?;

    let resolved = state
        .gate
        .resolve_context(&IssueContext::new(issue_key, project_id, issue_type_id))
        .await?;

    Ok(Json(resolved))
}

/// POST /api/v1/issues/:issue_key/transitions
///
/// Executes a transition if the tracker currently lists it as legal for the issue.
pub async fn execute_transition(
    State(state): State<AppState>,
    Path(issue_key): Path<String>,
    Json(request): Json<ExecuteTransitionRequest>,
) -> Result<Json<TransitionReceipt>, ApiError> {
    let issue_key = IssueKey::new(issue_key)?;
    if request.transition_id.trim().is_empty() {
        return Err(ApiError::validation_error(
            "transitionId",
            "must not be empty",
        ));
    }

    let receipt = state
        .gate
        .execute_transition(&issue_key, &request.transition_id)
        .await?;

    Ok(Json(receipt))
}

/// POST /api/v1/issues/:issue_key/actions
///
/// Runs the approve or deny action of the gate.
pub async fn trigger_action(
    State(state): State<AppState>,
    Path(issue_key): Path<String>,
    Json(request): Json<TriggerActionRequest>,
) -> Result<Json<TransitionReceipt>, ApiError> {
    let context = IssueContext::new(
        IssueKey::new(issue_key)?,
        request.project_id,
        request.issue_type_id,
    );

    let receipt = state.gate.trigger(&context, request.action).await?;

    Ok(Json(receipt))
}

fn require_scope(query: IssueScopeQuery) -> Result<(String, String), ApiError> {
    let project_id = query
        .project_id
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::validation_error("projectId", "query parameter is required"))?;
    let issue_type_id = query
        .issue_type_id
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::validation_error("issueTypeId", "query parameter is required"))?;

    Ok((project_id, issue_type_id))
}
