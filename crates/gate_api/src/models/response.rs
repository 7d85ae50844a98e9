//! HTTP response type definitions
//!
//! This module defines all HTTP response models for the REST API.
//! These types are created from domain results and sent to HTTP clients.
//!
//! # Architecture
//!
//! HTTP response types:
//! - Convert from domain types via `From` trait
//! - Use camelCase for JSON serialization

use gate_config::Configuration;
use serde::{Deserialize, Serialize};
use tracker_client::IssueStatus;

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// A stored configuration as returned to administrators.
///
/// ```json
/// {
///   "id": "5b8e…",
///   "configurationName": "Access requests",
///   "projectId": "10000",
///   "projectName": "Operations",
///   "issueTypeIds": ["10001"],
///   "denyTransitionId": "99",
///   "statusesConfiguration": [{ "statusName": "Review", "transitionId": "11" }],
///   "approveTransitionId": null
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationResponse {
    pub id: String,
    pub configuration_name: String,
    pub project_id: String,
    pub project_name: String,
    pub issue_type_ids: Vec<String>,
    pub deny_transition_id: Option<String>,
    pub statuses_configuration: Vec<StatusTransitionResponse>,
    pub approve_transition_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTransitionResponse {
    pub status_name: String,
    pub transition_id: String,
}

impl From<Configuration> for ConfigurationResponse {
    fn from(configuration: Configuration) -> Self {
        let fields = configuration.fields;
        Self {
            id: configuration.id,
            configuration_name: fields.configuration_name,
            project_id: fields.project_id,
            project_name: fields.project_name,
            issue_type_ids: fields.issue_type_ids,
            deny_transition_id: fields.deny_transition_id,
            statuses_configuration: fields
                .statuses_configuration
                .into_iter()
                .map(|s| StatusTransitionResponse {
                    status_name: s.status_name,
                    transition_id: s.transition_id,
                })
                .collect(),
            approve_transition_id: fields.approve_transition_id,
        }
    }
}

/// Whether the gate applies to a project and issue type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityResponse {
    pub visible: bool,

    /// The applicable configuration, when visible
    pub configuration: Option<ConfigurationResponse>,
}

impl From<Option<Configuration>> for VisibilityResponse {
    fn from(configuration: Option<Configuration>) -> Self {
        Self {
            visible: configuration.is_some(),
            configuration: configuration.map(ConfigurationResponse::from),
        }
    }
}

/// Current workflow status of an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStatusResponse {
    pub issue_key: String,
    pub status_id: String,
    pub status_name: String,

    /// Status category key (`new`, `indeterminate`, `done`), when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_category: Option<String>,
}

impl IssueStatusResponse {
    pub fn new(issue_key: impl Into<String>, status: IssueStatus) -> Self {
        Self {
            issue_key: issue_key.into(),
            status_id: status.id,
            status_name: status.name,
            status_category: status.status_category.map(|c| c.key),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Service status ("healthy")
    pub status: String,

    /// Crate version
    pub version: Option<String>,

    /// Response timestamp (ISO 8601)
    pub timestamp: String,
}
