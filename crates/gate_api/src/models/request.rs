//! HTTP request type definitions
//!
//! Request bodies and query strings accepted by the REST API. All JSON uses
//! camelCase field names.

use gate_config::{ConfigurationFields, StatusTransition};
use gate_core::GateAction;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// Body of configuration create and update requests.
///
/// # Example
///
/// ```json
/// {
///   "configurationName": "Access requests",
///   "projectId": "10000",
///   "projectName": "Operations",
///   "issueTypeIds": ["10001"],
///   "denyTransitionId": "99",
///   "statusesConfiguration": [{ "statusName": "Review", "transitionId": "11" }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationRequest {
    #[serde(default)]
    pub configuration_name: String,

    pub project_id: String,

    #[serde(default)]
    pub project_name: String,

    #[serde(default)]
    pub issue_type_ids: Vec<String>,

    #[serde(default)]
    pub deny_transition_id: Option<String>,

    #[serde(default)]
    pub statuses_configuration: Vec<StatusTransitionRequest>,

    #[serde(default)]
    pub approve_transition_id: Option<String>,
}

/// One `(statusName, transitionId)` entry of a configuration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTransitionRequest {
    pub status_name: String,
    pub transition_id: String,
}

impl From<ConfigurationRequest> for ConfigurationFields {
    fn from(request: ConfigurationRequest) -> Self {
        ConfigurationFields {
            configuration_name: request.configuration_name,
            project_id: request.project_id,
            project_name: request.project_name,
            issue_type_ids: request.issue_type_ids,
            deny_transition_id: request.deny_transition_id,
            statuses_configuration: request
                .statuses_configuration
                .into_iter()
                .map(|s| StatusTransition::new(s.status_name, s.transition_id))
                .collect(),
            approve_transition_id: request.approve_transition_id,
        }
    }
}

/// Query string identifying the project and issue type of an issue view.
///
/// Both parameters are optional at the parsing level so that a missing one is reported
/// through the standard error response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueScopeQuery {
    pub project_id: Option<String>,
    pub issue_type_id: Option<String>,
}

/// Body of a direct transition request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTransitionRequest {
    pub transition_id: String,
}

/// Body of a gate action request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerActionRequest {
    pub action: GateAction,
    pub project_id: String,
    pub issue_type_id: String,
}
