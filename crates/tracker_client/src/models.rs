//! # Models
//!
//! Data models for the entities the transition gate reads from the issue tracker:
//! projects, issue types, issue statuses and workflow transitions.
//!
//! Field names follow the Jira Cloud REST API (camelCase JSON) so the models can be
//! deserialized straight from tracker responses.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// A tracker project.
///
/// # Examples
///
/// ```
/// use tracker_client::models::Project;
///
/// let project = Project {
///     id: "10000".to_string(),
///     key: "OPS".to_string(),
///     name: "Operations".to_string(),
/// };
/// assert_eq!(project.key, "OPS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Project {
    /// The numeric project id, as a string
    pub id: String,
    /// The short project key used as issue key prefix
    #[serde(default)]
    pub key: String,
    /// The display name of the project
    pub name: String,
}

/// An issue type available in a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IssueType {
    /// The issue type id
    pub id: String,
    /// The display name of the issue type
    pub name: String,
    /// Whether issues of this type are sub-tasks
    #[serde(default)]
    pub subtask: bool,
}

/// The category a workflow status belongs to (To Do, In Progress, Done).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusCategory {
    pub key: String,
    pub name: String,
}

/// The current workflow status of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStatus {
    /// The status id
    #[serde(default)]
    pub id: String,
    /// The status name, e.g. "In Review"
    pub name: String,
    /// The category of the status, when the tracker reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_category: Option<StatusCategory>,
}

impl IssueStatus {
    /// Creates a status with only a name, used when the id is irrelevant.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            status_category: None,
        }
    }
}

/// A workflow transition that is currently legal for an issue.
///
/// Transitions are directed edges out of the issue's current status, so the
/// same id is generally not valid from a different status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transition {
    /// The transition id
    pub id: String,
    /// The display name of the transition
    #[serde(default)]
    pub name: String,
    /// The status the issue moves to when this transition runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<IssueStatus>,
}

impl Transition {
    /// Creates a transition carrying only an id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            to: None,
        }
    }
}

/// One page of `GET /rest/api/3/project/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectSearchPage {
    #[serde(default)]
    pub values: Vec<Project>,
    #[serde(default)]
    pub start_at: u64,
    #[serde(default)]
    pub max_results: u64,
    #[serde(default = "default_is_last")]
    pub is_last: bool,
}

fn default_is_last() -> bool {
    true
}

/// The subset of `GET /rest/api/3/project/{id}` the client reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectDetails {
    #[serde(default)]
    pub issue_types: Vec<IssueType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueFields {
    pub status: IssueStatus,
}

/// The subset of `GET /rest/api/3/issue/{key}` the client reads.
#[derive(Debug, Deserialize)]
pub(crate) struct IssueDetails {
    pub fields: IssueFields,
}

/// Body of `GET /rest/api/3/issue/{key}/transitions`.
#[derive(Debug, Deserialize)]
pub(crate) struct TransitionList {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TransitionReference<'a> {
    pub id: &'a str,
}

/// Body of `POST /rest/api/3/issue/{key}/transitions`.
#[derive(Debug, Serialize)]
pub(crate) struct TransitionRequest<'a> {
    pub transition: TransitionReference<'a>,
}
