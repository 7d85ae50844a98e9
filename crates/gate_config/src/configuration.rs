//! Configuration records authored by administrators.
//!
//! A [`Configuration`] binds a project and a set of issue types to the transitions the
//! gate actions should invoke. Records serialize with camelCase field names so the stored
//! collection keeps the `appConfiguration` layout:
//!
//! ```json
//! [{
//!   "id": "7f0c…",
//!   "configurationName": "Access requests",
//!   "projectId": "10000",
//!   "projectName": "Operations",
//!   "issueTypeIds": ["10001"],
//!   "denyTransitionId": "11",
//!   "statusesConfiguration": [{ "statusName": "Review", "transitionId": "11" }]
//! }]
//! ```

use serde::{Deserialize, Deserializer, Serialize};

#[cfg(test)]
#[path = "configuration_tests.rs"]
mod tests;

/// Maps an issue status name to the transition the deny action invokes from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTransition {
    /// Status name, matched case-sensitively against the issue's current status
    pub status_name: String,
    /// Transition id to invoke while the issue is in `status_name`
    pub transition_id: String,
}

impl StatusTransition {
    pub fn new(status_name: impl Into<String>, transition_id: impl Into<String>) -> Self {
        Self {
            status_name: status_name.into(),
            transition_id: transition_id.into(),
        }
    }
}

/// Every authored field of a configuration except its identifier.
///
/// This is the input to create and update; updates overwrite all fields at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationFields {
    /// Human label shown in the admin list
    #[serde(default, deserialize_with = "null_as_default")]
    pub configuration_name: String,

    /// Tracker project the rule applies to
    pub project_id: String,

    /// Display name of the project, copied for convenience (not authoritative)
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_name: String,

    /// Issue types the rule applies to
    #[serde(default, deserialize_with = "null_as_default")]
    pub issue_type_ids: Vec<String>,

    /// Transition id of the generic deny action
    #[serde(default)]
    pub deny_transition_id: Option<String>,

    /// Per-status deny transitions, in authoring order
    #[serde(default, deserialize_with = "null_as_default")]
    pub statuses_configuration: Vec<StatusTransition>,

    /// Transition id of the approve action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approve_transition_id: Option<String>,
}

impl ConfigurationFields {
    /// Whether this rule covers the given project and issue type.
    pub fn applies_to(&self, project_id: &str, issue_type_id: &str) -> bool {
        self.project_id == project_id && self.issue_type_ids.iter().any(|t| t == issue_type_id)
    }
}

/// A stored configuration: authored fields plus the identifier assigned on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Opaque unique identifier, immutable after creation
    pub id: String,

    #[serde(flatten)]
    pub fields: ConfigurationFields,
}

impl Configuration {
    pub fn new(id: impl Into<String>, fields: ConfigurationFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.fields.project_id
    }

    pub fn issue_type_ids(&self) -> &[String] {
        &self.fields.issue_type_ids
    }

    pub fn statuses(&self) -> &[StatusTransition] {
        &self.fields.statuses_configuration
    }

    pub fn applies_to(&self, project_id: &str, issue_type_id: &str) -> bool {
        self.fields.applies_to(project_id, issue_type_id)
    }
}

// Records written by the admin screen may carry explicit nulls for unset fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
