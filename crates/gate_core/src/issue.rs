//! Identifiers of the issue the gate is acting on.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{GateError, GateResult};

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;

/// Issue keys look like `PROJ-123`. Numeric issue ids are accepted as well.
static ISSUE_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9_]*-[0-9]+|[0-9]+)$").expect("issue key pattern is valid")
});

/// Project ids are numeric; project keys are accepted as well.
static PROJECT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("project id pattern is valid"));

/// Checks that a project id is safe to send to the tracker.
///
/// # Errors
///
/// Returns `GateError::Validation` if the id is empty or contains anything other than
/// ASCII letters, digits and underscores.
pub fn validate_project_id(project_id: &str) -> GateResult<()> {
    if PROJECT_ID_PATTERN.is_match(project_id) {
        return Ok(());
    }

    Err(GateError::validation(
        "projectId",
        format!("'{}' is not a valid project id", project_id),
    ))
}

/// Key of an issue in the remote tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueKey(String);

impl IssueKey {
    /// Creates an issue key after checking its format.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Validation` if the key is empty or malformed.
    pub fn new(key: impl Into<String>) -> GateResult<Self> {
        let key = key.into();

        if key.is_empty() {
            return Err(GateError::validation("issueKey", "must not be empty"));
        }

        if !ISSUE_KEY_PATTERN.is_match(&key) {
            return Err(GateError::validation(
                "issueKey",
                format!("'{}' is not a valid issue key", key),
            ));
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IssueKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IssueKey {
    type Error = GateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IssueKey> for String {
    fn from(key: IssueKey) -> Self {
        key.0
    }
}

/// The issue the UI is rendering, as reported by the tracker page hosting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueContext {
    pub issue_key: IssueKey,
    pub project_id: String,
    pub issue_type_id: String,
}

impl IssueContext {
    pub fn new(
        issue_key: IssueKey,
        project_id: impl Into<String>,
        issue_type_id: impl Into<String>,
    ) -> Self {
        Self {
            issue_key,
            project_id: project_id.into(),
            issue_type_id: issue_type_id.into(),
        }
    }
}
