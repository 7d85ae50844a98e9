//! Decides whether the gate applies to an issue.
//!
//! The gate is visible for an issue exactly when a stored configuration targets the
//! issue's project and lists its issue type. Resolution reads the stored configurations
//! and nothing else: it never writes and never calls the tracker.

use std::sync::Arc;

use gate_config::{Configuration, ConfigurationRepository};
use tracing::{debug, instrument};

use crate::GateResult;

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;

/// Finds the configuration that applies to a project and issue type.
///
/// Configurations are filtered by project first; when the project has none the issue
/// type is not inspected. Among the project's configurations the first one, in stored
/// order, listing the issue type wins.
pub fn find_applicable<'a>(
    configurations: &'a [Configuration],
    project_id: &str,
    issue_type_id: &str,
) -> Option<&'a Configuration> {
    let mut in_project = configurations
        .iter()
        .filter(|c| c.project_id() == project_id)
        .peekable();

    in_project.peek()?;

    in_project.find(|c| c.issue_type_ids().iter().any(|t| t == issue_type_id))
}

/// Resolves gate visibility against the configuration repository.
pub struct VisibilityResolver {
    repository: Arc<ConfigurationRepository>,
}

impl VisibilityResolver {
    pub fn new(repository: Arc<ConfigurationRepository>) -> Self {
        Self { repository }
    }

    /// Returns the configuration that applies, or `None` when the gate is hidden.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Persistence` if the stored configurations cannot be read.
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        project_id: &str,
        issue_type_id: &str,
    ) -> GateResult<Option<Configuration>> {
        let configurations = self.repository.list().await?;
        let matched = find_applicable(&configurations, project_id, issue_type_id).cloned();

        debug!(
            configuration_id = matched.as_ref().map(|c| c.id.as_str()),
            candidates = configurations.len(),
            "Visibility resolved"
        );
        Ok(matched)
    }

    /// Whether the gate should be shown for this project and issue type.
    pub async fn is_visible(&self, project_id: &str, issue_type_id: &str) -> GateResult<bool> {
        Ok(self.resolve(project_id, issue_type_id).await?.is_some())
    }
}
