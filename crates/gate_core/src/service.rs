//! Orchestration of the gate for one issue.
//!
//! [`GateService`] answers the questions the UI asks while rendering an issue: does the
//! gate apply, what is the issue's current status, and which transition does each action
//! invoke. It then runs a chosen action through the [`TransitionExecutor`].

use std::fmt;
use std::sync::Arc;

use gate_config::{Configuration, ConfigurationRepository};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use tracker_client::{IssueStatus, IssueType, Project, TrackerClient};

use crate::{
    issue::validate_project_id, GateError, GateResult, IssueContext, IssueKey, StatusTransitionResolver, TransitionExecutor,
    TransitionReceipt, VisibilityResolver,
};

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;

/// An action the gate offers on an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GateAction {
    Approve,
    Deny,
}

impl fmt::Display for GateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateAction::Approve => f.write_str("approve"),
            GateAction::Deny => f.write_str("deny"),
        }
    }
}

/// Everything the UI needs to render the gate for one issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedContext {
    pub issue_key: IssueKey,
    pub project_id: String,
    pub issue_type_id: String,

    /// Configuration that applies; `None` hides the gate.
    pub matched_configuration: Option<Configuration>,

    /// Live status name. Only fetched when a configuration matched.
    pub current_status_name: Option<String>,

    pub resolved_deny_transition_id: Option<String>,
    pub resolved_approve_transition_id: Option<String>,
}

impl ResolvedContext {
    fn hidden(context: &IssueContext) -> Self {
        Self {
            issue_key: context.issue_key.clone(),
            project_id: context.project_id.clone(),
            issue_type_id: context.issue_type_id.clone(),
            matched_configuration: None,
            current_status_name: None,
            resolved_deny_transition_id: None,
            resolved_approve_transition_id: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.matched_configuration.is_some()
    }

    /// Transition id the action would invoke, or `None` when the UI should not offer it.
    pub fn transition_for(&self, action: GateAction) -> Option<&str> {
        match action {
            GateAction::Approve => self.resolved_approve_transition_id.as_deref(),
            GateAction::Deny => self.resolved_deny_transition_id.as_deref(),
        }
    }
}

/// Entry point of the gate: visibility, status resolution and guarded execution.
pub struct GateService {
    visibility: VisibilityResolver,
    executor: TransitionExecutor,
    tracker: Arc<dyn TrackerClient>,
}

impl GateService {
    pub fn new(repository: Arc<ConfigurationRepository>, tracker: Arc<dyn TrackerClient>) -> Self {
        Self {
            visibility: VisibilityResolver::new(repository),
            executor: TransitionExecutor::new(tracker.clone()),
            tracker,
        }
    }

    /// Returns the configuration that applies to a project and issue type, if any.
    pub async fn visible_configuration(
        &self,
        project_id: &str,
        issue_type_id: &str,
    ) -> GateResult<Option<Configuration>> {
        self.visibility.resolve(project_id, issue_type_id).await
    }

    /// Lists the tracker projects an administrator can bind a configuration to.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> GateResult<Vec<Project>> {
        self.tracker.list_projects().await.map_err(|e| {
            warn!(error = %e, "Failed to list projects");
            GateError::remote_query(&e)
        })
    }

    /// Lists the issue types of a tracker project.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Validation` for a malformed project id, without calling the tracker.
    #[instrument(skip(self))]
    pub async fn list_issue_types(&self, project_id: &str) -> GateResult<Vec<IssueType>> {
        validate_project_id(project_id)?;

        self.tracker.list_issue_types(project_id).await.map_err(|e| {
            warn!(error = %e, "Failed to list issue types");
            GateError::remote_query(&e)
        })
    }

    /// Fetches the issue's current status from the tracker.
    ///
    /// # Errors
    ///
    /// Returns `GateError::RemoteQuery` if the tracker cannot be queried.
    #[instrument(skip(self, issue_key), fields(issue_key = %issue_key))]
    pub async fn current_status(&self, issue_key: &IssueKey) -> GateResult<IssueStatus> {
        self.tracker
            .get_issue_status(issue_key.as_str())
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch issue status");
                GateError::remote_query(&e)
            })
    }

    /// Resolves visibility, status and the transition of each action for an issue.
    ///
    /// The tracker is only queried when a configuration applies.
    #[instrument(skip(self, context), fields(issue_key = %context.issue_key, project_id = %context.project_id))]
    pub async fn resolve_context(&self, context: &IssueContext) -> GateResult<ResolvedContext> {
        let Some(configuration) = self
            .visibility
            .resolve(&context.project_id, &context.issue_type_id)
            .await?
        else {
            debug!("No configuration applies; gate hidden");
            return Ok(ResolvedContext::hidden(context));
        };

        let status = self.current_status(&context.issue_key).await?;
        let deny = StatusTransitionResolver::resolve_deny_transition(&configuration, &status.name)
            .map(str::to_string);
        let approve =
            StatusTransitionResolver::resolve_approve_transition(&configuration).map(str::to_string);

        debug!(
            configuration_id = %configuration.id,
            status = %status.name,
            deny_transition_id = deny.as_deref(),
            approve_transition_id = approve.as_deref(),
            "Gate context resolved"
        );

        Ok(ResolvedContext {
            issue_key: context.issue_key.clone(),
            project_id: context.project_id.clone(),
            issue_type_id: context.issue_type_id.clone(),
            matched_configuration: Some(configuration),
            current_status_name: Some(status.name),
            resolved_deny_transition_id: deny,
            resolved_approve_transition_id: approve,
        })
    }

    /// Runs a gate action against the issue.
    ///
    /// The context is resolved afresh, so the transition reflects the issue's status at the
    /// time of the call.
    ///
    /// # Errors
    ///
    /// * `ActionUnavailable` - the gate is hidden or the action has no transition
    /// * any error of [`Self::resolve_context`] or [`TransitionExecutor::execute`]
    #[instrument(skip(self, context, action), fields(issue_key = %context.issue_key, action = %action))]
    pub async fn trigger(
        &self,
        context: &IssueContext,
        action: GateAction,
    ) -> GateResult<TransitionReceipt> {
        let resolved = self.resolve_context(context).await?;

        let Some(transition_id) = resolved.transition_for(action) else {
            warn!(visible = resolved.is_visible(), "Gate action not available");
            return Err(GateError::ActionUnavailable {
                issue_key: context.issue_key.to_string(),
                action,
            });
        };

        let receipt = self.executor.execute(&context.issue_key, transition_id).await?;
        info!(transition_id = %receipt.transition_id, "Gate action completed");
        Ok(receipt)
    }

    /// Executes a transition chosen by the caller, after checking it is currently legal.
    pub async fn execute_transition(
        &self,
        issue_key: &IssueKey,
        transition_id: &str,
    ) -> GateResult<TransitionReceipt> {
        self.executor.execute(issue_key, transition_id).await
    }
}
