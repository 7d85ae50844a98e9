//! Validate-then-execute for tracker transitions.
//!
//! A transition is only executed after the tracker has listed it as legal for the issue
//! in a fresh query. The two calls are not atomic: the workflow may change between the
//! listing and the execution, in which case the tracker rejects the execution and the
//! failure surfaces as [`GateError::RemoteExecution`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};
use tracker_client::TrackerClient;

use crate::{GateError, GateResult, IssueKey};

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;

/// Outcome of a successfully executed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionReceipt {
    pub issue_key: String,
    pub transition_id: String,
    pub message: String,
}

/// Executes transitions the tracker currently allows.
pub struct TransitionExecutor {
    tracker: Arc<dyn TrackerClient>,
}

impl TransitionExecutor {
    pub fn new(tracker: Arc<dyn TrackerClient>) -> Self {
        Self { tracker }
    }

    /// Executes `transition_id` on the issue if it is currently legal.
    ///
    /// # Errors
    ///
    /// * `RemoteQuery` - the legal transitions could not be fetched; nothing was executed
    /// * `IllegalTransition` - the id is not in the legal set; nothing was executed
    /// * `RemoteExecution` - the tracker failed the execution; not retried
    #[instrument(skip(self, issue_key), fields(issue_key = %issue_key))]
    pub async fn execute(
        &self,
        issue_key: &IssueKey,
        transition_id: &str,
    ) -> GateResult<TransitionReceipt> {
        let legal = self
            .tracker
            .list_legal_transitions(issue_key.as_str())
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch legal transitions");
                GateError::remote_query(&e)
            })?;

        if !legal.iter().any(|t| t.id == transition_id) {
            let available: Vec<&str> = legal.iter().map(|t| t.id.as_str()).collect();
            warn!(?available, "Rejected transition not currently legal");
            return Err(GateError::IllegalTransition {
                issue_key: issue_key.to_string(),
                transition_id: transition_id.to_string(),
            });
        }

        self.tracker
            .execute_transition(issue_key.as_str(), transition_id)
            .await
            .map_err(|e| {
                warn!(error = %e, status = ?e.status_code(), "Tracker failed the transition");
                GateError::RemoteExecution {
                    issue_key: issue_key.to_string(),
                    transition_id: transition_id.to_string(),
                    status: e.status_code(),
                    reason: e.to_string(),
                }
            })?;

        info!("Transition executed");
        Ok(TransitionReceipt {
            issue_key: issue_key.to_string(),
            transition_id: transition_id.to_string(),
            message: format!("Transition for {} was executed successfully.", issue_key),
        })
    }
}
