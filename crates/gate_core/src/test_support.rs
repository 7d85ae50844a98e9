//! Test doubles shared by the gate_core unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gate_config::{
    Configuration, ConfigurationFields, ConfigurationRepository, InMemoryConfigurationStore,
    StatusTransition,
};
use tracker_client::{Error, IssueStatus, IssueType, Project, TrackerClient, Transition};

/// Tracker double with a fixed status and set of legal transitions.
///
/// Every executed transition is recorded so tests can assert on side effects.
pub(crate) struct MockTracker {
    status: Option<String>,
    legal_transitions: Vec<String>,
    fail_listing: bool,
    reject_execution_with: Option<u16>,
    executed: Mutex<Vec<(String, String)>>,
    status_calls: AtomicUsize,
    listing_calls: AtomicUsize,
}

impl MockTracker {
    pub(crate) fn new(status: &str, legal_transitions: &[&str]) -> Self {
        Self {
            status: Some(status.to_string()),
            legal_transitions: legal_transitions.iter().map(|t| t.to_string()).collect(),
            fail_listing: false,
            reject_execution_with: None,
            executed: Mutex::new(Vec::new()),
            status_calls: AtomicUsize::new(0),
            listing_calls: AtomicUsize::new(0),
        }
    }

    /// Issue lookups answer 404.
    pub(crate) fn without_issue(mut self) -> Self {
        self.status = None;
        self
    }

    pub(crate) fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub(crate) fn rejecting_execution(mut self, status: u16) -> Self {
        self.reject_execution_with = Some(status);
        self
    }

    pub(crate) fn executed(&self) -> Vec<(String, String)> {
        self.executed.lock().unwrap().clone()
    }

    pub(crate) fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackerClient for MockTracker {
    async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        Ok(vec![])
    }

    async fn list_issue_types(&self, _project_id: &str) -> Result<Vec<IssueType>, Error> {
        Ok(vec![])
    }

    async fn get_issue_status(&self, _issue_key: &str) -> Result<IssueStatus, Error> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status
            .as_deref()
            .map(IssueStatus::named)
            .ok_or(Error::NotFound)
    }

    async fn list_legal_transitions(&self, _issue_key: &str) -> Result<Vec<Transition>, Error> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(Error::UnexpectedStatus {
                status: 500,
                body: "tracker unavailable".to_string(),
            });
        }
        Ok(self
            .legal_transitions
            .iter()
            .map(Transition::with_id)
            .collect())
    }

    async fn execute_transition(&self, issue_key: &str, transition_id: &str) -> Result<(), Error> {
        assert!(
            self.legal_transitions.iter().any(|t| t == transition_id),
            "execute called with transition '{}' that was never listed as legal",
            transition_id
        );
        if let Some(status) = self.reject_execution_with {
            return Err(Error::UnexpectedStatus {
                status,
                body: "transition rejected".to_string(),
            });
        }
        self.executed
            .lock()
            .unwrap()
            .push((issue_key.to_string(), transition_id.to_string()));
        Ok(())
    }
}

/// Configuration covering `issue_types` in `project_id` with the given status mapping.
pub(crate) fn configuration(
    id: &str,
    project_id: &str,
    issue_types: &[&str],
    statuses: &[(&str, &str)],
) -> Configuration {
    Configuration::new(
        id,
        ConfigurationFields {
            configuration_name: format!("{} rule", id),
            project_id: project_id.to_string(),
            project_name: String::new(),
            issue_type_ids: issue_types.iter().map(|t| t.to_string()).collect(),
            deny_transition_id: Some("99".to_string()),
            statuses_configuration: statuses
                .iter()
                .map(|(status, transition)| StatusTransition::new(*status, *transition))
                .collect(),
            approve_transition_id: None,
        },
    )
}

/// Repository preloaded with `configurations` in the given order, bypassing validation.
pub(crate) fn repository_with(configurations: Vec<Configuration>) -> Arc<ConfigurationRepository> {
    Arc::new(ConfigurationRepository::new(Arc::new(
        InMemoryConfigurationStore::with_configurations(configurations),
    )))
}
