//! Test doubles shared by the API tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gate_config::{Configuration, ConfigurationRepository, InMemoryConfigurationStore};
use tracker_client::{Error, IssueStatus, IssueType, Project, TrackerClient, Transition};

use crate::AppState;

/// Tracker with one project `P1`, issues in status `Review` and transitions `11` and `61`.
///
/// Issue `GONE-1` does not exist. Executed transitions are recorded.
pub(crate) struct StubTracker {
    pub(crate) executed: Mutex<Vec<(String, String)>>,
}

impl StubTracker {
    pub(crate) fn executed(&self) -> Vec<(String, String)> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrackerClient for StubTracker {
    async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        Ok(vec![Project {
            id: "P1".to_string(),
            key: "OPS".to_string(),
            name: "Operations".to_string(),
        }])
    }

    async fn list_issue_types(&self, project_id: &str) -> Result<Vec<IssueType>, Error> {
        if project_id != "P1" {
            return Err(Error::NotFound);
        }
        Ok(vec![IssueType {
            id: "T1".to_string(),
            name: "Access request".to_string(),
            subtask: false,
        }])
    }

    async fn get_issue_status(&self, issue_key: &str) -> Result<IssueStatus, Error> {
        if issue_key == "GONE-1" {
            return Err(Error::NotFound);
        }
        Ok(IssueStatus::named("Review"))
    }

    async fn list_legal_transitions(&self, _issue_key: &str) -> Result<Vec<Transition>, Error> {
        Ok(vec![Transition::with_id("61"), Transition::with_id("11")])
    }

    async fn execute_transition(&self, issue_key: &str, transition_id: &str) -> Result<(), Error> {
        self.executed
            .lock()
            .unwrap()
            .push((issue_key.to_string(), transition_id.to_string()));
        Ok(())
    }
}

/// App state over an in-memory store preloaded with `configurations`.
pub(crate) fn test_state(configurations: Vec<Configuration>) -> (AppState, Arc<StubTracker>) {
    let tracker = Arc::new(StubTracker {
        executed: Mutex::new(Vec::new()),
    });
    let repository = Arc::new(ConfigurationRepository::new(Arc::new(
        InMemoryConfigurationStore::with_configurations(configurations),
    )));
    (AppState::new(repository, tracker.clone()), tracker)
}
