//! Crate for interacting with the remote issue tracker.
//!
//! This crate defines the [`TrackerClient`] contract consumed by the transition gate and
//! provides [`JiraClient`], an implementation over the Jira Cloud REST API (v3) that
//! authenticates with an account email and API token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{IssueStatus, IssueType, Project, StatusCategory, Transition};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Number of projects requested per page when listing projects.
const PROJECT_PAGE_SIZE: u64 = 50;

/// Path segments of the REST API root below the site's base URL.
const API_ROOT: [&str; 3] = ["rest", "api", "3"];

/// Longest excerpt of a tracker error body kept in an [`Error`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Operations the transition gate needs from the remote issue tracker.
///
/// All calls are remote and may fail with a network or authorization error.
/// Implementations must not retry; the caller decides whether to try again.
#[async_trait]
pub trait TrackerClient: Send + Sync {
    /// Lists every project visible to the configured account.
    async fn list_projects(&self) -> Result<Vec<Project>, Error>;

    /// Lists the issue types available in a project.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the project does not exist.
    async fn list_issue_types(&self, project_id: &str) -> Result<Vec<IssueType>, Error>;

    /// Fetches the current workflow status of an issue.
    async fn get_issue_status(&self, issue_key: &str) -> Result<IssueStatus, Error>;

    /// Fetches the transitions the tracker currently considers legal for an issue.
    ///
    /// The result reflects live workflow state and may differ between calls.
    async fn list_legal_transitions(&self, issue_key: &str) -> Result<Vec<Transition>, Error>;

    /// Executes a transition on an issue.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnexpectedStatus` carrying the tracker's status code when the
    /// transition is rejected.
    async fn execute_transition(&self, issue_key: &str, transition_id: &str)
        -> Result<(), Error>;
}

/// Connection settings for a Jira Cloud site.
#[derive(Debug, Clone)]
pub struct JiraClientConfig {
    /// Base URL of the site, e.g. `https://example.atlassian.net`
    pub base_url: Url,
    /// Account email used for basic authentication
    pub email: String,
    /// API token paired with `email`
    pub api_token: SecretString,
    /// Per-request timeout
    pub timeout: Duration,
}

impl JiraClientConfig {
    /// Creates a configuration with the default 30 second timeout.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if `base_url` is not an absolute URL.
    pub fn new(
        base_url: &str,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url).map_err(|e| {
            Error::InvalidConfiguration(format!("Invalid base URL '{}': {}", base_url, e))
        })?;

        Ok(Self {
            base_url,
            email: email.into(),
            api_token: SecretString::from(api_token.into()),
            timeout: Duration::from_secs(30),
        })
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A client for the Jira Cloud REST API.
#[derive(Debug, Clone)]
pub struct JiraClient {
    client: Client,
    config: JiraClientConfig,
}

impl JiraClient {
    /// Creates a new `JiraClient`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if the underlying HTTP client cannot be built.
    pub fn new(config: JiraClientConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                Error::InvalidConfiguration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Builds the URL of a REST resource. Every segment is percent-encoded on its own,
    /// so ids supplied by callers cannot leave the resource they name.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        if let Some(segment) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(Error::InvalidPathSegment(segment.to_string()));
        }

        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::InvalidConfiguration(format!(
                    "Base URL '{}' cannot carry a path",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(API_ROOT)
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!(url = %url, "Sending GET request to issue tracker");

        let response = self
            .client
            .get(url.clone())
            .basic_auth(&self.config.email, Some(self.config.api_token.expose_secret()))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Request to issue tracker failed");
                Error::Transport(e)
            })?;

        read_json(response).await
    }
}

#[async_trait]
impl TrackerClient for JiraClient {
    #[instrument(skip(self))]
    async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        let mut projects = Vec::new();
        let mut start_at = 0;

        loop {
            let mut url = self.endpoint(&["project", "search"])?;
            url.query_pairs_mut()
                .append_pair("startAt", &start_at.to_string())
                .append_pair("maxResults", &PROJECT_PAGE_SIZE.to_string());
            let page: models::ProjectSearchPage = self.get_json(url).await?;
            let page_len = page.values.len() as u64;
            projects.extend(page.values);

            if page.is_last || page_len == 0 {
                break;
            }

            let page_size = if page.max_results > 0 {
                page.max_results
            } else {
                page_len
            };
            start_at = page.start_at + page_size;
        }

        info!(count = projects.len(), "Retrieved projects from issue tracker");
        Ok(projects)
    }

    #[instrument(skip(self), fields(project_id = %project_id))]
    async fn list_issue_types(&self, project_id: &str) -> Result<Vec<IssueType>, Error> {
        let url = self.endpoint(&["project", project_id])?;
        let details: models::ProjectDetails = self.get_json(url).await?;

        info!(
            project_id = project_id,
            count = details.issue_types.len(),
            "Retrieved issue types for project"
        );
        Ok(details.issue_types)
    }

    #[instrument(skip(self), fields(issue_key = %issue_key))]
    async fn get_issue_status(&self, issue_key: &str) -> Result<IssueStatus, Error> {
        let mut url = self.endpoint(&["issue", issue_key])?;
        url.query_pairs_mut().append_pair("fields", "status");
        let issue: models::IssueDetails = self.get_json(url).await?;

        debug!(
            issue_key = issue_key,
            status = issue.fields.status.name,
            "Retrieved issue status"
        );
        Ok(issue.fields.status)
    }

    #[instrument(skip(self), fields(issue_key = %issue_key))]
    async fn list_legal_transitions(&self, issue_key: &str) -> Result<Vec<Transition>, Error> {
        let url = self.endpoint(&["issue", issue_key, "transitions"])?;
        let list: models::TransitionList = self.get_json(url).await?;

        debug!(
            issue_key = issue_key,
            count = list.transitions.len(),
            "Retrieved legal transitions"
        );
        Ok(list.transitions)
    }

    #[instrument(skip(self), fields(issue_key = %issue_key, transition_id = %transition_id))]
    async fn execute_transition(
        &self,
        issue_key: &str,
        transition_id: &str,
    ) -> Result<(), Error> {
        let url = self.endpoint(&["issue", issue_key, "transitions"])?;
        let payload = models::TransitionRequest {
            transition: models::TransitionReference { id: transition_id },
        };

        let response = self
            .client
            .post(url)
            .basic_auth(&self.config.email, Some(self.config.api_token.expose_secret()))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(
                    issue_key = issue_key,
                    transition_id = transition_id,
                    error = %e,
                    "Transition request to issue tracker failed"
                );
                Error::Transport(e)
            })?;

        let status = response.status();
        if status.is_success() {
            info!(
                issue_key = issue_key,
                transition_id = transition_id,
                "Transition executed"
            );
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            issue_key = issue_key,
            transition_id = transition_id,
            status = status.as_u16(),
            "Issue tracker rejected the transition"
        );
        Err(status_error(status, body))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!(
            status = status.as_u16(),
            "Issue tracker returned an error status"
        );
        return Err(status_error(status, body));
    }

    serde_json::from_str(&body).map_err(|e| {
        error!(error = %e, "Failed to parse issue tracker response");
        Error::Deserialization(e)
    })
}

fn status_error(status: StatusCode, body: String) -> Error {
    let body = excerpt(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::AuthError(body),
        StatusCode::NOT_FOUND => Error::NotFound,
        _ => Error::UnexpectedStatus {
            status: status.as_u16(),
            body,
        },
    }
}

/// Shortens a tracker error body so large pages do not travel inside errors.
fn excerpt(body: String) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body;
    }

    let mut short: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    short.push_str("...");
    short
}
