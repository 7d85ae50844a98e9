//! Settings loaded from the environment at startup.
//!
//! # Environment Variables
//!
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `API_PORT`: Port to listen on (default: 8080)
//! - `JIRA_BASE_URL`: Base URL of the Jira site (required)
//! - `JIRA_EMAIL`: Account email used for basic authentication (required)
//! - `JIRA_API_TOKEN`: API token for that account (required)
//! - `JIRA_TIMEOUT_SECS`: Per-request timeout towards Jira (default: 30)
//! - `GATE_STORE_DIR`: Directory for the configuration store. Configurations are kept in
//!   memory when unset.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracker_client::JiraClientConfig;

use crate::{ApiConfig, DEFAULT_PORT};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Default timeout for requests to the tracker.
pub const DEFAULT_JIRA_TIMEOUT_SECS: u64 = 30;

/// Errors raised while reading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Missing required environment variable {name}")]
    Missing { name: &'static str },

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Process settings for the API server.
#[derive(Debug, Clone)]
pub struct GateSettings {
    pub api: ApiConfig,
    pub jira_base_url: String,
    pub jira_email: String,
    pub jira_api_token: SecretString,
    pub jira_timeout: Duration,
    pub store_dir: Option<PathBuf>,
}

impl GateSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(SettingsError::Missing { name });

        let port = match optional("API_PORT") {
            Some(value) => value.parse::<u16>().map_err(|e| SettingsError::Invalid {
                name: "API_PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match optional("JIRA_TIMEOUT_SECS") {
            Some(value) => value.parse::<u64>().map_err(|e| SettingsError::Invalid {
                name: "JIRA_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_JIRA_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(SettingsError::Invalid {
                name: "JIRA_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            api: ApiConfig {
                port,
                host: optional("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            },
            jira_base_url: required("JIRA_BASE_URL")?,
            jira_email: required("JIRA_EMAIL")?,
            jira_api_token: SecretString::from(required("JIRA_API_TOKEN")?),
            jira_timeout: Duration::from_secs(timeout_secs),
            store_dir: optional("GATE_STORE_DIR").map(PathBuf::from),
        })
    }

    /// Builds the tracker client configuration from these settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Invalid` if `JIRA_BASE_URL` is not an absolute URL.
    pub fn jira_client_config(&self) -> Result<JiraClientConfig, SettingsError> {
        JiraClientConfig::new(
            &self.jira_base_url,
            self.jira_email.clone(),
            self.jira_api_token.expose_secret(),
        )
        .map(|config| config.with_timeout(self.jira_timeout))
        .map_err(|e| SettingsError::Invalid {
            name: "JIRA_BASE_URL",
            reason: e.to_string(),
        })
    }
}
