//! # Transition Gate Core
//!
//! Decides which workflow actions may be triggered on a tracker issue and executes the
//! chosen transition safely.
//!
//! ## Overview
//!
//! For an issue identified by its key, project and issue type the gate:
//! 1. finds the administrator configuration that applies ([`VisibilityResolver`]),
//! 2. maps the issue's live status to the transition of each action
//!    ([`StatusTransitionResolver`]),
//! 3. executes a transition only when the tracker currently lists it as legal
//!    ([`TransitionExecutor`]).
//!
//! [`GateService`] ties these together and is what the HTTP layer talks to.
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use gate_config::{ConfigurationRepository, InMemoryConfigurationStore};
//! use gate_core::{GateAction, GateService, IssueContext, IssueKey};
//! use tracker_client::{JiraClient, JiraClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = Arc::new(ConfigurationRepository::new(Arc::new(
//!     InMemoryConfigurationStore::new(),
//! )));
//! let tracker = Arc::new(JiraClient::new(JiraClientConfig::new(
//!     "https://example.atlassian.net",
//!     "bot@example.com",
//!     "api-token",
//! )?)?);
//!
//! let gate = GateService::new(repository, tracker);
//! let context = IssueContext::new(IssueKey::new("OPS-42")?, "10000", "10001");
//!
//! let resolved = gate.resolve_context(&context).await?;
//! if resolved.transition_for(GateAction::Deny).is_some() {
//!     let receipt = gate.trigger(&context, GateAction::Deny).await?;
//!     println!("{}", receipt.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub use errors::{GateError, GateResult};

pub mod executor;
pub use executor::{TransitionExecutor, TransitionReceipt};

pub mod issue;
pub use issue::{validate_project_id, IssueContext, IssueKey};

pub mod service;
pub use service::{GateAction, GateService, ResolvedContext};

pub mod status;
pub use status::StatusTransitionResolver;

pub mod visibility;
pub use visibility::{find_applicable, VisibilityResolver};

#[cfg(test)]
mod test_support;
