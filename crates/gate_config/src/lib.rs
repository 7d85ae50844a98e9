//! Configuration management for the transition gate.
//!
//! Administrators author [`Configuration`] records that bind a tracker project and a set
//! of issue types to the transitions the gate's actions invoke. This crate provides:
//!
//! - the record types ([`Configuration`], [`ConfigurationFields`], [`StatusTransition`]),
//! - persistence behind the [`KeyValueStore`] and [`ConfigurationStore`] traits,
//! - the [`ConfigurationRepository`] that validates and stores records.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use gate_config::{
//!     ConfigurationFields, ConfigurationRepository, InMemoryConfigurationStore, StatusTransition,
//! };
//!
//! # async fn example() -> Result<(), gate_config::ConfigurationError> {
//! let repository = ConfigurationRepository::new(Arc::new(InMemoryConfigurationStore::new()));
//!
//! let created = repository
//!     .create(ConfigurationFields {
//!         configuration_name: "Access requests".to_string(),
//!         project_id: "10000".to_string(),
//!         issue_type_ids: vec!["10001".to_string()],
//!         statuses_configuration: vec![StatusTransition::new("Review", "11")],
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! assert_eq!(repository.list().await?.len(), 1);
//! repository.delete(&created.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod configuration;
pub use configuration::{Configuration, ConfigurationFields, StatusTransition};

pub mod errors;
pub use errors::{ConfigurationError, ConfigurationResult};

pub mod repository;
pub use repository::ConfigurationRepository;

pub mod store;
pub use store::{
    ConfigurationStore, FileKeyValueStore, InMemoryConfigurationStore, InMemoryKeyValueStore,
    KeyValueConfigurationStore, KeyValueStore, CONFIGURATION_KEY,
};

pub mod validator;
