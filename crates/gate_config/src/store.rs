//! Persistence for configuration records.
//!
//! Two layers live here:
//!
//! - [`KeyValueStore`] is the raw `get(key)` / `set(key, value)` contract of the host
//!   platform's storage. The whole configuration collection is kept as one JSON array
//!   under [`CONFIGURATION_KEY`].
//! - [`ConfigurationStore`] is the keyed record store the repository works against. It
//!   exposes per-record `upsert` and `remove` while keeping a list-oriented read.
//!
//! [`KeyValueConfigurationStore`] adapts the first to the second. Its read-modify-write
//! cycle is serialised within the process; writers in other processes can still
//! overwrite each other (last write wins).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

use crate::{Configuration, ConfigurationError, ConfigurationResult};

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// Storage key holding the full configuration collection.
pub const CONFIGURATION_KEY: &str = "appConfiguration";

/// Raw key-value storage provided by the host platform.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if nothing was stored.
    async fn get(&self, key: &str) -> ConfigurationResult<Option<Value>>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: Value) -> ConfigurationResult<()>;
}

/// Keyed record store for configurations.
///
/// Implementations must preserve insertion order in [`ConfigurationStore::list`]; visibility
/// resolution picks the first matching record in that order.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Returns every stored configuration in stored order.
    async fn list(&self) -> ConfigurationResult<Vec<Configuration>>;

    /// Returns the configuration with the given id, if any.
    async fn get(&self, id: &str) -> ConfigurationResult<Option<Configuration>> {
        Ok(self.list().await?.into_iter().find(|c| c.id == id))
    }

    /// Replaces the record with the same id in place, or appends it if absent.
    async fn upsert(&self, configuration: Configuration) -> ConfigurationResult<()>;

    /// Removes every record with the given id. Returns whether anything was removed.
    async fn remove(&self, id: &str) -> ConfigurationResult<bool>;
}

/// Process-local key-value store, used in tests and when no store directory is configured.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, Value>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> ConfigurationResult<Option<Value>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> ConfigurationResult<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// Key-value store keeping one pretty-printed JSON file per key in a directory.
///
/// Writes go to a temporary file that is then renamed over the target, so readers never
/// observe a half-written file.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    directory: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `directory`. The directory is created on first write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> ConfigurationResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ConfigurationError::invalid(
                "key",
                format!("'{}' is not a valid storage key", key),
            ));
        }

        Ok(self.directory.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> ConfigurationResult<Option<Value>> {
        let path = self.path_for(key)?;

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?path, "No stored value for key");
                return Ok(None);
            }
            Err(e) => {
                error!(path = ?path, error = %e, "Failed to read stored value");
                return Err(ConfigurationError::StoreReadFailed {
                    reason: format!("{}: {}", path.display(), e),
                });
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigurationError::ParseError {
                reason: format!("{}: {}", path.display(), e),
            })
    }

    async fn set(&self, key: &str, value: Value) -> ConfigurationResult<()> {
        let path = self.path_for(key)?;
        let write_failed = |e: std::io::Error| ConfigurationError::StoreWriteFailed {
            reason: format!("{}: {}", path.display(), e),
        };

        let content =
            serde_json::to_string_pretty(&value).map_err(|e| ConfigurationError::StoreWriteFailed {
                reason: format!("Failed to serialize value for key '{}': {}", key, e),
            })?;

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(write_failed)?;

        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(write_failed)?;
        tokio::fs::rename(&temp_path, &path)
            .await
            .map_err(write_failed)?;

        debug!(path = ?path, "Stored value written");
        Ok(())
    }
}

/// Configuration store kept as a single JSON array under one key of a [`KeyValueStore`].
pub struct KeyValueConfigurationStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    write_lock: Mutex<()>,
}

impl KeyValueConfigurationStore {
    /// Creates a store using [`CONFIGURATION_KEY`].
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, CONFIGURATION_KEY)
    }

    pub fn with_key(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> ConfigurationResult<Vec<Configuration>> {
        match self.backend.get(&self.key).await? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => {
                serde_json::from_value(value).map_err(|e| ConfigurationError::ParseError {
                    reason: format!("Value under '{}' is not a configuration list: {}", self.key, e),
                })
            }
        }
    }

    async fn save(&self, configurations: &[Configuration]) -> ConfigurationResult<()> {
        let value =
            serde_json::to_value(configurations).map_err(|e| ConfigurationError::StoreWriteFailed {
                reason: format!("Failed to serialize configurations: {}", e),
            })?;
        self.backend.set(&self.key, value).await
    }
}

#[async_trait]
impl ConfigurationStore for KeyValueConfigurationStore {
    async fn list(&self) -> ConfigurationResult<Vec<Configuration>> {
        self.load().await
    }

    async fn upsert(&self, configuration: Configuration) -> ConfigurationResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut configurations = self.load().await?;
        match configurations.iter_mut().find(|c| c.id == configuration.id) {
            Some(existing) => *existing = configuration,
            None => configurations.push(configuration),
        }

        self.save(&configurations).await?;
        info!(
            key = %self.key,
            count = configurations.len(),
            "Configuration collection persisted"
        );
        Ok(())
    }

    async fn remove(&self, id: &str) -> ConfigurationResult<bool> {
        let _guard = self.write_lock.lock().await;

        let configurations = self.load().await?;
        let before = configurations.len();
        let remaining: Vec<Configuration> =
            configurations.into_iter().filter(|c| c.id != id).collect();
        let removed = remaining.len() != before;

        self.save(&remaining).await?;
        Ok(removed)
    }
}

/// Configuration store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryConfigurationStore {
    configurations: RwLock<Vec<Configuration>>,
}

impl InMemoryConfigurationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `configurations`, in order.
    pub fn with_configurations(configurations: Vec<Configuration>) -> Self {
        Self {
            configurations: RwLock::new(configurations),
        }
    }
}

#[async_trait]
impl ConfigurationStore for InMemoryConfigurationStore {
    async fn list(&self) -> ConfigurationResult<Vec<Configuration>> {
        Ok(self.configurations.read().await.clone())
    }

    async fn get(&self, id: &str) -> ConfigurationResult<Option<Configuration>> {
        Ok(self
            .configurations
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn upsert(&self, configuration: Configuration) -> ConfigurationResult<()> {
        let mut configurations = self.configurations.write().await;
        match configurations.iter_mut().find(|c| c.id == configuration.id) {
            Some(existing) => *existing = configuration,
            None => configurations.push(configuration),
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> ConfigurationResult<bool> {
        let mut configurations = self.configurations.write().await;
        let before = configurations.len();
        configurations.retain(|c| c.id != id);
        Ok(configurations.len() != before)
    }
}
