//! CRUD over configuration records.
//!
//! The repository owns identifier generation, field validation and the scope uniqueness
//! rule: no two configurations may cover the same project and issue type. Mutations made
//! through one repository are serialised, so the overlap check and the write it guards
//! cannot interleave with another mutation from the same process.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::store::ConfigurationStore;
use crate::validator::{find_overlap, validate_fields};
use crate::{Configuration, ConfigurationError, ConfigurationFields, ConfigurationResult};

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// Create, update, list and delete configurations keyed by their opaque id.
pub struct ConfigurationRepository {
    store: Arc<dyn ConfigurationStore>,
    write_lock: Mutex<()>,
}

impl ConfigurationRepository {
    pub fn new(store: Arc<dyn ConfigurationStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Stores a new configuration under a freshly generated id.
    ///
    /// # Errors
    ///
    /// * `InvalidConfiguration` - the fields do not describe a meaningful rule
    /// * `OverlappingScope` - another configuration already covers one of the issue types
    /// * store errors if the write fails
    #[instrument(skip(self, input), fields(project_id = %input.project_id))]
    pub async fn create(&self, input: ConfigurationFields) -> ConfigurationResult<Configuration> {
        validate_fields(&input)?;

        let _guard = self.write_lock.lock().await;
        let existing = self.store.list().await?;
        ensure_no_overlap(&existing, &input, None)?;

        let configuration = Configuration::new(Uuid::new_v4().to_string(), input);
        self.store.upsert(configuration.clone()).await?;

        info!(
            configuration_id = %configuration.id,
            project_id = %configuration.project_id(),
            "Configuration created"
        );
        Ok(configuration)
    }

    /// Overwrites every field of an existing configuration. The id is kept.
    ///
    /// # Errors
    ///
    /// * `NotFound` - no configuration has this id; nothing is written
    /// * `InvalidConfiguration`, `OverlappingScope` - as for [`Self::create`]
    #[instrument(skip(self, input), fields(configuration_id = %id))]
    pub async fn update(
        &self,
        id: &str,
        input: ConfigurationFields,
    ) -> ConfigurationResult<Configuration> {
        validate_fields(&input)?;

        let _guard = self.write_lock.lock().await;
        let existing = self.store.list().await?;
        if !existing.iter().any(|c| c.id == id) {
            warn!(configuration_id = id, "Update requested for unknown configuration");
            return Err(ConfigurationError::NotFound { id: id.to_string() });
        }
        ensure_no_overlap(&existing, &input, Some(id))?;

        let configuration = Configuration::new(id, input);
        self.store.upsert(configuration.clone()).await?;

        info!(configuration_id = id, "Configuration updated");
        Ok(configuration)
    }

    /// Removes the configuration with this id. Deleting an unknown id succeeds.
    #[instrument(skip(self), fields(configuration_id = %id))]
    pub async fn delete(&self, id: &str) -> ConfigurationResult<()> {
        let _guard = self.write_lock.lock().await;
        let removed = self.store.remove(id).await?;

        info!(configuration_id = id, removed, "Configuration delete processed");
        Ok(())
    }

    /// Returns every configuration in stored order.
    pub async fn list(&self) -> ConfigurationResult<Vec<Configuration>> {
        self.store.list().await
    }

    /// Returns one configuration by id.
    pub async fn get(&self, id: &str) -> ConfigurationResult<Option<Configuration>> {
        self.store.get(id).await
    }
}

fn ensure_no_overlap(
    existing: &[Configuration],
    fields: &ConfigurationFields,
    ignore_id: Option<&str>,
) -> ConfigurationResult<()> {
    match find_overlap(existing, fields, ignore_id) {
        Some((conflict, shared)) => {
            warn!(
                existing_id = %conflict.id,
                project_id = %fields.project_id,
                shared_issue_types = ?shared,
                "Rejected configuration with overlapping scope"
            );
            Err(ConfigurationError::OverlappingScope {
                existing_id: conflict.id.clone(),
                project_id: fields.project_id.clone(),
                issue_type_ids: shared,
            })
        }
        None => Ok(()),
    }
}
