//! Transition Gate REST API Server
//!
//! Main binary for running the API server in production or development.
//! Settings are read from the environment; see [`gate_api::config`].

use std::env;
use std::sync::Arc;

use gate_api::{ApiServer, AppState, GateSettings, API_VERSION};
use gate_config::{
    ConfigurationRepository, ConfigurationStore, FileKeyValueStore, InMemoryConfigurationStore,
    KeyValueConfigurationStore,
};
use tracker_client::JiraClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let settings = GateSettings::from_env()?;

    let store: Arc<dyn ConfigurationStore> = match &settings.store_dir {
        Some(directory) => {
            tracing::info!(directory = %directory.display(), "Using file configuration store");
            Arc::new(KeyValueConfigurationStore::new(Arc::new(
                FileKeyValueStore::new(directory.clone()),
            )))
        }
        None => {
            tracing::warn!("GATE_STORE_DIR not set; configurations are kept in memory only");
            Arc::new(InMemoryConfigurationStore::new())
        }
    };
    let repository = Arc::new(ConfigurationRepository::new(store));
    let tracker = Arc::new(JiraClient::new(settings.jira_client_config()?)?);

    let state = AppState::new(repository, tracker);
    let server = ApiServer::new(settings.api.clone(), state);

    tracing::info!("Starting Transition Gate API server");
    tracing::info!("API version: {}", API_VERSION);
    tracing::info!("Jira site: {}", settings.jira_base_url);

    // Start server with graceful shutdown
    server.serve().await
}
