//! Application state wiring the manager to its infrastructure.
//!
//! The manager is generic over its transport and credential store; AppState
//! pins it to the production adapters (reqwest HTTP, OS keychain).

use std::path::PathBuf;
use std::sync::Arc;

use mnemo_core::manager::SessionManager;
use mnemo_infra::config::{AppConfig, load_config, resolve_data_dir};
use mnemo_infra::http::HttpTransport;
use mnemo_infra::keychain::KeychainCredentialStore;

/// Concrete manager type pinned to the production adapters.
pub type ConcreteManager = SessionManager<HttpTransport, KeychainCredentialStore>;

/// Shared application state for all CLI commands.
pub struct AppState {
    pub manager: Arc<ConcreteManager>,
    pub config: AppConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load configuration, build the transport, and restore any persisted
    /// session.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let transport = HttpTransport::new(config.base_url.as_str(), config.request_timeout());
        let manager = Arc::new(SessionManager::new(
            transport,
            KeychainCredentialStore::new(),
        ));
        manager.restore().await;

        Ok(Self {
            manager,
            config,
            data_dir,
        })
    }
}
