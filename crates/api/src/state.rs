use std::sync::Arc;

use skydrop_store::{EntityStore, ImageVault};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The in-memory entity store, created at process start and discarded
    /// at shutdown.
    pub store: Arc<EntityStore>,
    /// Blob storage for medication images.
    pub images: Arc<ImageVault>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build fresh state with empty record sets.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            store: Arc::new(EntityStore::new()),
            images: Arc::new(ImageVault::new()),
            config: Arc::new(config),
        }
    }
}
