use std::sync::Arc;

use ontdek_core::asset_store::AssetStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and everything else is
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ontdek_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Image store rooted at `IMAGES_DIR`.
    pub assets: Arc<AssetStore>,
}

impl AppState {
    pub fn new(pool: ontdek_db::DbPool, config: ServerConfig) -> Self {
        let assets = Arc::new(AssetStore::new(config.images_dir.clone()));
        Self {
            pool,
            config: Arc::new(config),
            assets,
        }
    }
}
