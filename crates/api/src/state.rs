use std::sync::Arc;

use pantry_db::catalog::SqliteCatalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and config are reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pantry_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: pantry_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Catalog view used by the feasibility endpoints.
    pub fn catalog(&self) -> SqliteCatalog {
        SqliteCatalog::new(self.pool.clone())
    }
}
