//! Application state management

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::session::SessionManager;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    db: SqlitePool,
    sessions: SessionManager,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config, db: SqlitePool, sessions: SessionManager) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                sessions,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the database pool
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    /// Get the session registry
    pub fn sessions(&self) -> &SessionManager {
        &self.inner.sessions
    }
}
