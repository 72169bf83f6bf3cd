use std::path::PathBuf;
use std::sync::Arc;

use keepsake_db::Database;

use crate::config::AppConfig;

/// Application shared state handed to every axum handler.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    db: Database,
    data_dir: PathBuf,
}

impl SharedState {
    /// Create shared state from an already-opened database and loaded config.
    pub fn new(db: Database, config: AppConfig, data_dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                db,
                data_dir,
            }),
        }
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn storage_dir(&self) -> &PathBuf {
        &self.inner.config.storage_dir
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.inner.data_dir
    }
}
