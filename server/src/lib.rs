//! Keepsake backend: shared state, configuration, and the HTTP surface.

pub mod app;
pub mod config;
pub mod server;
pub mod services;

use std::path::PathBuf;

use keepsake_db::Database;

use config::AppConfig;

/// Determine the data directory for the application.
/// Priority: KEEPSAKE_DATA_DIR env var > ~/.keepsake
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("KEEPSAKE_DATA_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".keepsake")
}

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Open the database, load config, and make sure the storage root exists.
pub fn init_foundation() -> Result<(Database, AppConfig, PathBuf), anyhow::Error> {
    load_dotenv();

    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;
    let db_path = dir.join("keepsake.db");

    tracing::info!("Opening database at {}", db_path.display());
    let db = Database::open(&db_path)?;

    let config = AppConfig::load(&dir);
    std::fs::create_dir_all(&config.storage_dir)?;

    tracing::info!(
        port = config.server_port,
        storage = %config.storage_dir.display(),
        "Configuration loaded"
    );
    Ok((db, config, dir))
}
