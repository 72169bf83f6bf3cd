//! Runtime application configuration loaded from the environment.

use std::path::{Path, PathBuf};

/// Token literal used when no shared public token is configured. Operators
/// are expected to override it in production.
pub const DEFAULT_PUBLIC_TOKEN: &str = "change-me";

const DEFAULT_SERVER_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    /// Root directory for uploaded image files.
    pub storage_dir: PathBuf,
    /// Shared capability token granting public read/limited-write access.
    pub public_token: String,
}

impl AppConfig {
    /// Load configuration from environment variables, with defaults rooted
    /// at the given data directory.
    pub fn load(data_dir: &Path) -> Self {
        let server_port = env_nonempty("SERVER_PORT")
            .map(|v| parse_u16(&v, DEFAULT_SERVER_PORT))
            .unwrap_or(DEFAULT_SERVER_PORT);

        let storage_dir = env_nonempty("STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("images"));

        let public_token =
            env_nonempty("API_PUBLIC_TOKEN").unwrap_or_else(|| DEFAULT_PUBLIC_TOKEN.to_string());

        Self {
            server_port,
            storage_dir,
            public_token,
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_u16(s: &str, default: u16) -> u16 {
    s.parse().unwrap_or(default)
}
