//! HTTP client library for the keepsake backend.
//!
//! Models the browser-side orchestration as an explicit session context:
//! durable token storage, bearer headers on every call, 401 handling that
//! clears the session, a cancellable picture refresh loop, sequential bulk
//! uploads, and the interactive gacha pull flow.

pub mod feeds;
pub mod gacha;
pub mod pictures;
pub mod radar;
pub mod session;

use serde::{Deserialize, Serialize};

/// A logged-in admin session as returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub token: String,
    pub expires_at: String,
    pub username: String,
}

/// Unified error type for the keepsake-client crate.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unauthorized: session cleared, log in again")]
    Unauthorized,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No coins left")]
    NoCoins,

    #[error("No gacha items available")]
    NoItems,

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}
