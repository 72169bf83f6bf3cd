//! Login endpoint: exchanges credentials for a session token.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use keepsake_db::password::verify_password;

use crate::app::SharedState;

use super::{ApiError, err_json, require_str};

/// POST /api/auth/login
pub async fn login(
    State(state): State<SharedState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let username = require_str(&body, "username")
        .map_err(|_| err_json(400, "username and password are required"))?;
    let password = body
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if password.is_empty() {
        return Err(err_json(400, "username and password are required"));
    }

    let creds = state
        .db()
        .get_admin_credentials(username)
        .map_err(|e| err_json(500, &format!("login failed: {e}")))?;

    let Some(creds) = creds else {
        return Err(err_json(401, "invalid credentials"));
    };
    if !verify_password(password, &creds.password_hash) {
        return Err(err_json(401, "invalid credentials"));
    }

    let session = state
        .db()
        .create_session(creds.id)
        .map_err(|e| err_json(500, &format!("session creation failed: {e}")))?;

    let expires_at = chrono::DateTime::from_timestamp(session.expires_at, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default();

    tracing::info!(username = %creds.username, "Admin logged in");
    Ok(Json(json!({
        "token": session.token,
        "expiresAt": expires_at,
        "username": creds.username,
    })))
}
