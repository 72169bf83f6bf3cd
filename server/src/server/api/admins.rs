//! Admin account management API.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use serde_json::{Value, json};

use keepsake_db::DbError;
use keepsake_db::password::hash_password;

use crate::app::SharedState;
use crate::server::auth::{TokenQuery, authorize};

use super::{ApiError, DeleteQuery, err_json, parse_id_param, require_str};

/// GET /api/admins
pub async fn list_admins(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, false)?;

    let admins = state
        .db()
        .get_all_admins()
        .map_err(|e| err_json(500, &format!("failed to list admins: {e}")))?;

    let items: Vec<Value> = admins
        .iter()
        .map(|admin| {
            json!({
                "id": admin.id,
                "username": admin.username,
                "createdAt": admin.created_at,
            })
        })
        .collect();
    Ok(Json(json!({ "items": items })))
}

/// POST /api/admins
pub async fn create_admin(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, false)?;

    let username = require_str(&body, "username")
        .map_err(|_| err_json(400, "username and password are required"))?;
    let password = body
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if password.is_empty() {
        return Err(err_json(400, "username and password are required"));
    }

    let password_hash = hash_password(password);
    let id = state
        .db()
        .create_admin(username, &password_hash)
        .map_err(|e| match e {
            DbError::InvalidData(msg) => err_json(400, &msg),
            other => err_json(500, &format!("failed to create admin: {other}")),
        })?;

    tracing::info!(username, "Admin account created");
    Ok(Json(json!({ "ok": true, "id": id })))
}

/// DELETE /api/admins?id=
pub async fn delete_admin(
    State(state): State<SharedState>,
    Query(query): Query<DeleteQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query.token_query(), false)?;

    let id = parse_id_param(query.id.as_deref())?;
    state
        .db()
        .delete_admin(id)
        .map_err(|e| err_json(500, &format!("failed to delete admin: {e}")))?;
    Ok(Json(json!({ "ok": true })))
}
