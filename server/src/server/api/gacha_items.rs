//! Gacha collectible item management API.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use serde_json::{Value, json};

use keepsake_db::rarity::Rarity;

use crate::app::SharedState;
use crate::server::auth::{TokenQuery, authorize};

use super::{ApiError, DeleteQuery, err_json, opt_i64, parse_id_param, require_str};

/// GET /api/gacha-items
pub async fn list_items(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, true)?;

    let items = state
        .db()
        .get_all_gacha_items()
        .map_err(|e| err_json(500, &format!("failed to list gacha items: {e}")))?;
    Ok(Json(json!({ "items": items })))
}

/// POST /api/gacha-items – create, or update when `id` is present.
pub async fn upsert_item(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, false)?;

    let rarity = require_str(&body, "rarity")
        .map_err(|_| err_json(400, "rarity, title, caption are required"))?;
    let title = require_str(&body, "title")
        .map_err(|_| err_json(400, "rarity, title, caption are required"))?;
    let caption = require_str(&body, "caption")
        .map_err(|_| err_json(400, "rarity, title, caption are required"))?;
    let rarity = Rarity::parse(rarity).ok_or_else(|| err_json(400, "invalid rarity"))?;

    if let Some(id) = opt_i64(&body, "id") {
        let updated = state
            .db()
            .update_gacha_item(id, rarity, title, caption)
            .map_err(|e| err_json(500, &format!("failed to update gacha item: {e}")))?;
        if !updated {
            return Err(err_json(404, "not found"));
        }
        return Ok(Json(json!({ "ok": true, "id": id })));
    }

    let id = state
        .db()
        .create_gacha_item(rarity, title, caption)
        .map_err(|e| err_json(500, &format!("failed to create gacha item: {e}")))?;
    Ok(Json(json!({ "ok": true, "id": id })))
}

/// DELETE /api/gacha-items?id=
///
/// Pictures pointing at the item are detached, not deleted.
pub async fn delete_item(
    State(state): State<SharedState>,
    Query(query): Query<DeleteQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query.token_query(), false)?;

    let id = parse_id_param(query.id.as_deref())?;
    state
        .db()
        .delete_gacha_item(id)
        .map_err(|e| err_json(500, &format!("failed to delete gacha item: {e}")))?;
    Ok(Json(json!({ "ok": true })))
}
