//! Rarity draw-weight configuration API.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use serde_json::{Value, json};

use keepsake_db::rarity::Rarity;

use crate::app::SharedState;
use crate::server::auth::{TokenQuery, authorize};

use super::{ApiError, err_json, opt_i64};

/// GET /api/gacha-rarity
pub async fn list_weights(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, true)?;

    let rows = state
        .db()
        .get_rarity_weights()
        .map_err(|e| err_json(500, &format!("failed to read rarity weights: {e}")))?;
    Ok(Json(json!({ "items": rows })))
}

/// POST /api/gacha-rarity – upsert one tier's weight.
pub async fn set_weight(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, false)?;

    let rarity = body
        .get("rarity")
        .and_then(Value::as_str)
        .and_then(Rarity::parse)
        .ok_or_else(|| err_json(400, "invalid rarity"))?;
    let weight = opt_i64(&body, "weight")
        .filter(|w| (0..=i64::from(u32::MAX)).contains(w))
        .ok_or_else(|| err_json(400, "invalid weight"))?;

    state
        .db()
        .set_rarity_weight(rarity, weight as u32)
        .map_err(|e| err_json(500, &format!("failed to store rarity weight: {e}")))?;
    Ok(Json(json!({ "ok": true })))
}
