//! Per-admin game progress API: coin balance and collected results.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::server::auth::{TokenQuery, authorize, resolve_admin_id};

use super::{ApiError, err_json, opt_i64};

/// GET /api/gacha-state
pub async fn get_state(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let principal = authorize(&state, &headers, &query, true)?;
    let admin_id = resolve_admin_id(&state, &principal)?;

    let coins = state
        .db()
        .get_coins(admin_id)
        .map_err(|e| err_json(500, &format!("failed to read coins: {e}")))?;
    Ok(Json(json!({ "adminId": admin_id, "coins": coins })))
}

/// POST /api/gacha-state – the authoritative counter update.
///
/// Accepts `{delta}` for a relative adjustment or `{coins}` for an absolute
/// set. Either way the balance is clamped at zero and the response carries
/// the post-update value for the client to reconcile against.
pub async fn update_state(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let principal = authorize(&state, &headers, &query, true)?;
    let admin_id = resolve_admin_id(&state, &principal)?;

    let coins = if let Some(delta) = opt_i64(&body, "delta") {
        state.db().adjust_coins(admin_id, delta)
    } else if let Some(coins) = opt_i64(&body, "coins") {
        state.db().set_coins(admin_id, coins)
    } else {
        return Err(err_json(400, "invalid coins"));
    }
    .map_err(|e| err_json(500, &format!("failed to update coins: {e}")))?;

    Ok(Json(json!({ "ok": true, "coins": coins })))
}

/// GET /api/gacha-results
pub async fn list_results(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let principal = authorize(&state, &headers, &query, true)?;
    let admin_id = resolve_admin_id(&state, &principal)?;

    let items = state
        .db()
        .get_collected_item_ids(admin_id)
        .map_err(|e| err_json(500, &format!("failed to read results: {e}")))?;
    Ok(Json(json!({ "items": items })))
}

/// POST /api/gacha-results – idempotent unlock record.
pub async fn record_result(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let principal = authorize(&state, &headers, &query, true)?;
    let admin_id = resolve_admin_id(&state, &principal)?;

    let gacha_item_id =
        opt_i64(&body, "gachaItemId").ok_or_else(|| err_json(400, "invalid gachaItemId"))?;

    state
        .db()
        .record_gacha_result(admin_id, gacha_item_id)
        .map_err(|e| err_json(500, &format!("failed to record result: {e}")))?;
    Ok(Json(json!({ "ok": true })))
}
