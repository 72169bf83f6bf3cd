//! Singleton content configuration API: cosmic, layout, letter.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use serde_json::{Value, json};

use keepsake_db::site_settings::{CosmicSettings, LayoutSettings, LetterSettings};

use crate::app::SharedState;
use crate::server::auth::{TokenQuery, authorize};

use super::{ApiError, err_json, opt_i64, require_str};

/// GET /api/cosmic
pub async fn get_cosmic(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, true)?;
    let item = state
        .db()
        .get_cosmic_settings()
        .map_err(|e| err_json(500, &e.to_string()))?;
    Ok(Json(json!({ "item": item })))
}

/// POST /api/cosmic
pub async fn update_cosmic(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, false)?;

    let missing = || err_json(400, "missing fields");
    let settings = CosmicSettings {
        intro_title: require_str(&body, "introTitle").map_err(|_| missing())?.into(),
        intro_subtitle: require_str(&body, "introSubtitle").map_err(|_| missing())?.into(),
        timeline_title: require_str(&body, "timelineTitle").map_err(|_| missing())?.into(),
        date1: require_str(&body, "date1").map_err(|_| missing())?.into(),
        caption1: require_str(&body, "caption1").map_err(|_| missing())?.into(),
        date2: require_str(&body, "date2").map_err(|_| missing())?.into(),
        caption2: require_str(&body, "caption2").map_err(|_| missing())?.into(),
    };

    state
        .db()
        .update_cosmic_settings(&settings)
        .map_err(|e| err_json(500, &e.to_string()))?;
    Ok(Json(json!({ "ok": true })))
}

/// GET /api/layout
pub async fn get_layout(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, true)?;
    let item = state
        .db()
        .get_layout_settings()
        .map_err(|e| err_json(500, &e.to_string()))?;
    Ok(Json(json!({ "item": item })))
}

/// POST /api/layout
pub async fn update_layout(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, false)?;

    let journey_columns =
        opt_i64(&body, "journeyColumns").ok_or_else(|| err_json(400, "invalid values"))?;
    let gacha_columns =
        opt_i64(&body, "gachaColumns").ok_or_else(|| err_json(400, "invalid values"))?;

    state
        .db()
        .update_layout_settings(&LayoutSettings {
            journey_columns,
            gacha_columns,
        })
        .map_err(|e| err_json(500, &e.to_string()))?;
    Ok(Json(json!({ "ok": true })))
}

/// GET /api/letter
pub async fn get_letter(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, true)?;
    let item = state
        .db()
        .get_letter_settings()
        .map_err(|e| err_json(500, &e.to_string()))?;
    Ok(Json(json!({ "item": item })))
}

/// POST /api/letter
pub async fn update_letter(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, false)?;

    let missing = || err_json(400, "missing fields");
    let voucher = body
        .get("voucher")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let settings = LetterSettings {
        title: require_str(&body, "title").map_err(|_| missing())?.into(),
        body1: require_str(&body, "body1").map_err(|_| missing())?.into(),
        body2: require_str(&body, "body2").map_err(|_| missing())?.into(),
        voucher,
        button_text: require_str(&body, "buttonText").map_err(|_| missing())?.into(),
        footer: require_str(&body, "footer").map_err(|_| missing())?.into(),
    };

    state
        .db()
        .update_letter_settings(&settings)
        .map_err(|e| err_json(500, &e.to_string()))?;
    Ok(Json(json!({ "ok": true })))
}
