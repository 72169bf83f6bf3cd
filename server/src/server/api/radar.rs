//! Love-radar telemetry intake. Write-only audit log.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use serde_json::{Value, json};

use keepsake_db::radar::RadarLog;

use crate::app::SharedState;
use crate::server::auth::{TokenQuery, authorize};

use super::{ApiError, err_json, opt_f64, require_str};

/// POST /api/love-radar
pub async fn log_check(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, true)?;

    let target_lat = opt_f64(&body, "targetLat");
    let target_lng = opt_f64(&body, "targetLng");
    let status = require_str(&body, "status");
    let (Some(target_lat), Some(target_lng), Ok(status)) = (target_lat, target_lng, status)
    else {
        return Err(err_json(400, "targetLat, targetLng, status are required"));
    };

    let error_message = body
        .get("errorMessage")
        .and_then(Value::as_str)
        .map(str::to_string);

    state
        .db()
        .log_radar_check(&RadarLog {
            target_lat,
            target_lng,
            user_lat: opt_f64(&body, "userLat"),
            user_lng: opt_f64(&body, "userLng"),
            distance_m: opt_f64(&body, "distanceM"),
            distance_km: opt_f64(&body, "distanceKm"),
            accuracy_m: opt_f64(&body, "accuracyM"),
            status: status.to_string(),
            error_message,
        })
        .map_err(|e| err_json(500, &e.to_string()))?;

    Ok(Json(json!({ "ok": true })))
}
