//! Journey gallery management API.

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::HeaderMap;
use serde_json::{Value, json};

use keepsake_db::journey::JourneyCategory;

use crate::app::SharedState;
use crate::server::auth::{TokenQuery, authorize};
use crate::services::pictures::PictureService;

use super::{ApiError, DeleteQuery, err_json, parse_id_param, with_token};

/// GET /api/journey
pub async fn list_items(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, true)?;

    let items = state
        .db()
        .get_all_journey_items()
        .map_err(|e| err_json(500, &format!("failed to list journey items: {e}")))?;

    let public_token = &state.config().public_token;
    let items: Vec<Value> = items
        .iter()
        .map(|item| {
            let url = item
                .filename
                .as_ref()
                .map(|_| with_token(format!("/api/journey/files/{}", item.id), public_token));
            json!({
                "id": item.id,
                "category": item.category,
                "title": item.title,
                "caption": item.caption,
                "url": url,
            })
        })
        .collect();
    Ok(Json(json!({ "items": items })))
}

/// POST /api/journey – multipart create-or-update.
///
/// Text fields: `title`, `caption`, `category`, optional `id`. An optional
/// `file` field replaces the stored image; omitting it keeps the old one.
pub async fn upsert_item(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, false)?;

    let mut title = String::new();
    let mut caption = String::new();
    let mut category = String::new();
    let mut id_raw = String::new();
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => title = field.text().await.unwrap_or_default(),
            "caption" => caption = field.text().await.unwrap_or_default(),
            "category" => category = field.text().await.unwrap_or_default(),
            "id" => id_raw = field.text().await.unwrap_or_default(),
            "file" => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| err_json(400, &e.to_string()))?;
                file_data = Some((filename, data.to_vec()));
            }
            _ => {}
        }
    }

    let title = title.trim();
    let caption = caption.trim();
    let category = category.trim();
    if title.is_empty() || caption.is_empty() || category.is_empty() {
        return Err(err_json(400, "title, caption, category are required"));
    }
    let category =
        JourneyCategory::parse(category).ok_or_else(|| err_json(400, "invalid category"))?;

    let id = match id_raw.trim() {
        "" => None,
        raw => Some(raw.parse::<i64>().map_err(|_| err_json(400, "invalid id"))?),
    };

    let stored = match file_data {
        Some((filename, data)) => {
            let svc = PictureService::new(state.db().clone(), state.storage_dir().clone());
            let (filename, stored_path) = svc
                .save_journey_file(&filename, &data)
                .map_err(|e| err_json(500, &e.to_string()))?;
            Some((filename, stored_path))
        }
        None => None,
    };
    let filename = stored.as_ref().map(|(name, _)| name.as_str());
    let stored_path = stored.as_ref().map(|(_, path)| path.as_str());

    if let Some(id) = id {
        let updated = state
            .db()
            .update_journey_item(id, category, title, caption, filename, stored_path)
            .map_err(|e| err_json(500, &format!("failed to update journey item: {e}")))?;
        if !updated {
            return Err(err_json(404, "not found"));
        }
        return Ok(Json(json!({ "ok": true, "id": id })));
    }

    let id = state
        .db()
        .create_journey_item(category, title, caption, filename, stored_path)
        .map_err(|e| err_json(500, &format!("failed to create journey item: {e}")))?;
    Ok(Json(json!({ "ok": true, "id": id })))
}

/// DELETE /api/journey?id=
pub async fn delete_item(
    State(state): State<SharedState>,
    Query(query): Query<DeleteQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query.token_query(), false)?;

    let id = parse_id_param(query.id.as_deref())?;
    state
        .db()
        .delete_journey_item(id)
        .map_err(|e| err_json(500, &format!("failed to delete journey item: {e}")))?;
    Ok(Json(json!({ "ok": true })))
}
