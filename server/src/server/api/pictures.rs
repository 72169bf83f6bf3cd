//! Picture management API: listing, upload, deletion, and gacha assignment.

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::HeaderMap;
use serde::Deserialize;
use serde_json::{Value, json};

use keepsake_db::pictures::{Picture, PictureSource};
use keepsake_db::rarity::Rarity;

use crate::app::SharedState;
use crate::server::auth::{TokenQuery, authorize};
use crate::services::pictures::PictureService;

use super::{ApiError, DeleteQuery, err_json, opt_i64, parse_id_param, with_token};

const LIST_LIMIT: u32 = 200;
const LIST_LIMIT_FILTERED: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "gachaId")]
    pub gacha_id: Option<String>,
    pub token: Option<String>,
}

fn picture_json(picture: &Picture, public_token: &str) -> Value {
    json!({
        "id": picture.id,
        "originalName": picture.original_name,
        "createdAt": picture.created_at,
        "gachaId": picture.gacha_id,
        "source": picture.source,
        "url": with_token(format!("/api/files/{}", picture.id), public_token),
    })
}

/// GET /api/pictures[?gachaId=]
pub async fn list_pictures(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let token_query = TokenQuery {
        token: query.token.clone(),
    };
    authorize(&state, &headers, &token_query, true)?;

    let gacha_id = query
        .gacha_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok());

    let pictures = match gacha_id {
        Some(id) => state.db().get_pictures_by_gacha(id, LIST_LIMIT_FILTERED),
        None => state.db().get_recent_pictures(LIST_LIMIT),
    }
    .map_err(|e| err_json(500, &format!("failed to list pictures: {e}")))?;

    let public_token = &state.config().public_token;
    let items: Vec<Value> = pictures
        .iter()
        .map(|picture| picture_json(picture, public_token))
        .collect();
    Ok(Json(json!({ "items": items })))
}

/// POST /api/pictures – multipart upload.
///
/// Fields: `file` (or `image`) with the bytes, optional `gachaId`, optional
/// `source` (`auto-capture` | `manual-upload`, default manual).
pub async fn upload_picture(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, true)?;

    let mut file_data: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut gacha_id: Option<i64> = None;
    let mut source = PictureSource::ManualUpload;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" | "image" => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let mime = field.content_type().map(|m| m.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| err_json(400, &e.to_string()))?;
                file_data = Some((filename, mime, data.to_vec()));
            }
            "gachaId" => {
                let text = field.text().await.unwrap_or_default();
                gacha_id = text.trim().parse().ok();
            }
            "source" => {
                let text = field.text().await.unwrap_or_default();
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    source = PictureSource::parse(trimmed)
                        .ok_or_else(|| err_json(400, "invalid source"))?;
                }
            }
            _ => {}
        }
    }

    let (filename, mime, data) = file_data.ok_or_else(|| err_json(400, "file is required"))?;

    let svc = PictureService::new(state.db().clone(), state.storage_dir().clone());
    let id = svc
        .save_picture(&filename, mime.as_deref(), &data, source, gacha_id)
        .map_err(|e| err_json(500, &e.to_string()))?;

    Ok(Json(json!({
        "id": id,
        "url": with_token(format!("/api/files/{id}"), &state.config().public_token),
    })))
}

/// DELETE /api/pictures?id=
pub async fn delete_picture(
    State(state): State<SharedState>,
    Query(query): Query<DeleteQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query.token_query(), false)?;

    let id = parse_id_param(query.id.as_deref())?;
    let svc = PictureService::new(state.db().clone(), state.storage_dir().clone());
    match svc.delete_picture(id) {
        Ok(()) => Ok(Json(json!({ "ok": true }))),
        Err(crate::services::pictures::PictureError::NotFound(_)) => {
            Err(err_json(404, "not found"))
        }
        Err(e) => Err(err_json(500, &e.to_string())),
    }
}

/// POST /api/pictures/assign
///
/// `{id, gachaId}` assigns directly; `{id, rarity}` picks the least-loaded
/// item of that rarity.
pub async fn assign_picture(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &query, false)?;

    let id = opt_i64(&body, "id").ok_or_else(|| err_json(400, "invalid id"))?;

    if let Some(gacha_id) = opt_i64(&body, "gachaId") {
        let assigned = state
            .db()
            .assign_picture(id, Some(gacha_id))
            .map_err(|e| err_json(500, &format!("failed to assign picture: {e}")))?;
        if !assigned {
            return Err(err_json(404, "picture not found"));
        }
        return Ok(Json(json!({ "ok": true, "gachaId": gacha_id })));
    }

    let rarity = body
        .get("rarity")
        .and_then(Value::as_str)
        .and_then(Rarity::parse)
        .ok_or_else(|| err_json(400, "invalid rarity"))?;

    let gacha_id = state
        .db()
        .least_loaded_gacha_item(rarity)
        .map_err(|e| err_json(500, &format!("failed to pick gacha item: {e}")))?
        .ok_or_else(|| err_json(400, "no gacha items for rarity"))?;

    let assigned = state
        .db()
        .assign_picture(id, Some(gacha_id))
        .map_err(|e| err_json(500, &format!("failed to assign picture: {e}")))?;
    if !assigned {
        return Err(err_json(404, "picture not found"));
    }

    Ok(Json(json!({ "ok": true, "gachaId": gacha_id })))
}
