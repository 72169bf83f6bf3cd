//! Stored image byte serving.

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;

use crate::app::SharedState;
use crate::server::auth::{TokenQuery, authorize};
use crate::services::pictures::{PictureError, PictureService};

use super::{ApiError, err_json};

fn file_response(path: &std::path::Path, filename: &str) -> Result<Response, ApiError> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(_) => return Err(err_json(404, "file missing")),
    };

    let mime = mime_guess::from_path(filename).first_or_octet_stream();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| err_json(500, &e.to_string()))
}

/// GET /api/files/{id}
pub async fn get_picture_file(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    authorize(&state, &headers, &query, true)?;

    let svc = PictureService::new(state.db().clone(), state.storage_dir().clone());
    match svc.picture_file(id) {
        Ok((path, picture)) => file_response(&path, &picture.filename),
        Err(PictureError::NotFound(_)) => Err(err_json(404, "not found")),
        Err(PictureError::FileMissing(_)) => Err(err_json(404, "file missing")),
        Err(e) => Err(err_json(500, &e.to_string())),
    }
}

/// GET /api/journey/files/{id}
pub async fn get_journey_file(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    authorize(&state, &headers, &query, true)?;

    let item = state
        .db()
        .get_journey_item(id)
        .map_err(|e| err_json(500, &e.to_string()))?
        .ok_or_else(|| err_json(404, "not found"))?;

    let (Some(stored_path), Some(filename)) = (item.stored_path, item.filename) else {
        return Err(err_json(404, "no file for journey item"));
    };
    file_response(std::path::Path::new(&stored_path), &filename)
}
