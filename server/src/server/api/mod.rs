//! REST API handlers grouped by domain.

pub mod admins;
pub mod auth;
pub mod files;
pub mod gacha_items;
pub mod gacha_rarity;
pub mod gacha_state;
pub mod journey;
pub mod pictures;
pub mod radar;
pub mod site;

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// Error half of every handler result: status code plus a JSON body.
pub type ApiError = (StatusCode, Json<Value>);

/// Standard error response.
pub fn err_json(status: u16, message: &str) -> ApiError {
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "error": message })),
    )
}

/// Decorate a relative file URL with the shared public token so plain
/// `<img>` tags can fetch it.
pub fn with_token(url: String, public_token: &str) -> String {
    if public_token.is_empty() {
        return url;
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}token={public_token}")
}

/// A required string field: present, trimmed, non-empty.
pub fn require_str<'a>(body: &'a Value, key: &'a str) -> Result<&'a str, ApiError> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| err_json(400, &format!("{key} is required")))
}

/// An optional integer field; accepts numbers and numeric strings.
pub fn opt_i64(body: &Value, key: &str) -> Option<i64> {
    match body.get(key) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// An optional float field; accepts numbers and numeric strings.
pub fn opt_f64(body: &Value, key: &str) -> Option<f64> {
    match body.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Parse the `?id=` query parameter used by the delete endpoints.
pub fn parse_id_param(id: Option<&str>) -> Result<i64, ApiError> {
    let raw = id.ok_or_else(|| err_json(400, "id is required"))?;
    raw.trim()
        .parse()
        .map_err(|_| err_json(400, "invalid id"))
}

/// Query shape shared by the `DELETE ...?id=` endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
    pub token: Option<String>,
}

impl DeleteQuery {
    pub fn token_query(&self) -> crate::server::auth::TokenQuery {
        crate::server::auth::TokenQuery {
            token: self.token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_token_appends_query() {
        assert_eq!(with_token("/api/files/1".into(), "tok"), "/api/files/1?token=tok");
        assert_eq!(
            with_token("/api/files/1?x=1".into(), "tok"),
            "/api/files/1?x=1&token=tok"
        );
        assert_eq!(with_token("/api/files/1".into(), ""), "/api/files/1");
    }

    #[test]
    fn require_str_trims_and_rejects_empty() {
        let body = json!({ "title": "  hi  ", "empty": "   " });
        assert_eq!(require_str(&body, "title").unwrap(), "hi");
        assert!(require_str(&body, "empty").is_err());
        assert!(require_str(&body, "missing").is_err());
    }

    #[test]
    fn opt_i64_accepts_numbers_and_strings() {
        let body = json!({ "a": 7, "b": "12", "c": "x", "d": 1.5 });
        assert_eq!(opt_i64(&body, "a"), Some(7));
        assert_eq!(opt_i64(&body, "b"), Some(12));
        assert_eq!(opt_i64(&body, "c"), None);
        assert_eq!(opt_i64(&body, "d"), None);
        assert_eq!(opt_i64(&body, "missing"), None);
    }

    #[test]
    fn parse_id_param_validates() {
        assert_eq!(parse_id_param(Some("42")).unwrap(), 42);
        assert!(parse_id_param(Some("abc")).is_err());
        assert!(parse_id_param(None).is_err());
    }
}
