//! Per-request authorization: admin sessions and the shared public token.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use serde::Deserialize;

use keepsake_db::admins::Admin;

use crate::app::SharedState;

use super::api::{ApiError, err_json};

/// `?token=` fallback for callers that cannot set headers (image tags).
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

/// Who is making the request.
#[derive(Debug, Clone)]
pub enum Principal {
    /// A logged-in admin with a live session.
    Admin(Admin),
    /// Holder of the shared public token; capability, not identity.
    Public,
}

/// Extract the bearer token from the Authorization header, falling back to
/// the `token` query parameter.
pub fn bearer_token<'a>(headers: &'a HeaderMap, query: &'a TokenQuery) -> Option<&'a str> {
    let header_token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty());
    if header_token.is_some() {
        return header_token;
    }
    query.token.as_deref().filter(|token| !token.is_empty())
}

/// Authorize a request, denying with 401 when no acceptable token is
/// presented. `allow_public` additionally accepts the shared public token.
pub fn authorize(
    state: &SharedState,
    headers: &HeaderMap,
    query: &TokenQuery,
    allow_public: bool,
) -> Result<Principal, ApiError> {
    let Some(token) = bearer_token(headers, query) else {
        return Err(err_json(401, "unauthorized"));
    };

    if allow_public && token == state.config().public_token {
        return Ok(Principal::Public);
    }

    let admin = state
        .db()
        .get_admin_by_token(token)
        .map_err(|e| err_json(500, &format!("session lookup failed: {e}")))?;
    match admin {
        Some(admin) => Ok(Principal::Admin(admin)),
        None => Err(err_json(401, "unauthorized")),
    }
}

/// The admin a game-state request acts on. Public callers fall back to the
/// first admin: the app is a single-household deployment.
pub fn resolve_admin_id(state: &SharedState, principal: &Principal) -> Result<i64, ApiError> {
    match principal {
        Principal::Admin(admin) => Ok(admin.id),
        Principal::Public => {
            let first = state
                .db()
                .first_admin_id()
                .map_err(|e| err_json(500, &format!("admin lookup failed: {e}")))?;
            first.ok_or_else(|| err_json(401, "unauthorized"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_prefers_header() {
        let headers = headers_with_auth("Bearer abc123");
        let query = TokenQuery {
            token: Some("query-token".into()),
        };
        assert_eq!(bearer_token(&headers, &query), Some("abc123"));
    }

    #[test]
    fn bearer_token_falls_back_to_query() {
        let headers = HeaderMap::new();
        let query = TokenQuery {
            token: Some("query-token".into()),
        };
        assert_eq!(bearer_token(&headers, &query), Some("query-token"));
    }

    #[test]
    fn bearer_token_rejects_empty_values() {
        let headers = headers_with_auth("Bearer ");
        let query = TokenQuery {
            token: Some(String::new()),
        };
        assert_eq!(bearer_token(&headers, &query), None);
    }

    #[test]
    fn bearer_token_ignores_non_bearer_schemes() {
        let headers = headers_with_auth("Basic dXNlcjpwdw==");
        let query = TokenQuery::default();
        assert_eq!(bearer_token(&headers, &query), None);
    }

    #[test]
    fn bearer_token_absent() {
        let headers = HeaderMap::new();
        let query = TokenQuery::default();
        assert_eq!(bearer_token(&headers, &query), None);
    }
}
