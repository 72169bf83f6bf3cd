//! Session context: token persistence, bearer headers, 401 handling.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use reqwest::header::AUTHORIZATION;
use serde_json::{Value, json};
use url::Url;

use crate::{AdminSession, ClientError};

/// Durable storage for the admin session token, the role browser storage
/// plays for the web UI.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<AdminSession>;
    fn save(&self, session: &AdminSession);
    fn clear(&self);
}

/// JSON-file-backed [`SessionStore`]. All operations are best-effort; a
/// broken file simply means no stored session.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<AdminSession> {
        let data = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&data).ok()
    }

    fn save(&self, session: &AdminSession) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(session) {
            Ok(data) => {
                if let Err(e) = std::fs::write(&self.path, data) {
                    tracing::warn!("Failed to persist session: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize session: {e}"),
        }
    }

    fn clear(&self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Client for the keepsake HTTP API.
///
/// Carries the admin session explicitly instead of global mutable state.
/// Calls fall back to the shared public token while no admin is logged in;
/// any 401 clears the stored session so the caller can route back to login.
pub struct AdminClient {
    base_url: Url,
    public_token: String,
    http: reqwest::Client,
    session: Mutex<Option<AdminSession>>,
    store: Option<Box<dyn SessionStore>>,
}

impl AdminClient {
    pub fn new(base_url: &str, public_token: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            public_token: public_token.into(),
            http: reqwest::Client::new(),
            session: Mutex::new(None),
            store: None,
        })
    }

    /// Attach a durable session store and adopt whatever session it holds.
    pub fn with_store(mut self, store: Box<dyn SessionStore>) -> Self {
        *self.session_guard() = store.load();
        self.store = Some(store);
        self
    }

    fn session_guard(&self) -> std::sync::MutexGuard<'_, Option<AdminSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn session(&self) -> Option<AdminSession> {
        self.session_guard().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session_guard().is_some()
    }

    /// The token attached to outgoing calls: admin session when logged in,
    /// the shared public token otherwise.
    fn bearer(&self) -> String {
        self.session_guard()
            .as_ref()
            .map(|s| s.token.clone())
            .unwrap_or_else(|| self.public_token.clone())
    }

    /// Drop the local session (memory and store). The server-side session
    /// row keeps its own expiry; there is no remote logout.
    pub fn logout(&self) {
        self.clear_session();
    }

    pub(crate) fn clear_session(&self) {
        self.session_guard().take();
        if let Some(store) = &self.store {
            store.clear();
        }
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    /// Exchange credentials for a session and persist it.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminSession, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/auth/login")?)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let session: AdminSession = serde_json::from_str(&body)?;
        *self.session_guard() = Some(session.clone());
        if let Some(store) = &self.store {
            store.save(&session);
        }
        tracing::info!(username = %session.username, "Logged in");
        Ok(session)
    }

    async fn parse_response(&self, resp: reqwest::Response) -> Result<Value, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("Got 401, clearing stored session");
            self.clear_session();
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let resp = self
            .http
            .get(self.url(path)?)
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer()))
            .send()
            .await?;
        self.parse_response(resp).await
    }

    pub(crate) async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        let resp = self
            .http
            .post(self.url(path)?)
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer()))
            .json(body)
            .send()
            .await?;
        self.parse_response(resp).await
    }

    pub(crate) async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Value, ClientError> {
        let resp = self
            .http
            .post(self.url(path)?)
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer()))
            .multipart(form)
            .send()
            .await?;
        self.parse_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        let resp = self
            .http
            .delete(self.url(path)?)
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer()))
            .send()
            .await?;
        self.parse_response(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> FileSessionStore {
        let path = std::env::temp_dir().join(format!(
            "keepsake-session-{tag}-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        FileSessionStore::new(path)
    }

    fn sample_session() -> AdminSession {
        AdminSession {
            token: "abc".into(),
            expires_at: "2026-01-01T00:00:00Z".into(),
            username: "alice".into(),
        }
    }

    #[test]
    fn file_store_round_trip() {
        let store = temp_store("round-trip");
        assert!(store.load().is_none());

        store.save(&sample_session());
        assert_eq!(store.load(), Some(sample_session()));

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn client_adopts_stored_session() {
        let store = temp_store("adopt");
        store.save(&sample_session());

        let client = AdminClient::new("http://localhost:8080", "public")
            .unwrap()
            .with_store(Box::new(store));
        assert!(client.is_logged_in());
        assert_eq!(client.bearer(), "abc");

        client.logout();
        assert!(!client.is_logged_in());
        // Back to the shared public token once the session is gone.
        assert_eq!(client.bearer(), "public");
    }

    #[test]
    fn bearer_defaults_to_public_token() {
        let client = AdminClient::new("http://localhost:8080", "shared").unwrap();
        assert_eq!(client.bearer(), "shared");
    }
}
