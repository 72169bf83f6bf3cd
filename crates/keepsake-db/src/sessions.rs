//! Login sessions: bearer token issuance and lookup.

use chrono::Utc;
use rand::RngCore;
use rand::rngs::OsRng;
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use crate::admins::Admin;
use crate::{Database, DbError};

/// Absolute session lifetime.
pub const SESSION_DAYS: i64 = 30;

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub expires_at: i64,
}

/// Generate a 256-bit random bearer token, hex-encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

impl Database {
    pub fn create_session(&self, admin_id: i64) -> Result<Session, DbError> {
        self.create_session_at(admin_id, Utc::now().timestamp())
    }

    /// Issue a session expiring [`SESSION_DAYS`] after `now`.
    ///
    /// Expired rows for the same admin are purged on the way in so repeated
    /// logins do not accumulate dead sessions.
    pub fn create_session_at(&self, admin_id: i64, now: i64) -> Result<Session, DbError> {
        let token = generate_token();
        let expires_at = now + SESSION_DAYS * 24 * 60 * 60;

        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM admin_sessions WHERE admin_id = ?1 AND expires_at <= ?2",
                rusqlite::params![admin_id, now],
            )?;
            conn.execute(
                "INSERT INTO admin_sessions (admin_id, token, expires_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![admin_id, token, expires_at],
            )?;
            Ok(())
        })?;

        Ok(Session { token, expires_at })
    }

    pub fn get_admin_by_token(&self, token: &str) -> Result<Option<Admin>, DbError> {
        self.get_admin_by_token_at(token, Utc::now().timestamp())
    }

    /// Resolve a live session to its admin. Sessions expiring at or before
    /// `now` are treated as absent.
    pub fn get_admin_by_token_at(&self, token: &str, now: i64) -> Result<Option<Admin>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT admins.id, admins.username, admins.created_at
                 FROM admin_sessions
                 JOIN admins ON admins.id = admin_sessions.admin_id
                 WHERE admin_sessions.token = ?1
                   AND admin_sessions.expires_at > ?2",
            )?;
            let admin = stmt
                .query_row(rusqlite::params![token, now], |row| {
                    Ok(Admin {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        created_at: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    })
                })
                .optional()?;
            Ok(admin)
        })
    }

    pub fn session_count(&self, admin_id: i64) -> Result<i64, DbError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT COUNT(*) FROM admin_sessions WHERE admin_id = ?1")?;
            let count = stmt.query_row([admin_id], |row| row.get(0))?;
            Ok(count)
        })
    }
}
