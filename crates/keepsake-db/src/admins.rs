//! Admin account storage.

use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use crate::{Database, DbError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}

/// Admin row including the stored password hash, for login verification.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

impl Database {
    pub fn create_admin(&self, username: &str, password_hash: &str) -> Result<i64, DbError> {
        self.with_conn(|conn| {
            let result = conn.execute(
                "INSERT INTO admins (username, password_hash) VALUES (?1, ?2)",
                rusqlite::params![username, password_hash],
            );
            match result {
                Ok(_) => Ok(conn.last_insert_rowid()),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Err(DbError::InvalidData(format!(
                        "username already exists: {username}"
                    )))
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_admin_credentials(
        &self,
        username: &str,
    ) -> Result<Option<AdminCredentials>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, username, password_hash FROM admins WHERE username = ?1")?;
            let row = stmt
                .query_row([username], |row| {
                    Ok(AdminCredentials {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password_hash: row.get(2)?,
                    })
                })
                .optional()?;
            Ok(row)
        })
    }

    pub fn get_all_admins(&self) -> Result<Vec<Admin>, DbError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, username, created_at FROM admins ORDER BY id ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok(Admin {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    created_at: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    /// Lowest admin id, used as the effective identity for public callers.
    pub fn first_admin_id(&self) -> Result<Option<i64>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id FROM admins ORDER BY id ASC LIMIT 1")?;
            let id = stmt.query_row([], |row| row.get(0)).optional()?;
            Ok(id)
        })
    }

    pub fn delete_admin(&self, id: i64) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM admins WHERE id = ?1", [id])?;
            Ok(())
        })
    }
}
