//! Picture metadata storage and gacha slot assignment.

use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use crate::{Database, DbError};

/// How a picture entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PictureSource {
    AutoCapture,
    ManualUpload,
}

impl PictureSource {
    pub fn as_str(self) -> &'static str {
        match self {
            PictureSource::AutoCapture => "auto-capture",
            PictureSource::ManualUpload => "manual-upload",
        }
    }

    pub fn parse(value: &str) -> Option<PictureSource> {
        match value {
            "auto-capture" => Some(PictureSource::AutoCapture),
            "manual-upload" => Some(PictureSource::ManualUpload),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Picture {
    pub id: i64,
    pub filename: String,
    pub original_name: Option<String>,
    pub mime_type: Option<String>,
    pub size: i64,
    pub stored_path: String,
    pub source: PictureSource,
    pub gacha_id: Option<i64>,
    pub created_at: String,
}

/// Insert payload; the row id and timestamp come from the database.
#[derive(Debug, Clone)]
pub struct NewPicture<'a> {
    pub filename: &'a str,
    pub original_name: Option<&'a str>,
    pub mime_type: Option<&'a str>,
    pub size: i64,
    pub stored_path: &'a str,
    pub source: PictureSource,
    pub gacha_id: Option<i64>,
}

const PICTURE_COLUMNS: &str =
    "id, filename, original_name, mime_type, size, stored_path, source, gacha_id, created_at";

fn picture_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Picture> {
    let source: String = row.get(6)?;
    Ok(Picture {
        id: row.get(0)?,
        filename: row.get(1)?,
        original_name: row.get(2)?,
        mime_type: row.get(3)?,
        size: row.get(4)?,
        stored_path: row.get(5)?,
        source: PictureSource::parse(&source).unwrap_or(PictureSource::ManualUpload),
        gacha_id: row.get(7)?,
        created_at: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
    })
}

impl Database {
    pub fn add_picture(&self, picture: &NewPicture<'_>) -> Result<i64, DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO pictures
                    (filename, original_name, mime_type, size, stored_path, source, gacha_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    picture.filename,
                    picture.original_name,
                    picture.mime_type,
                    picture.size,
                    picture.stored_path,
                    picture.source.as_str(),
                    picture.gacha_id,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_picture(&self, id: i64) -> Result<Option<Picture>, DbError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {PICTURE_COLUMNS} FROM pictures WHERE id = ?1"))?;
            let picture = stmt.query_row([id], picture_from_row).optional()?;
            Ok(picture)
        })
    }

    /// Newest pictures first, id as a tiebreak for equal timestamps.
    pub fn get_recent_pictures(&self, limit: u32) -> Result<Vec<Picture>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PICTURE_COLUMNS} FROM pictures
                 ORDER BY created_at DESC, id DESC LIMIT ?1"
            ))?;
            let rows = stmt.query_map([limit], picture_from_row)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    pub fn get_pictures_by_gacha(&self, gacha_id: i64, limit: u32) -> Result<Vec<Picture>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PICTURE_COLUMNS} FROM pictures
                 WHERE gacha_id = ?1
                 ORDER BY created_at DESC, id DESC LIMIT ?2"
            ))?;
            let rows = stmt.query_map(rusqlite::params![gacha_id, limit], picture_from_row)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    /// Point a picture at a gacha item (or detach it with `None`).
    /// Returns false when the picture does not exist.
    pub fn assign_picture(&self, picture_id: i64, gacha_id: Option<i64>) -> Result<bool, DbError> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE pictures SET gacha_id = ?1 WHERE id = ?2",
                rusqlite::params![gacha_id, picture_id],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn delete_picture(&self, id: i64) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM pictures WHERE id = ?1", [id])?;
            Ok(())
        })
    }
}
