//! Journey gallery items.

use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use crate::{Database, DbError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyCategory {
    Sweet,
    Funny,
}

impl JourneyCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            JourneyCategory::Sweet => "sweet",
            JourneyCategory::Funny => "funny",
        }
    }

    pub fn parse(value: &str) -> Option<JourneyCategory> {
        match value {
            "sweet" => Some(JourneyCategory::Sweet),
            "funny" => Some(JourneyCategory::Funny),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JourneyItem {
    pub id: i64,
    pub category: JourneyCategory,
    pub title: String,
    pub caption: String,
    pub filename: Option<String>,
    pub stored_path: Option<String>,
}

fn journey_item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<JourneyItem> {
    let category: String = row.get(1)?;
    Ok(JourneyItem {
        id: row.get(0)?,
        category: JourneyCategory::parse(&category).unwrap_or(JourneyCategory::Sweet),
        title: row.get(2)?,
        caption: row.get(3)?,
        filename: row.get(4)?,
        stored_path: row.get(5)?,
    })
}

const JOURNEY_COLUMNS: &str = "id, category, title, caption, filename, stored_path";

impl Database {
    pub fn get_all_journey_items(&self) -> Result<Vec<JourneyItem>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {JOURNEY_COLUMNS} FROM journey_items ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map([], journey_item_from_row)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    pub fn get_journey_item(&self, id: i64) -> Result<Option<JourneyItem>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {JOURNEY_COLUMNS} FROM journey_items WHERE id = ?1"
            ))?;
            let item = stmt.query_row([id], journey_item_from_row).optional()?;
            Ok(item)
        })
    }

    pub fn create_journey_item(
        &self,
        category: JourneyCategory,
        title: &str,
        caption: &str,
        filename: Option<&str>,
        stored_path: Option<&str>,
    ) -> Result<i64, DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO journey_items (category, title, caption, filename, stored_path)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![category.as_str(), title, caption, filename, stored_path],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Update text fields; a `None` file keeps the previously stored one.
    /// Returns false when the item does not exist.
    pub fn update_journey_item(
        &self,
        id: i64,
        category: JourneyCategory,
        title: &str,
        caption: &str,
        filename: Option<&str>,
        stored_path: Option<&str>,
    ) -> Result<bool, DbError> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE journey_items
                 SET category = ?1,
                     title = ?2,
                     caption = ?3,
                     filename = COALESCE(?4, filename),
                     stored_path = COALESCE(?5, stored_path),
                     updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?6",
                rusqlite::params![category.as_str(), title, caption, filename, stored_path, id],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn delete_journey_item(&self, id: i64) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM journey_items WHERE id = ?1", [id])?;
            Ok(())
        })
    }
}
