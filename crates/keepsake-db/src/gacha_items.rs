//! Gacha collectible items and least-loaded slot selection.

use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use crate::rarity::Rarity;
use crate::{Database, DbError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GachaItem {
    pub id: i64,
    pub rarity: Rarity,
    pub title: String,
    pub caption: String,
}

fn gacha_item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GachaItem> {
    let rarity: String = row.get(1)?;
    Ok(GachaItem {
        id: row.get(0)?,
        // The rarity column carries a CHECK constraint; an unknown value
        // can only mean a schema drift, surface it as common.
        rarity: Rarity::parse(&rarity).unwrap_or(Rarity::Common),
        title: row.get(2)?,
        caption: row.get(3)?,
    })
}

impl Database {
    pub fn get_all_gacha_items(&self) -> Result<Vec<GachaItem>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, rarity, title, caption FROM gacha_items ORDER BY id ASC")?;
            let rows = stmt.query_map([], gacha_item_from_row)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    pub fn get_gacha_item(&self, id: i64) -> Result<Option<GachaItem>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, rarity, title, caption FROM gacha_items WHERE id = ?1")?;
            let item = stmt.query_row([id], gacha_item_from_row).optional()?;
            Ok(item)
        })
    }

    pub fn create_gacha_item(
        &self,
        rarity: Rarity,
        title: &str,
        caption: &str,
    ) -> Result<i64, DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO gacha_items (rarity, title, caption) VALUES (?1, ?2, ?3)",
                rusqlite::params![rarity.as_str(), title, caption],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Returns false when the item does not exist.
    pub fn update_gacha_item(
        &self,
        id: i64,
        rarity: Rarity,
        title: &str,
        caption: &str,
    ) -> Result<bool, DbError> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE gacha_items
                 SET rarity = ?1, title = ?2, caption = ?3, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?4",
                rusqlite::params![rarity.as_str(), title, caption, id],
            )?;
            Ok(changed > 0)
        })
    }

    /// Delete an item and detach every picture that still points at it, in
    /// one transaction, so no dangling `gacha_id` survives.
    pub fn delete_gacha_item(&self, id: i64) -> Result<(), DbError> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let detached = tx.execute(
                "UPDATE pictures SET gacha_id = NULL WHERE gacha_id = ?1",
                [id],
            )?;
            tx.execute("DELETE FROM gacha_items WHERE id = ?1", [id])?;
            tx.commit()?;
            if detached > 0 {
                tracing::debug!(item = id, detached, "Detached pictures from deleted gacha item");
            }
            Ok(())
        })
    }

    /// The item of the given rarity holding the fewest pictures, ties broken
    /// by lowest id. Spreads uploads evenly across same-rarity slots.
    pub fn least_loaded_gacha_item(&self, rarity: Rarity) -> Result<Option<i64>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT gacha_items.id
                 FROM gacha_items
                 LEFT JOIN pictures ON pictures.gacha_id = gacha_items.id
                 WHERE gacha_items.rarity = ?1
                 GROUP BY gacha_items.id
                 ORDER BY COUNT(pictures.id) ASC, gacha_items.id ASC
                 LIMIT 1",
            )?;
            let id = stmt
                .query_row([rarity.as_str()], |row| row.get(0))
                .optional()?;
            Ok(id)
        })
    }
}
