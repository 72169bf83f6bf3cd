//! Per-admin gacha progress: coin balance and collected results.

use crate::{Database, DbError};

/// Starting balance granted on first read.
pub const DEFAULT_COINS: i64 = 5;

impl Database {
    /// Current balance, creating the default row on first access.
    pub fn get_coins(&self, admin_id: i64) -> Result<i64, DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO gacha_state (admin_id, coins) VALUES (?1, ?2)
                 ON CONFLICT(admin_id) DO NOTHING",
                rusqlite::params![admin_id, DEFAULT_COINS],
            )?;
            let mut stmt = conn.prepare("SELECT coins FROM gacha_state WHERE admin_id = ?1")?;
            let coins = stmt.query_row([admin_id], |row| row.get(0))?;
            Ok(coins)
        })
    }

    /// Set the balance to an absolute value, clamped at zero.
    /// Returns the stored value.
    pub fn set_coins(&self, admin_id: i64, coins: i64) -> Result<i64, DbError> {
        let clamped = coins.max(0);
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO gacha_state (admin_id, coins, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(admin_id) DO UPDATE SET
                    coins = excluded.coins,
                    updated_at = CURRENT_TIMESTAMP",
                rusqlite::params![admin_id, clamped],
            )?;
            Ok(clamped)
        })
    }

    /// Apply a relative adjustment, clamped at zero, in one transaction.
    /// Returns the post-update balance, the single source of truth clients
    /// reconcile against.
    pub fn adjust_coins(&self, admin_id: i64, delta: i64) -> Result<i64, DbError> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO gacha_state (admin_id, coins) VALUES (?1, ?2)
                 ON CONFLICT(admin_id) DO NOTHING",
                rusqlite::params![admin_id, DEFAULT_COINS],
            )?;
            let current: i64 = {
                let mut stmt = tx.prepare("SELECT coins FROM gacha_state WHERE admin_id = ?1")?;
                stmt.query_row([admin_id], |row| row.get(0))?
            };
            let next = current.saturating_add(delta).max(0);
            tx.execute(
                "UPDATE gacha_state SET coins = ?1, updated_at = CURRENT_TIMESTAMP
                 WHERE admin_id = ?2",
                rusqlite::params![next, admin_id],
            )?;
            tx.commit()?;
            Ok(next)
        })
    }

    /// Item ids the admin has unlocked so far.
    pub fn get_collected_item_ids(&self, admin_id: i64) -> Result<Vec<i64>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT gacha_item_id FROM gacha_results
                 WHERE admin_id = ?1 ORDER BY gacha_item_id ASC",
            )?;
            let rows = stmt.query_map([admin_id], |row| row.get(0))?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    /// Record an unlock. Idempotent; returns false when it was already
    /// recorded.
    pub fn record_gacha_result(&self, admin_id: i64, gacha_item_id: i64) -> Result<bool, DbError> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO gacha_results (admin_id, gacha_item_id) VALUES (?1, ?2)
                 ON CONFLICT(admin_id, gacha_item_id) DO NOTHING",
                rusqlite::params![admin_id, gacha_item_id],
            )?;
            Ok(inserted > 0)
        })
    }
}
