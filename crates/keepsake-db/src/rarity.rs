//! Rarity tiers and the per-tier draw weight table.

use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use crate::{Database, DbError};

/// Collectible rarity tier. The declaration order is the canonical draw
/// order used by the weighted engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    /// Canonical draw order: common < rare < epic < legendary < mythic.
    pub const ORDER: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Mythic => "mythic",
        }
    }

    pub fn parse(value: &str) -> Option<Rarity> {
        match value {
            "common" => Some(Rarity::Common),
            "rare" => Some(Rarity::Rare),
            "epic" => Some(Rarity::Epic),
            "legendary" => Some(Rarity::Legendary),
            "mythic" => Some(Rarity::Mythic),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured row of the weight table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RarityWeightRow {
    pub rarity: Rarity,
    pub weight: u32,
}

impl Database {
    /// All configured weights ordered by rarity name. Rows with values the
    /// application does not recognise are skipped.
    pub fn get_rarity_weights(&self) -> Result<Vec<RarityWeightRow>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT rarity, weight FROM gacha_rarity_settings ORDER BY rarity ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?;
            let mut out = Vec::new();
            for row in rows {
                let (name, weight) = row?;
                if let Some(rarity) = Rarity::parse(&name) {
                    out.push(RarityWeightRow {
                        rarity,
                        weight: weight.max(0) as u32,
                    });
                }
            }
            Ok(out)
        })
    }

    pub fn get_rarity_weight(&self, rarity: Rarity) -> Result<Option<u32>, DbError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT weight FROM gacha_rarity_settings WHERE rarity = ?1")?;
            let weight = stmt
                .query_row([rarity.as_str()], |row| row.get::<_, i64>(0))
                .optional()?;
            Ok(weight.map(|w| w.max(0) as u32))
        })
    }

    pub fn set_rarity_weight(&self, rarity: Rarity, weight: u32) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO gacha_rarity_settings (rarity, weight, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(rarity) DO UPDATE SET
                    weight = excluded.weight,
                    updated_at = CURRENT_TIMESTAMP",
                rusqlite::params![rarity.as_str(), weight],
            )?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_is_common_to_mythic() {
        assert_eq!(Rarity::ORDER[0], Rarity::Common);
        assert_eq!(Rarity::ORDER[4], Rarity::Mythic);
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Legendary < Rarity::Mythic);
    }

    #[test]
    fn parse_round_trips_as_str() {
        for rarity in Rarity::ORDER {
            assert_eq!(Rarity::parse(rarity.as_str()), Some(rarity));
        }
        assert_eq!(Rarity::parse("ultra"), None);
        assert_eq!(Rarity::parse(""), None);
    }

    #[test]
    fn serde_representation_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Rarity::Legendary).unwrap(),
            "\"legendary\""
        );
        let parsed: Rarity = serde_json::from_str("\"mythic\"").unwrap();
        assert_eq!(parsed, Rarity::Mythic);
    }
}
