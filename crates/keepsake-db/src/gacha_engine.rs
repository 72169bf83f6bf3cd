//! Weighted rarity draw engine and least-loaded slot selection helpers.

use rand::Rng;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::gacha_items::GachaItem;
use crate::rarity::{Rarity, RarityWeightRow};

const DEFAULT_COMMON_WEIGHT: u32 = 55;
const DEFAULT_RARE_WEIGHT: u32 = 25;
const DEFAULT_EPIC_WEIGHT: u32 = 12;
const DEFAULT_LEGENDARY_WEIGHT: u32 = 6;
const DEFAULT_MYTHIC_WEIGHT: u32 = 2;

/// Draw weight per rarity tier. Weights are coarse operator-tuned integers;
/// a zero weight excludes the tier from the roll entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RarityWeights {
    pub common: u32,
    pub rare: u32,
    pub epic: u32,
    pub legendary: u32,
    pub mythic: u32,
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self {
            common: DEFAULT_COMMON_WEIGHT,
            rare: DEFAULT_RARE_WEIGHT,
            epic: DEFAULT_EPIC_WEIGHT,
            legendary: DEFAULT_LEGENDARY_WEIGHT,
            mythic: DEFAULT_MYTHIC_WEIGHT,
        }
    }
}

impl RarityWeights {
    pub fn get(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
            Rarity::Mythic => self.mythic,
        }
    }

    pub fn set(&mut self, rarity: Rarity, weight: u32) {
        match rarity {
            Rarity::Common => self.common = weight,
            Rarity::Rare => self.rare = weight,
            Rarity::Epic => self.epic = weight,
            Rarity::Legendary => self.legendary = weight,
            Rarity::Mythic => self.mythic = weight,
        }
    }

    /// Defaults overlaid with whatever rows the weight table holds.
    pub fn from_rows(rows: &[RarityWeightRow]) -> Self {
        let mut weights = Self::default();
        for row in rows {
            weights.set(row.rarity, row.weight);
        }
        weights
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GachaDrawError {
    #[error("no gacha items")]
    NoItems,
}

/// Outcome of a single pull.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawOutcome {
    pub rarity: Rarity,
    pub item: GachaItem,
}

/// Roll a rarity over the available subset.
///
/// `available` lists the tiers that currently have at least one item; the
/// walk always happens in canonical order regardless of the slice order.
/// A zero total weight falls back to the first available tier, and an empty
/// subset falls back to `Common` so callers never observe a failed roll.
pub fn draw_rarity<R: Rng + ?Sized>(
    weights: &RarityWeights,
    available: &[Rarity],
    rng: &mut R,
) -> Rarity {
    let order: Vec<Rarity> = Rarity::ORDER
        .iter()
        .copied()
        .filter(|rarity| available.contains(rarity))
        .collect();

    let Some(&first) = order.first() else {
        return Rarity::Common;
    };

    let total: u64 = order.iter().map(|&r| u64::from(weights.get(r))).sum();
    if total == 0 {
        return first;
    }

    let mut roll = rng.gen_range(0..total);
    for &rarity in &order {
        let weight = u64::from(weights.get(rarity));
        if roll < weight {
            return rarity;
        }
        roll -= weight;
    }

    first
}

/// Full pull: roll a rarity over the tiers that have items, then pick
/// uniformly within that tier.
pub fn draw_item<R: Rng + ?Sized>(
    items: &[GachaItem],
    weights: &RarityWeights,
    rng: &mut R,
) -> Result<DrawOutcome, GachaDrawError> {
    if items.is_empty() {
        return Err(GachaDrawError::NoItems);
    }

    let available: Vec<Rarity> = Rarity::ORDER
        .iter()
        .copied()
        .filter(|&rarity| items.iter().any(|item| item.rarity == rarity))
        .collect();

    let rarity = draw_rarity(weights, &available, rng);
    let pool: Vec<&GachaItem> = items.iter().filter(|item| item.rarity == rarity).collect();
    if pool.is_empty() {
        // Unreachable while `available` is derived from `items`, but a
        // stale caller-provided subset must not panic the roll.
        return Err(GachaDrawError::NoItems);
    }

    let index = rng.gen_range(0..pool.len());
    Ok(DrawOutcome {
        rarity,
        item: pool[index].clone(),
    })
}

/// [`draw_item`] with the OS random source.
pub fn draw_item_os(
    items: &[GachaItem],
    weights: &RarityWeights,
) -> Result<DrawOutcome, GachaDrawError> {
    let mut rng = OsRng;
    draw_item(items, weights, &mut rng)
}

#[cfg(test)]
#[path = "gacha_engine_tests.rs"]
mod tests;
