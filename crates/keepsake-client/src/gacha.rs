//! Interactive gacha pull flow.
//!
//! The draw itself runs locally through the weighted engine; the coin spend
//! goes through the authoritative counter endpoint and the local balance is
//! reconciled to whatever the server answers.

use std::collections::HashSet;

use serde_json::{Value, json};

use keepsake_db::gacha_engine::{DrawOutcome, RarityWeights, draw_item_os};
use keepsake_db::gacha_items::GachaItem;
use keepsake_db::rarity::RarityWeightRow;

use crate::ClientError;
use crate::session::AdminClient;

/// Hidden-santa taps needed to earn a bonus coin.
pub const TAPS_PER_COIN: u32 = 5;

impl AdminClient {
    /// Configured weights overlaid on the shipped defaults.
    pub async fn fetch_rarity_weights(&self) -> Result<RarityWeights, ClientError> {
        let value = self.get_json("/api/gacha-rarity").await?;
        let rows: Vec<RarityWeightRow> =
            serde_json::from_value(value.get("items").cloned().unwrap_or(Value::Null))
                .unwrap_or_default();
        Ok(RarityWeights::from_rows(&rows))
    }

    pub async fn fetch_gacha_items(&self) -> Result<Vec<GachaItem>, ClientError> {
        let value = self.get_json("/api/gacha-items").await?;
        let items = serde_json::from_value(value.get("items").cloned().unwrap_or(Value::Null))?;
        Ok(items)
    }

    pub async fn fetch_coins(&self) -> Result<i64, ClientError> {
        let value = self.get_json("/api/gacha-state").await?;
        Ok(value.get("coins").and_then(Value::as_i64).unwrap_or(0))
    }

    /// Apply a coin delta on the server; returns the post-update balance.
    pub async fn adjust_coins(&self, delta: i64) -> Result<i64, ClientError> {
        let value = self
            .post_json("/api/gacha-state", &json!({ "delta": delta }))
            .await?;
        Ok(value.get("coins").and_then(Value::as_i64).unwrap_or(0))
    }

    pub async fn fetch_collected(&self) -> Result<Vec<i64>, ClientError> {
        let value = self.get_json("/api/gacha-results").await?;
        let items = serde_json::from_value(value.get("items").cloned().unwrap_or(Value::Null))
            .unwrap_or_default();
        Ok(items)
    }

    pub async fn record_result(&self, gacha_item_id: i64) -> Result<(), ClientError> {
        self.post_json("/api/gacha-results", &json!({ "gachaItemId": gacha_item_id }))
            .await?;
        Ok(())
    }
}

/// Client-side state of the gacha view.
pub struct GachaGame<'a> {
    client: &'a AdminClient,
    items: Vec<GachaItem>,
    weights: RarityWeights,
    pub coins: i64,
    pub collected: HashSet<i64>,
    tap_count: u32,
}

impl<'a> GachaGame<'a> {
    /// Load items, weights, coin balance, and collection from the server.
    pub async fn load(client: &'a AdminClient) -> Result<GachaGame<'a>, ClientError> {
        let items = client.fetch_gacha_items().await?;
        let weights = client.fetch_rarity_weights().await?;
        let coins = client.fetch_coins().await?;
        let collected = client.fetch_collected().await?.into_iter().collect();

        Ok(GachaGame {
            client,
            items,
            weights,
            coins,
            collected,
            tap_count: 0,
        })
    }

    pub fn items(&self) -> &[GachaItem] {
        &self.items
    }

    pub fn weights(&self) -> &RarityWeights {
        &self.weights
    }

    /// One pull: draw locally, spend a coin through the authoritative
    /// counter, record a first-time unlock.
    pub async fn pull(&mut self) -> Result<DrawOutcome, ClientError> {
        if self.coins <= 0 {
            return Err(ClientError::NoCoins);
        }
        let outcome =
            draw_item_os(&self.items, &self.weights).map_err(|_| ClientError::NoItems)?;

        self.coins = self.client.adjust_coins(-1).await?;

        if self.collected.insert(outcome.item.id) {
            self.client.record_result(outcome.item.id).await?;
        }

        Ok(outcome)
    }

    /// Register a hidden-santa tap. Every [`TAPS_PER_COIN`]th tap grants a
    /// bonus coin; returns true when one was granted.
    pub async fn register_tap(&mut self) -> Result<bool, ClientError> {
        self.tap_count += 1;
        if self.tap_count < TAPS_PER_COIN {
            return Ok(false);
        }
        self.tap_count = 0;
        self.coins = self.client.adjust_coins(1).await?;
        Ok(true)
    }
}
