//! Singleton content settings: cosmic timeline, layout, letter.
//!
//! Each table holds a single row pinned to id 1. Reads fall back to code
//! defaults when the row has never been written; writes upsert.

use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use crate::{Database, DbError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CosmicSettings {
    pub intro_title: String,
    pub intro_subtitle: String,
    pub timeline_title: String,
    pub date1: String,
    pub caption1: String,
    pub date2: String,
    pub caption2: String,
}

impl Default for CosmicSettings {
    fn default() -> Self {
        Self {
            intro_title: "Written in the Stars".into(),
            intro_subtitle: "Our story, told across the cosmos.".into(),
            timeline_title: "Cosmic Timeline".into(),
            date1: String::new(),
            caption1: String::new(),
            date2: String::new(),
            caption2: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSettings {
    pub journey_columns: i64,
    pub gacha_columns: i64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            journey_columns: 2,
            gacha_columns: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LetterSettings {
    pub title: String,
    pub body1: String,
    pub body2: String,
    pub voucher: Option<String>,
    pub button_text: String,
    pub footer: String,
}

impl Default for LetterSettings {
    fn default() -> Self {
        Self {
            title: "A Letter for You".into(),
            body1: String::new(),
            body2: String::new(),
            voucher: None,
            button_text: "Open".into(),
            footer: String::new(),
        }
    }
}

impl Database {
    pub fn get_cosmic_settings(&self) -> Result<CosmicSettings, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT intro_title, intro_subtitle, timeline_title,
                        date1, caption1, date2, caption2
                 FROM cosmic_settings WHERE id = 1",
            )?;
            let settings = stmt
                .query_row([], |row| {
                    Ok(CosmicSettings {
                        intro_title: row.get(0)?,
                        intro_subtitle: row.get(1)?,
                        timeline_title: row.get(2)?,
                        date1: row.get(3)?,
                        caption1: row.get(4)?,
                        date2: row.get(5)?,
                        caption2: row.get(6)?,
                    })
                })
                .optional()?;
            Ok(settings.unwrap_or_default())
        })
    }

    pub fn update_cosmic_settings(&self, settings: &CosmicSettings) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO cosmic_settings
                    (id, intro_title, intro_subtitle, timeline_title,
                     date1, caption1, date2, caption2, updated_at)
                 VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, CURRENT_TIMESTAMP)
                 ON CONFLICT(id) DO UPDATE SET
                    intro_title = excluded.intro_title,
                    intro_subtitle = excluded.intro_subtitle,
                    timeline_title = excluded.timeline_title,
                    date1 = excluded.date1,
                    caption1 = excluded.caption1,
                    date2 = excluded.date2,
                    caption2 = excluded.caption2,
                    updated_at = CURRENT_TIMESTAMP",
                rusqlite::params![
                    settings.intro_title,
                    settings.intro_subtitle,
                    settings.timeline_title,
                    settings.date1,
                    settings.caption1,
                    settings.date2,
                    settings.caption2,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_layout_settings(&self) -> Result<LayoutSettings, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT journey_columns, gacha_columns FROM layout_settings WHERE id = 1",
            )?;
            let settings = stmt
                .query_row([], |row| {
                    Ok(LayoutSettings {
                        journey_columns: row.get(0)?,
                        gacha_columns: row.get(1)?,
                    })
                })
                .optional()?;
            Ok(settings.unwrap_or_default())
        })
    }

    pub fn update_layout_settings(&self, settings: &LayoutSettings) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO layout_settings (id, journey_columns, gacha_columns, updated_at)
                 VALUES (1, ?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(id) DO UPDATE SET
                    journey_columns = excluded.journey_columns,
                    gacha_columns = excluded.gacha_columns,
                    updated_at = CURRENT_TIMESTAMP",
                rusqlite::params![settings.journey_columns, settings.gacha_columns],
            )?;
            Ok(())
        })
    }

    pub fn get_letter_settings(&self) -> Result<LetterSettings, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT title, body1, body2, voucher, button_text, footer
                 FROM letter_settings WHERE id = 1",
            )?;
            let settings = stmt
                .query_row([], |row| {
                    Ok(LetterSettings {
                        title: row.get(0)?,
                        body1: row.get(1)?,
                        body2: row.get(2)?,
                        voucher: row.get(3)?,
                        button_text: row.get(4)?,
                        footer: row.get(5)?,
                    })
                })
                .optional()?;
            Ok(settings.unwrap_or_default())
        })
    }

    /// Upsert the letter. A `None` voucher keeps whatever voucher is stored;
    /// clearing it is not a supported operation.
    pub fn update_letter_settings(&self, settings: &LetterSettings) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO letter_settings
                    (id, title, body1, body2, voucher, button_text, footer, updated_at)
                 VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, CURRENT_TIMESTAMP)
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    body1 = excluded.body1,
                    body2 = excluded.body2,
                    voucher = COALESCE(excluded.voucher, letter_settings.voucher),
                    button_text = excluded.button_text,
                    footer = excluded.footer,
                    updated_at = CURRENT_TIMESTAMP",
                rusqlite::params![
                    settings.title,
                    settings.body1,
                    settings.body2,
                    settings.voucher,
                    settings.button_text,
                    settings.footer,
                ],
            )?;
            Ok(())
        })
    }
}
