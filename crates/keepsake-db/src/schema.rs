//! Database schema definitions and migrations.

use rusqlite::Connection;

use crate::DbError;

pub fn run_migrations(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS admins (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS admin_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    admin_id INTEGER NOT NULL,
    token TEXT NOT NULL UNIQUE,
    expires_at INTEGER NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (admin_id) REFERENCES admins(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_admin_sessions_token
    ON admin_sessions(token);

CREATE TABLE IF NOT EXISTS pictures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    original_name TEXT,
    mime_type TEXT,
    size INTEGER NOT NULL DEFAULT 0,
    stored_path TEXT NOT NULL,
    source TEXT NOT NULL DEFAULT 'manual-upload'
        CHECK(source IN ('auto-capture', 'manual-upload')),
    gacha_id INTEGER,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_pictures_gacha_id
    ON pictures(gacha_id);

CREATE INDEX IF NOT EXISTS idx_pictures_created_at
    ON pictures(created_at DESC);

CREATE TABLE IF NOT EXISTS gacha_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    rarity TEXT NOT NULL
        CHECK(rarity IN ('common', 'rare', 'epic', 'legendary', 'mythic')),
    title TEXT NOT NULL,
    caption TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS gacha_rarity_settings (
    rarity TEXT PRIMARY KEY
        CHECK(rarity IN ('common', 'rare', 'epic', 'legendary', 'mythic')),
    weight INTEGER NOT NULL DEFAULT 0,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS gacha_state (
    admin_id INTEGER PRIMARY KEY,
    coins INTEGER NOT NULL DEFAULT 5,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS gacha_results (
    admin_id INTEGER NOT NULL,
    gacha_item_id INTEGER NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (admin_id, gacha_item_id)
);

CREATE TABLE IF NOT EXISTS journey_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL CHECK(category IN ('sweet', 'funny')),
    title TEXT NOT NULL,
    caption TEXT NOT NULL,
    filename TEXT,
    stored_path TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS cosmic_settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    intro_title TEXT NOT NULL DEFAULT '',
    intro_subtitle TEXT NOT NULL DEFAULT '',
    timeline_title TEXT NOT NULL DEFAULT '',
    date1 TEXT NOT NULL DEFAULT '',
    caption1 TEXT NOT NULL DEFAULT '',
    date2 TEXT NOT NULL DEFAULT '',
    caption2 TEXT NOT NULL DEFAULT '',
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS layout_settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    journey_columns INTEGER NOT NULL DEFAULT 2,
    gacha_columns INTEGER NOT NULL DEFAULT 2,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS letter_settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    title TEXT NOT NULL DEFAULT '',
    body1 TEXT NOT NULL DEFAULT '',
    body2 TEXT NOT NULL DEFAULT '',
    voucher TEXT,
    button_text TEXT NOT NULL DEFAULT '',
    footer TEXT NOT NULL DEFAULT '',
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS love_radar_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    target_lat REAL NOT NULL,
    target_lng REAL NOT NULL,
    user_lat REAL,
    user_lng REAL,
    distance_m REAL,
    distance_km REAL,
    accuracy_m REAL,
    status TEXT NOT NULL,
    error_message TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
"#;
