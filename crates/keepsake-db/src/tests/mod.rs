use crate::Database;

fn test_db() -> Database {
    Database::open_in_memory().expect("Failed to create test DB")
}

mod auth;
mod gacha;
mod journey;
mod pictures;
mod settings;
