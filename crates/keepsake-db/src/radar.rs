//! Append-only love-radar telemetry log. Write-only; nothing reads it back.

use serde::{Deserialize, Serialize};

use crate::{Database, DbError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RadarLog {
    pub target_lat: f64,
    pub target_lng: f64,
    pub user_lat: Option<f64>,
    pub user_lng: Option<f64>,
    pub distance_m: Option<f64>,
    pub distance_km: Option<f64>,
    pub accuracy_m: Option<f64>,
    pub status: String,
    pub error_message: Option<String>,
}

impl Database {
    pub fn log_radar_check(&self, log: &RadarLog) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO love_radar_logs
                    (target_lat, target_lng, user_lat, user_lng,
                     distance_m, distance_km, accuracy_m, status, error_message)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    log.target_lat,
                    log.target_lng,
                    log.user_lat,
                    log.user_lng,
                    log.distance_m,
                    log.distance_km,
                    log.accuracy_m,
                    log.status,
                    log.error_message,
                ],
            )?;
            Ok(())
        })
    }
}
