//! Geolocation distance check and write-only telemetry reporting.

use serde_json::json;

use keepsake_db::radar::RadarLog;

use crate::ClientError;
use crate::session::AdminClient;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates, in meters.
pub fn haversine_distance_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Build a telemetry record for a radar check. With a user position the
/// distance fields are filled in and the status is `ok`; without one the
/// record carries the denial.
pub fn build_report(
    target_lat: f64,
    target_lng: f64,
    user: Option<(f64, f64, f64)>,
    error_message: Option<String>,
) -> RadarLog {
    match user {
        Some((user_lat, user_lng, accuracy_m)) => {
            let distance_m = haversine_distance_m(target_lat, target_lng, user_lat, user_lng);
            RadarLog {
                target_lat,
                target_lng,
                user_lat: Some(user_lat),
                user_lng: Some(user_lng),
                distance_m: Some(distance_m),
                distance_km: Some(distance_m / 1000.0),
                accuracy_m: Some(accuracy_m),
                status: "ok".into(),
                error_message,
            }
        }
        None => RadarLog {
            target_lat,
            target_lng,
            user_lat: None,
            user_lng: None,
            distance_m: None,
            distance_km: None,
            accuracy_m: None,
            status: "denied".into(),
            error_message,
        },
    }
}

impl AdminClient {
    /// Fire-and-report a radar check; the server only acknowledges.
    pub async fn report_radar(&self, log: &RadarLog) -> Result<(), ClientError> {
        self.post_json("/api/love-radar", &json!(log)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_zero_distance() {
        assert!(haversine_distance_m(-6.2, 106.8, -6.2, 106.8) < 1e-6);
    }

    #[test]
    fn haversine_one_degree_longitude_at_equator() {
        // One degree of longitude at the equator is roughly 111.19 km.
        let d = haversine_distance_m(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111_195.0).abs() < 200.0, "got {d}");
    }

    #[test]
    fn report_with_position_carries_distance() {
        let log = build_report(-6.2, 106.8, Some((-6.3, 106.8, 25.0)), None);
        assert_eq!(log.status, "ok");
        let km = log.distance_km.unwrap();
        assert!(km > 10.0 && km < 12.5, "got {km}");
    }

    #[test]
    fn report_without_position_is_denied() {
        let log = build_report(-6.2, 106.8, None, Some("permission denied".into()));
        assert_eq!(log.status, "denied");
        assert!(log.distance_m.is_none());
        assert_eq!(log.error_message.as_deref(), Some("permission denied"));
    }
}
