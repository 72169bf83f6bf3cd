use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::app::SharedState;

use super::api;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- Auth ---
        .route("/api/auth/login", post(api::auth::login))
        // --- Admin accounts ---
        .route(
            "/api/admins",
            get(api::admins::list_admins)
                .post(api::admins::create_admin)
                .delete(api::admins::delete_admin),
        )
        // --- Pictures ---
        .route(
            "/api/pictures",
            get(api::pictures::list_pictures)
                .post(api::pictures::upload_picture)
                .delete(api::pictures::delete_picture),
        )
        .route("/api/pictures/assign", post(api::pictures::assign_picture))
        .route("/api/files/{id}", get(api::files::get_picture_file))
        // --- Gacha ---
        .route(
            "/api/gacha-items",
            get(api::gacha_items::list_items)
                .post(api::gacha_items::upsert_item)
                .delete(api::gacha_items::delete_item),
        )
        .route(
            "/api/gacha-rarity",
            get(api::gacha_rarity::list_weights).post(api::gacha_rarity::set_weight),
        )
        .route(
            "/api/gacha-state",
            get(api::gacha_state::get_state).post(api::gacha_state::update_state),
        )
        .route(
            "/api/gacha-results",
            get(api::gacha_state::list_results).post(api::gacha_state::record_result),
        )
        // --- Journey ---
        .route(
            "/api/journey",
            get(api::journey::list_items)
                .post(api::journey::upsert_item)
                .delete(api::journey::delete_item),
        )
        .route("/api/journey/files/{id}", get(api::files::get_journey_file))
        // --- Singleton content ---
        .route("/api/cosmic", get(api::site::get_cosmic).post(api::site::update_cosmic))
        .route("/api/layout", get(api::site::get_layout).post(api::site::update_layout))
        .route("/api/letter", get(api::site::get_letter).post(api::site::update_letter))
        // --- Telemetry ---
        .route("/api/love-radar", post(api::radar::log_check))
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
