pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::exchange::handlers as exchange_handlers;
use crate::extraction::handlers as extraction_handlers;
use crate::spots::handlers as spot_handlers;
use crate::state::AppState;
use crate::users::handlers as user_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Spots
        .route(
            "/api/v1/spots",
            get(spot_handlers::handle_list_spots).post(spot_handlers::handle_add_spot),
        )
        .route(
            "/api/v1/spots/:id",
            delete(spot_handlers::handle_delete_spot),
        )
        .route(
            "/api/v1/spots/extract",
            post(extraction_handlers::handle_extract),
        )
        .route("/api/v1/spots/merge", post(exchange_handlers::handle_merge))
        // Users
        .route(
            "/api/v1/users/location",
            post(user_handlers::handle_update_location),
        )
        .route(
            "/api/v1/users/sharing",
            patch(user_handlers::handle_toggle_sharing),
        )
        .route(
            "/api/v1/users/nearby",
            get(user_handlers::handle_nearby_users),
        )
        // Exchange requests
        .route(
            "/api/v1/exchange",
            post(exchange_handlers::handle_send_request).get(exchange_handlers::handle_list_requests),
        )
        .with_state(state)
}
