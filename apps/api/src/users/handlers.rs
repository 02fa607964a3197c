use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::geo::validate_coordinates;
use crate::models::user::UserRow;
use crate::state::AppState;
use crate::users::proximity::nearby_users;
use crate::users::store;

#[derive(Debug, Deserialize)]
pub struct LocationUpdateRequest {
    pub user_id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// POST /api/v1/users/location
pub async fn handle_update_location(
    State(state): State<AppState>,
    Json(req): Json<LocationUpdateRequest>,
) -> Result<StatusCode, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    validate_coordinates(req.latitude, req.longitude)?;

    store::upsert_location(&state.db, req.user_id, &req.name, req.latitude, req.longitude).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct SharingToggleRequest {
    pub user_id: Uuid,
    pub is_sharing: bool,
}

/// PATCH /api/v1/users/sharing
pub async fn handle_toggle_sharing(
    State(state): State<AppState>,
    Json(req): Json<SharingToggleRequest>,
) -> Result<StatusCode, AppError> {
    let updated = store::set_sharing(&state.db, req.user_id, req.is_sharing).await?;
    if !updated {
        return Err(AppError::NotFound(format!(
            "User {} not found",
            req.user_id
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub user_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
}

/// GET /api/v1/users/nearby
///
/// Online users within the configured radius of the given position, in
/// storage iteration order.
pub async fn handle_nearby_users(
    State(state): State<AppState>,
    Query(params): Query<NearbyQuery>,
) -> Result<Json<Vec<UserRow>>, AppError> {
    validate_coordinates(params.latitude, params.longitude)?;

    let candidates = store::list_online(&state.db).await?;
    let nearby = nearby_users(
        params.user_id,
        params.latitude,
        params.longitude,
        &candidates,
        state.config.nearby_radius_meters,
    );
    Ok(Json(nearby))
}
