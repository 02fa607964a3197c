use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::geo::validate_coordinates;
use crate::models::spot::{NewSpot, SpotRow};
use crate::spots::store;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/spots
pub async fn handle_list_spots(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<SpotRow>>, AppError> {
    let spots = store::list_spots(&state.db, params.user_id).await?;
    Ok(Json(spots))
}

#[derive(Debug, Deserialize)]
pub struct AddSpotRequest {
    pub user_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub fish_type: Option<String>,
    pub bait: Option<String>,
    pub environment: Option<String>,
    pub rod: Option<String>,
}

/// POST /api/v1/spots
///
/// Direct insert with already-structured fields, bypassing extraction.
pub async fn handle_add_spot(
    State(state): State<AppState>,
    Json(req): Json<AddSpotRequest>,
) -> Result<Json<SpotRow>, AppError> {
    validate_coordinates(req.latitude, req.longitude)?;

    let spot = store::insert_spot(
        &state.db,
        &NewSpot {
            user_id: req.user_id,
            latitude: req.latitude,
            longitude: req.longitude,
            fish_type: req.fish_type,
            bait: req.bait,
            environment: req.environment,
            rod: req.rod,
        },
    )
    .await?;

    Ok(Json(spot))
}

/// DELETE /api/v1/spots/:id
pub async fn handle_delete_spot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let deleted = store::delete_spot(&state.db, id, params.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!(
            "Spot {id} not found for this user"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
