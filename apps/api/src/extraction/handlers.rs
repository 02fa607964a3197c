use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extract;
use crate::geo::validate_coordinates;
use crate::models::spot::{NewSpot, SpotRow};
use crate::spots::store::insert_spot;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub message: String,
    pub latitude: f64,
    pub longitude: f64,
    pub user_id: Uuid,
}

/// POST /api/v1/spots/extract
///
/// Runs the extraction pipeline over the submitted text and persists the
/// resulting spot at the submitted coordinates. Returns the stored row.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<SpotRow>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation(
            "message must not be empty".to_string(),
        ));
    }
    validate_coordinates(req.latitude, req.longitude)?;

    let record = extract(&req.message, state.llm.as_ref()).await;

    let spot = insert_spot(
        &state.db,
        &NewSpot {
            user_id: req.user_id,
            latitude: req.latitude,
            longitude: req.longitude,
            fish_type: record.fish_type,
            bait: record.bait,
            environment: record.environment,
            rod: record.rod,
        },
    )
    .await?;

    Ok(Json(spot))
}
