use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::exchange::reconcile::copy_novel_spots;
use crate::exchange::store;
use crate::models::exchange::ExchangeRequestView;
use crate::state::AppState;
use crate::users::store::get_user;

#[derive(Debug, Deserialize)]
pub struct MergeRequest {
    pub user_id: Uuid,
    pub peer_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MergeResponse {
    pub candidates: usize,
    pub merged: usize,
}

/// POST /api/v1/spots/merge
///
/// Pulls the peer's spot collection into the requesting user's own,
/// inserting only records not already present. Partial success is reported
/// as the count actually merged.
pub async fn handle_merge(
    State(state): State<AppState>,
    Json(req): Json<MergeRequest>,
) -> Result<Json<MergeResponse>, AppError> {
    if req.user_id == req.peer_id {
        return Err(AppError::Validation(
            "cannot merge your own spots".to_string(),
        ));
    }

    let peer = get_user(&state.db, req.peer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", req.peer_id)))?;
    if !peer.is_sharing {
        return Err(AppError::Forbidden(
            "peer has not enabled spot sharing".to_string(),
        ));
    }

    let outcome = copy_novel_spots(&state.db, req.peer_id, req.user_id).await?;

    Ok(Json(MergeResponse {
        candidates: outcome.candidates,
        merged: outcome.merged,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SendExchangeRequest {
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SendExchangeResponse {
    pub success: bool,
    pub request_id: i64,
}

/// POST /api/v1/exchange
pub async fn handle_send_request(
    State(state): State<AppState>,
    Json(req): Json<SendExchangeRequest>,
) -> Result<Json<SendExchangeResponse>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation(
            "message must not be empty".to_string(),
        ));
    }
    if req.from_user_id == req.to_user_id {
        return Err(AppError::Validation(
            "cannot send an exchange request to yourself".to_string(),
        ));
    }

    let request =
        store::insert_request(&state.db, req.from_user_id, req.to_user_id, &req.message).await?;

    Ok(Json(SendExchangeResponse {
        success: true,
        request_id: request.id,
    }))
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/exchange
pub async fn handle_list_requests(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ExchangeRequestView>>, AppError> {
    let requests = store::list_requests_for(&state.db, params.user_id).await?;
    Ok(Json(requests))
}
