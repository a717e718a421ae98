use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::types::RoomResponse;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing all rooms
///
/// GET /rooms
/// Returns every room the process has seen, including empty ones
#[instrument(name = "list_rooms", skip(state))]
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomResponse>>, AppError> {
    let rooms: Vec<RoomResponse> = state
        .room_service
        .list_rooms()
        .await
        .into_iter()
        .map(RoomResponse::from)
        .collect();

    info!(room_count = rooms.len(), "Rooms listed successfully");

    Ok(Json(rooms))
}

/// HTTP handler for a single room's roster, host and page
///
/// GET /rooms/:room_id
#[instrument(name = "get_room", skip(state))]
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomResponse>, AppError> {
    let room = state
        .room_service
        .get_room(&room_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))?;

    Ok(Json(RoomResponse::from(room)))
}
