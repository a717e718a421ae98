use serde::{Deserialize, Serialize};

use super::models::{Player, RoomModel};

/// Response for room information
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: String,
    pub players: Vec<Player>,
    pub host_id: Option<String>,
    pub current_page: u32,
    pub player_count: usize,
}

impl From<RoomModel> for RoomResponse {
    fn from(room: RoomModel) -> Self {
        Self {
            player_count: room.player_count(),
            current_page: room.current_page.get(),
            id: room.id,
            players: room.players,
            host_id: room.host,
        }
    }
}
