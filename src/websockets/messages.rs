use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum_macros::EnumIter;

use crate::room::{Player, RoomNotification};

/// Message types for WebSocket communication
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    // Client -> Server
    JoinRoom,
    NextPage,
    PrevPage,
    GoToPage,

    // Server -> Client
    Welcome,
    HostAssigned,
    PlayersUpdated,
    DocumentReady,
    PageChanged,
}

impl MessageType {
    /// Whether clients are allowed to send this type
    pub fn is_client_message(self) -> bool {
        matches!(
            self,
            MessageType::JoinRoom
                | MessageType::NextPage
                | MessageType::PrevPage
                | MessageType::GoToPage
        )
    }
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
    pub session_id: Option<String>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub meta: Option<WebSocketMessageMeta>,
}

/// Client-to-Server message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomPayload {
    pub room_id: String,
    pub player_name: String,
}

/// Payload for NEXT_PAGE and PREV_PAGE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomPayload {
    pub room_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoToPagePayload {
    pub room_id: String,
    /// Must be a JSON integer; range is checked when the event is applied
    pub page_number: i64,
}

/// Server-to-Client message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomePayload {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostAssignedPayload {
    pub room_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayersUpdatedPayload {
    pub room_id: String,
    /// Roster in join order
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReadyPayload {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageChangedPayload {
    pub room_id: String,
    pub page: u32,
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
                session_id: None,
            }),
        }
    }

    /// Create a WELCOME message
    pub fn welcome(session_id: &str) -> Self {
        Self::new(MessageType::Welcome, json!({ "session_id": session_id }))
    }

    /// Create a HOST_ASSIGNED message
    pub fn host_assigned(room_id: &str) -> Self {
        Self::new(MessageType::HostAssigned, json!({ "room_id": room_id }))
    }

    /// Create a PLAYERS_UPDATED message
    pub fn players_updated(room_id: &str, players: &[Player]) -> Self {
        Self::new(
            MessageType::PlayersUpdated,
            json!({ "room_id": room_id, "players": players }),
        )
    }

    /// Create a DOCUMENT_READY message
    pub fn document_ready(url: &str) -> Self {
        Self::new(MessageType::DocumentReady, json!({ "url": url }))
    }

    /// Create a PAGE_CHANGED message
    pub fn page_changed(room_id: &str, page: u32) -> Self {
        Self::new(
            MessageType::PageChanged,
            json!({ "room_id": room_id, "page": page }),
        )
    }

    /// Create a JOIN_ROOM message
    pub fn join_room(room_id: &str, player_name: &str) -> Self {
        Self::new(
            MessageType::JoinRoom,
            json!({ "room_id": room_id, "player_name": player_name }),
        )
    }

    /// Create a NEXT_PAGE message
    pub fn next_page(room_id: &str) -> Self {
        Self::new(MessageType::NextPage, json!({ "room_id": room_id }))
    }

    /// Create a PREV_PAGE message
    pub fn prev_page(room_id: &str) -> Self {
        Self::new(MessageType::PrevPage, json!({ "room_id": room_id }))
    }

    /// Create a GO_TO_PAGE message
    pub fn go_to_page(room_id: &str, page_number: i64) -> Self {
        Self::new(
            MessageType::GoToPage,
            json!({ "room_id": room_id, "page_number": page_number }),
        )
    }
}

impl From<&RoomNotification> for WebSocketMessage {
    fn from(notification: &RoomNotification) -> Self {
        match notification {
            RoomNotification::HostAssigned { room_id } => Self::host_assigned(room_id),
            RoomNotification::PlayersUpdated { room_id, players } => {
                Self::players_updated(room_id, players)
            }
            RoomNotification::DocumentReady { url } => Self::document_ready(url),
            RoomNotification::PageChanged { room_id, page } => {
                Self::page_changed(room_id, page.get())
            }
        }
    }
}
