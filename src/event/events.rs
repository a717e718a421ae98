use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;

use crate::room::models::SessionId;

/// Inbound events that drive room state
///
/// Every event is applied to the registry atomically and in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SessionEvent {
    /// A session asks to join (or create) a room under a display name
    Join {
        session_id: SessionId,
        room_id: String,
        player_name: String,
    },

    /// Advance the room one page
    NextPage {
        session_id: SessionId,
        room_id: String,
    },

    /// Step the room back one page
    PrevPage {
        session_id: SessionId,
        room_id: String,
    },

    /// Jump the room to an arbitrary page. The value is validated when applied.
    GoToPage {
        session_id: SessionId,
        room_id: String,
        page_number: i64,
    },

    /// A session's connection has gone away
    Disconnect { session_id: SessionId },

    /// A new shared document has been fully stored and is readable at `url`
    DocumentUploaded { url: String },
}

impl SessionEvent {
    /// Room this event targets, if it targets exactly one
    pub fn room_id(&self) -> Option<&str> {
        match self {
            SessionEvent::Join { room_id, .. }
            | SessionEvent::NextPage { room_id, .. }
            | SessionEvent::PrevPage { room_id, .. }
            | SessionEvent::GoToPage { room_id, .. } => Some(room_id),
            SessionEvent::Disconnect { .. } | SessionEvent::DocumentUploaded { .. } => None,
        }
    }

    /// Session that caused this event, if any
    pub fn session_id(&self) -> Option<&str> {
        match self {
            SessionEvent::Join { session_id, .. }
            | SessionEvent::NextPage { session_id, .. }
            | SessionEvent::PrevPage { session_id, .. }
            | SessionEvent::GoToPage { session_id, .. }
            | SessionEvent::Disconnect { session_id } => Some(session_id),
            SessionEvent::DocumentUploaded { .. } => None,
        }
    }

    /// Stable name for logging
    pub fn event_type(&self) -> &'static str {
        self.into()
    }
}
