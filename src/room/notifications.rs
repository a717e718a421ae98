use serde::{Deserialize, Serialize};

use super::models::{PageNumber, Player, SessionId};

/// Something a room tells its members after a state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoomNotification {
    /// The recipient is now host of `room_id`
    HostAssigned { room_id: String },
    /// Full roster of `room_id` in join order
    PlayersUpdated {
        room_id: String,
        players: Vec<Player>,
    },
    /// The shared document can be fetched from `url`
    DocumentReady { url: String },
    /// `room_id` is now showing `page`
    PageChanged { room_id: String, page: PageNumber },
}

/// Who a notification goes to
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// Single session
    Private {
        session: SessionId,
        notification: RoomNotification,
    },
    /// Every member of a room, as of the moment the notification was produced
    Broadcast {
        room_id: String,
        members: Vec<SessionId>,
        notification: RoomNotification,
    },
}

impl Delivery {
    pub fn notification(&self) -> &RoomNotification {
        match self {
            Delivery::Private { notification, .. } => notification,
            Delivery::Broadcast { notification, .. } => notification,
        }
    }

    /// Sessions that should receive this delivery
    pub fn recipients(&self) -> &[SessionId] {
        match self {
            Delivery::Private { session, .. } => std::slice::from_ref(session),
            Delivery::Broadcast { members, .. } => members,
        }
    }
}
