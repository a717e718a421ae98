use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::{
    room::Delivery,
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("Failed to serialize message: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Turns room deliveries into websocket frames and fans them out
#[derive(Clone)]
pub struct MessageBroadcaster {
    connection_manager: Arc<dyn ConnectionManager>,
}

impl MessageBroadcaster {
    pub fn new(connection_manager: Arc<dyn ConnectionManager>) -> Self {
        Self { connection_manager }
    }

    pub async fn deliver(&self, delivery: &Delivery) -> Result<(), BroadcastError> {
        let message = WebSocketMessage::from(delivery.notification());
        let message_json = serde_json::to_string(&message)?;

        match delivery {
            Delivery::Private { session, .. } => {
                self.connection_manager
                    .send_to_session(session, &message_json)
                    .await;
            }
            Delivery::Broadcast {
                room_id, members, ..
            } => {
                debug!(
                    room_id = %room_id,
                    recipients = members.len(),
                    message_type = ?message.message_type,
                    "Broadcasting to room"
                );
                self.connection_manager
                    .send_to_sessions(members, &message_json)
                    .await;
            }
        }

        Ok(())
    }
}
