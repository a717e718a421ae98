use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::events::SessionEvent;
use crate::room::RoomService;
use crate::websockets::MessageBroadcaster;

/// Applies session events to the rooms and delivers the resulting notifications
///
/// Events are handled strictly one at a time: an event's state change and
/// all of its deliveries complete before the next event is looked at.
pub struct EventDispatcher {
    room_service: Arc<RoomService>,
    broadcaster: MessageBroadcaster,
}

impl EventDispatcher {
    pub fn new(room_service: Arc<RoomService>, broadcaster: MessageBroadcaster) -> Self {
        Self {
            room_service,
            broadcaster,
        }
    }

    /// Handles one event to completion
    pub async fn dispatch(&self, event: SessionEvent) {
        let event_type = event.event_type();
        debug!(
            event_type = event_type,
            room_id = ?event.room_id(),
            session_id = ?event.session_id(),
            "Dispatching session event"
        );

        let deliveries = self.room_service.apply(&event).await;

        for delivery in &deliveries {
            if let Err(e) = self.broadcaster.deliver(delivery).await {
                error!(event_type = event_type, error = %e, "Failed to deliver notification");
            }
        }
    }

    /// Start the dispatcher - spawns a background task that drains the event queue
    ///
    /// The task ends once every `EventBus` handle has been dropped.
    pub fn start(self, mut receiver: mpsc::Receiver<SessionEvent>) -> JoinHandle<()> {
        info!("Starting event dispatcher");

        tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                self.dispatch(event).await;
            }

            info!("Event dispatcher stopped, no more producers");
        })
    }
}
