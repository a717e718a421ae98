use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::events::SessionEvent;

/// Event bus feeding inbound session events to the dispatcher
///
/// Every producer (websocket connections, the upload handler) holds a clone.
/// Events are queued in arrival order and consumed by a single dispatcher.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: mpsc::Sender<SessionEvent>,
}

impl EventBus {
    /// Creates a bus with the given queue capacity and returns the consuming end with it
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<SessionEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// Queues an event for the dispatcher
    pub async fn emit(&self, event: SessionEvent) {
        let event_type = event.event_type();
        match self.sender.send(event).await {
            Ok(()) => debug!(event_type = event_type, "Session event queued"),
            Err(_) => warn!(
                event_type = event_type,
                "Session event dropped, dispatcher is not running"
            ),
        }
    }
}
