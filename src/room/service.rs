use tokio::sync::Mutex;
use tracing::{debug, instrument};

use super::{
    models::{DocumentRef, RoomModel},
    notifications::Delivery,
    registry::RoomRegistry,
};
use crate::event::SessionEvent;

/// Shared access to the room registry
///
/// One coarse lock guards the whole registry so that each event's
/// join/navigate/disconnect sequence is applied without interleaving.
pub struct RoomService {
    registry: Mutex<RoomRegistry>,
}

impl Default for RoomService {
    fn default() -> Self {
        Self::new(RoomRegistry::default())
    }
}

impl RoomService {
    pub fn new(registry: RoomRegistry) -> Self {
        Self {
            registry: Mutex::new(registry),
        }
    }

    /// Applies an event to the registry and returns what must be delivered
    #[instrument(skip(self, event), fields(event_type = event.event_type()))]
    pub async fn apply(&self, event: &SessionEvent) -> Vec<Delivery> {
        let mut registry = self.registry.lock().await;
        let deliveries = registry.apply(event);
        debug!(deliveries = deliveries.len(), "Event applied");
        deliveries
    }

    /// Snapshot of a single room
    pub async fn get_room(&self, room_id: &str) -> Option<RoomModel> {
        self.registry.lock().await.room(room_id).cloned()
    }

    /// Snapshot of every room, ordered by id
    pub async fn list_rooms(&self) -> Vec<RoomModel> {
        self.registry.lock().await.rooms().cloned().collect()
    }

    pub async fn document(&self) -> Option<DocumentRef> {
        self.registry.lock().await.document().cloned()
    }
}
