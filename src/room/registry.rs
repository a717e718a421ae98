use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

use super::{
    models::{DocumentRef, PageNumber, Player, RoomModel},
    notifications::{Delivery, RoomNotification},
    policy::HostElection,
};
use crate::event::SessionEvent;

/// Process-wide table of rooms and the shared document
///
/// All state transitions live here. Operations never fail: anything that
/// does not apply (unknown room, no document, page floor, bad page value)
/// is a logged no-op that produces no deliveries.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: BTreeMap<String, RoomModel>,
    election: HostElection,
    document: Option<DocumentRef>,
}

impl RoomRegistry {
    pub fn new(election: HostElection) -> Self {
        Self {
            rooms: BTreeMap::new(),
            election,
            document: None,
        }
    }

    pub fn room(&self, room_id: &str) -> Option<&RoomModel> {
        self.rooms.get(room_id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &RoomModel> {
        self.rooms.values()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn document(&self) -> Option<&DocumentRef> {
        self.document.as_ref()
    }

    /// Applies one inbound event and returns the notifications it produced, in order
    pub fn apply(&mut self, event: &SessionEvent) -> Vec<Delivery> {
        match event {
            SessionEvent::Join {
                session_id,
                room_id,
                player_name,
            } => self.join(room_id, player_name, session_id),
            SessionEvent::NextPage { room_id, .. } => self.next_page(room_id),
            SessionEvent::PrevPage { room_id, .. } => self.prev_page(room_id),
            SessionEvent::GoToPage {
                room_id,
                page_number,
                ..
            } => self.go_to_page(room_id, *page_number),
            SessionEvent::Disconnect { session_id } => self.disconnect(session_id),
            SessionEvent::DocumentUploaded { url } => self.document_uploaded(url),
        }
    }

    #[instrument(skip(self))]
    pub fn join(&mut self, room_id: &str, player_name: &str, session_id: &str) -> Vec<Delivery> {
        let room = self.rooms.entry(room_id.to_string()).or_insert_with(|| {
            info!(room_id = %room_id, "Creating room");
            RoomModel::new(room_id)
        });

        if !room.add_player(Player::new(session_id, player_name)) {
            debug!(room_id = %room_id, session_id = %session_id, "Session already in room");
        }

        if self
            .election
            .rule_for(room_id)
            .grants_host(room, player_name)
            && !room.is_host(session_id)
        {
            if let Some(previous) = &room.host {
                info!(
                    room_id = %room_id,
                    previous_host = %previous,
                    new_host = %session_id,
                    "Reserved host name replaces current host"
                );
            }
            room.set_host(session_id);
            info!(room_id = %room_id, session_id = %session_id, "Host assigned");
        }

        let mut deliveries = Vec::with_capacity(4);

        if room.is_host(session_id) {
            deliveries.push(Delivery::Private {
                session: session_id.to_string(),
                notification: RoomNotification::HostAssigned {
                    room_id: room_id.to_string(),
                },
            });
        }

        deliveries.push(players_updated(room));

        if let Some(document) = &self.document {
            deliveries.push(Delivery::Private {
                session: session_id.to_string(),
                notification: RoomNotification::DocumentReady {
                    url: document.url.clone(),
                },
            });
            deliveries.push(Delivery::Private {
                session: session_id.to_string(),
                notification: RoomNotification::PageChanged {
                    room_id: room_id.to_string(),
                    page: room.current_page,
                },
            });
        }

        info!(
            room_id = %room_id,
            session_id = %session_id,
            player_name = %player_name,
            player_count = room.player_count(),
            "Player joined room"
        );

        deliveries
    }

    #[instrument(skip(self))]
    pub fn next_page(&mut self, room_id: &str) -> Vec<Delivery> {
        let Some(room) = self.rooms.get_mut(room_id) else {
            debug!(room_id = %room_id, "Ignoring next page for unknown room");
            return Vec::new();
        };
        if self.document.is_none() {
            debug!(room_id = %room_id, "Ignoring next page, no document available");
            return Vec::new();
        }
        let Some(next) = room.current_page.next() else {
            warn!(room_id = %room_id, page = %room.current_page, "Page counter at maximum");
            return Vec::new();
        };

        room.current_page = next;
        debug!(room_id = %room_id, page = %next, "Advanced page");
        vec![page_changed(room)]
    }

    #[instrument(skip(self))]
    pub fn prev_page(&mut self, room_id: &str) -> Vec<Delivery> {
        let Some(room) = self.rooms.get_mut(room_id) else {
            debug!(room_id = %room_id, "Ignoring previous page for unknown room");
            return Vec::new();
        };
        let Some(prev) = room.current_page.prev() else {
            debug!(room_id = %room_id, "Already on first page");
            return Vec::new();
        };

        room.current_page = prev;
        debug!(room_id = %room_id, page = %prev, "Went back a page");
        vec![page_changed(room)]
    }

    #[instrument(skip(self))]
    pub fn go_to_page(&mut self, room_id: &str, page_number: i64) -> Vec<Delivery> {
        let Some(room) = self.rooms.get_mut(room_id) else {
            debug!(room_id = %room_id, "Ignoring go to page for unknown room");
            return Vec::new();
        };
        if self.document.is_none() {
            debug!(room_id = %room_id, "Ignoring go to page, no document available");
            return Vec::new();
        }
        let page = match PageNumber::new(page_number) {
            Ok(page) => page,
            Err(e) => {
                warn!(room_id = %room_id, error = %e, "Rejected page change");
                return Vec::new();
            }
        };

        room.current_page = page;
        debug!(room_id = %room_id, page = %page, "Jumped to page");
        vec![page_changed(room)]
    }

    /// Removes a session from every room and rebroadcasts every roster
    #[instrument(skip(self))]
    pub fn disconnect(&mut self, session_id: &str) -> Vec<Delivery> {
        let mut deliveries = Vec::with_capacity(self.rooms.len());

        for room in self.rooms.values_mut() {
            let was_host = room.is_host(session_id);
            if room.remove_player(session_id) {
                info!(
                    room_id = %room.id,
                    session_id = %session_id,
                    player_count = room.player_count(),
                    "Player left room"
                );
            }
            if was_host {
                info!(room_id = %room.id, session_id = %session_id, "Host left, room has no host");
            }
            deliveries.push(players_updated(room));
        }

        deliveries
    }

    /// Records a newly stored document. Existing rooms pick it up on their next join.
    #[instrument(skip(self))]
    pub fn document_uploaded(&mut self, url: &str) -> Vec<Delivery> {
        let document = DocumentRef::new(url);
        info!(url = %document.url, uploaded_at = %document.uploaded_at, "Document available");
        self.document = Some(document);
        Vec::new()
    }
}

fn players_updated(room: &RoomModel) -> Delivery {
    Delivery::Broadcast {
        room_id: room.id.clone(),
        members: room.member_ids(),
        notification: RoomNotification::PlayersUpdated {
            room_id: room.id.clone(),
            players: room.players.clone(),
        },
    }
}

fn page_changed(room: &RoomModel) -> Delivery {
    Delivery::Broadcast {
        room_id: room.id.clone(),
        members: room.member_ids(),
        notification: RoomNotification::PageChanged {
            room_id: room.id.clone(),
            page: room.current_page,
        },
    }
}
