use std::collections::HashMap;

use super::models::RoomModel;

/// Room id that only a specific player name can host
pub const DEFAULT_RESERVED_ROOM: &str = "tcs";
/// Player name that becomes host of the default reserved room
pub const DEFAULT_RESERVED_HOST_NAME: &str = "tcshost";

/// How a room picks its host when someone joins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRule<'a> {
    /// The first session to join an unhosted room becomes host
    FirstJoiner,
    /// Only a joiner with this exact name becomes host, replacing any current host
    Reserved { host_name: &'a str },
}

impl HostRule<'_> {
    /// Whether a player named `player_name` joining `room` takes host
    pub fn grants_host(&self, room: &RoomModel, player_name: &str) -> bool {
        match self {
            HostRule::FirstJoiner => room.host.is_none(),
            HostRule::Reserved { host_name } => player_name == *host_name,
        }
    }
}

/// Host election settings shared by every room in a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostElection {
    /// room id -> reserved host name
    reserved: HashMap<String, String>,
}

impl Default for HostElection {
    fn default() -> Self {
        Self::new().with_reserved_room(DEFAULT_RESERVED_ROOM, DEFAULT_RESERVED_HOST_NAME)
    }
}

impl HostElection {
    /// First-joiner election everywhere, no reserved rooms
    pub fn new() -> Self {
        Self {
            reserved: HashMap::new(),
        }
    }

    pub fn with_reserved_room(
        mut self,
        room_id: impl Into<String>,
        host_name: impl Into<String>,
    ) -> Self {
        self.reserved.insert(room_id.into(), host_name.into());
        self
    }

    pub fn rule_for(&self, room_id: &str) -> HostRule<'_> {
        match self.reserved.get(room_id) {
            Some(host_name) => HostRule::Reserved { host_name },
            None => HostRule::FirstJoiner,
        }
    }
}
