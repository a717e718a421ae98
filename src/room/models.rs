use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque per-connection identifier assigned by the websocket layer
pub type SessionId = String;

/// A connected client inside a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: SessionId,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<SessionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Page number out of range: {0}")]
    OutOfRange(i64),
}

/// 1-indexed page of the shared document. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct PageNumber(u32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    pub fn new(value: i64) -> Result<Self, PageError> {
        match u32::try_from(value) {
            Ok(page) if page >= 1 => Ok(Self(page)),
            _ => Err(PageError::OutOfRange(value)),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Following page, or `None` if the counter would overflow
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Preceding page, or `None` at page 1
    pub fn prev(self) -> Option<Self> {
        if self.0 > 1 {
            Some(Self(self.0 - 1))
        } else {
            None
        }
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<i64> for PageNumber {
    type Error = PageError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for u32 {
    fn from(page: PageNumber) -> Self {
        page.0
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The shared slide document, one per deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Public location clients fetch the document from
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl DocumentRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            uploaded_at: Utc::now(),
        }
    }
}

/// In-memory state of a single room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomModel {
    pub id: String,
    /// Join order, unique by session id
    pub players: Vec<Player>,
    /// Session id of the host; always refers to an entry in `players`
    pub host: Option<SessionId>,
    pub current_page: PageNumber,
}

impl RoomModel {
    /// Creates an empty room on page 1 with no host
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            players: Vec::new(),
            host: None,
            current_page: PageNumber::FIRST,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn has_player(&self, session_id: &str) -> bool {
        self.players.iter().any(|p| p.id == session_id)
    }

    pub fn is_host(&self, session_id: &str) -> bool {
        self.host.as_deref() == Some(session_id)
    }

    /// Session ids of everyone currently in the room, in join order
    pub fn member_ids(&self) -> Vec<SessionId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    /// Adds a player unless that session is already present. Returns true if added.
    pub fn add_player(&mut self, player: Player) -> bool {
        if self.has_player(&player.id) {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Removes a session from the roster, clearing host if it held it.
    /// Returns true if a player was removed.
    pub fn remove_player(&mut self, session_id: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != session_id);
        if self.is_host(session_id) {
            self.host = None;
        }
        self.players.len() != before
    }

    /// Makes `session_id` host. Ignored if the session is not in the roster.
    pub fn set_host(&mut self, session_id: &str) -> bool {
        if !self.has_player(session_id) {
            return false;
        }
        self.host = Some(session_id.to_string());
        true
    }
}
