// Library crate for the slide sync server
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod event;
pub mod room;
pub mod shared;
pub mod upload;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use config::ServerConfig;
pub use event::{EventBus, EventDispatcher, SessionEvent};
pub use room::{RoomModel, RoomRegistry, RoomService};
pub use shared::{AppError, AppState};
pub use upload::DocumentStore;
pub use websockets::{
    ConnectionManager, InMemoryConnectionManager, MessageBroadcaster, MessageHandler,
    MessageType, WebSocketMessage, WebsocketReceiveHandler,
};
