// Public API
pub use broadcaster::{BroadcastError, MessageBroadcaster};
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use handler::{parse_client_message, websocket_handler, InboundError, WebsocketReceiveHandler};
pub use messages::{MessageType, WebSocketMessage};
pub use socket::{Connection, MessageHandler, SocketError, SocketWrapper};

// Internal modules
mod broadcaster;
mod connection_manager;
mod handler;
pub mod messages;
mod socket;
