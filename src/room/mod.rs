// Public API - what other modules can use
pub use handlers::{get_room, list_rooms};
pub use models::{DocumentRef, PageNumber, Player, RoomModel, SessionId};
pub use notifications::{Delivery, RoomNotification};
pub use policy::{HostElection, HostRule};
pub use registry::RoomRegistry;
pub use service::RoomService;

// Internal modules
mod handlers;
pub mod models;
pub mod notifications;
pub mod policy;
pub mod registry;
mod service;
pub mod types;
