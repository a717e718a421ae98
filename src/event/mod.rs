// Event-driven plumbing between connections and the room registry
//
// Producers push `SessionEvent`s onto the `EventBus`; a single
// `EventDispatcher` task applies them in order and delivers the results.

// Public API - what other modules can use
pub use bus::EventBus;
pub use dispatcher::EventDispatcher;
pub use events::SessionEvent;

// Internal modules
mod bus;
mod dispatcher;
mod events;
