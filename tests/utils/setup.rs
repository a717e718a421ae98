use std::sync::Arc;
use tokio::task::JoinHandle;

use slidesync::{
    event::{EventBus, EventDispatcher},
    room::{HostElection, RoomRegistry, RoomService},
    websockets::{MessageBroadcaster, WebsocketReceiveHandler},
};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub event_bus: EventBus,
    pub room_service: Arc<RoomService>,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub input_handler: WebsocketReceiveHandler,
    pub sessions: Vec<String>,
    pub _dispatcher_handle: JoinHandle<()>,
}

pub struct TestSetupBuilder {
    sessions: Vec<String>,
    election: HostElection,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            sessions: vec![],
            election: HostElection::default(),
        }
    }

    /// Sessions that are connected (but not yet in any room) when the test starts
    pub fn with_sessions(mut self, sessions: Vec<&str>) -> Self {
        self.sessions = sessions.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_sessions(self) -> Self {
        self.with_sessions(vec!["s1", "s2"])
    }

    pub fn with_four_sessions(self) -> Self {
        self.with_sessions(vec!["s1", "s2", "s3", "s4"])
    }

    pub fn with_host_election(mut self, election: HostElection) -> Self {
        self.election = election;
        self
    }

    pub async fn build(self) -> TestSetup {
        let (event_bus, receiver) = EventBus::new(64);
        let room_service = Arc::new(RoomService::new(RoomRegistry::new(self.election)));
        let mock_conn_manager = Arc::new(MockConnectionManager::new());

        for session in &self.sessions {
            mock_conn_manager.add_connected_session(session).await;
        }

        let dispatcher = EventDispatcher::new(
            room_service.clone(),
            MessageBroadcaster::new(mock_conn_manager.clone()),
        );
        let dispatcher_handle = dispatcher.start(receiver);

        let input_handler = WebsocketReceiveHandler::new(event_bus.clone());

        TestSetup {
            event_bus,
            room_service,
            mock_conn_manager,
            input_handler,
            sessions: self.sessions,
            _dispatcher_handle: dispatcher_handle,
        }
    }
}
