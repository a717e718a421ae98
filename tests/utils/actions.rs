#![allow(dead_code)] // Not every test file uses every action

use tokio::time::{sleep, Duration};

use slidesync::{
    event::SessionEvent,
    websockets::{ConnectionManager, MessageHandler, MessageType, WebSocketMessage},
};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a raw text frame as if it came from a session's socket and wait for processing
    pub async fn send_raw(&self, session_id: &str, message: &str) {
        self.input_handler
            .handle_message(session_id, message.to_string())
            .await;
        sleep(Duration::from_millis(10)).await;
    }

    /// Send a WebSocket message and wait for processing
    pub async fn send_message(&self, session_id: &str, message: WebSocketMessage) {
        let message_json = serde_json::to_string(&message).unwrap();
        self.send_raw(session_id, &message_json).await;
    }

    /// Emit a session event directly and wait for processing
    pub async fn emit_event(&self, event: SessionEvent) {
        self.event_bus.emit(event).await;
        sleep(Duration::from_millis(10)).await;
    }

    /// Clear all recorded messages
    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn join(&self, session_id: &str, room_id: &str, player_name: &str) {
        self.send_message(session_id, WebSocketMessage::join_room(room_id, player_name))
            .await;
    }

    pub async fn next_page(&self, session_id: &str, room_id: &str) {
        self.send_message(session_id, WebSocketMessage::next_page(room_id))
            .await;
    }

    pub async fn prev_page(&self, session_id: &str, room_id: &str) {
        self.send_message(session_id, WebSocketMessage::prev_page(room_id))
            .await;
    }

    /// Go to a page; takes raw JSON so tests can send malformed values
    pub async fn go_to_page(&self, session_id: &str, room_id: &str, page_number: serde_json::Value) {
        self.send_message(
            session_id,
            WebSocketMessage::new(
                MessageType::GoToPage,
                serde_json::json!({ "room_id": room_id, "page_number": page_number }),
            ),
        )
        .await;
    }

    /// Close a session's socket the way the websocket endpoint does
    pub async fn disconnect(&self, session_id: &str) {
        self.mock_conn_manager.remove_connection(session_id).await;
        self.emit_event(SessionEvent::Disconnect {
            session_id: session_id.to_string(),
        })
        .await;
    }

    /// Signal that a document finished uploading
    pub async fn upload_document(&self) {
        self.emit_event(SessionEvent::DocumentUploaded {
            url: "/uploads/slides.pdf".to_string(),
        })
        .await;
    }
}
