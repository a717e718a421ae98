use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use slidesync::websockets::ConnectionManager;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Records every outbound frame per session instead of writing to sockets
#[derive(Clone)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<String, VecDeque<String>>>>,
    connected_sessions: Arc<RwLock<Vec<String>>>,
}

#[allow(dead_code)]
impl MockConnectionManager {
    pub fn new() -> Self {
        Self {
            sent_messages: Arc::new(RwLock::new(HashMap::new())),
            connected_sessions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn add_connected_session(&self, session_id: &str) {
        self.connected_sessions
            .write()
            .await
            .push(session_id.to_string());
    }

    pub async fn is_connected(&self, session_id: &str) -> bool {
        self.connected_sessions
            .read()
            .await
            .iter()
            .any(|s| s == session_id)
    }

    pub async fn get_messages_for(&self, session_id: &str) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(session_id)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Removes and returns the oldest message sent to a session
    pub async fn consume_message_for(&self, session_id: &str) -> Option<String> {
        self.sent_messages
            .write()
            .await
            .get_mut(session_id)
            .and_then(|queue| queue.pop_front())
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, session_id: String, _sender: mpsc::UnboundedSender<String>) {
        self.add_connected_session(&session_id).await;
    }

    async fn remove_connection(&self, session_id: &str) {
        self.connected_sessions
            .write()
            .await
            .retain(|s| s != session_id);
    }

    async fn send_to_session(&self, session_id: &str, message: &str) {
        // Mirror the real manager: closed sessions get nothing
        if !self.is_connected(session_id).await {
            return;
        }
        self.sent_messages
            .write()
            .await
            .entry(session_id.to_string())
            .or_default()
            .push_back(message.to_string());
    }

    async fn send_to_sessions(&self, session_ids: &[String], message: &str) {
        for session_id in session_ids {
            self.send_to_session(session_id, message).await;
        }
    }
}
