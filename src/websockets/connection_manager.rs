use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// Outbound delivery to connected sessions
///
/// Delivery is fire-and-forget: unknown or closed sessions are skipped.
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(&self, session_id: String, sender: mpsc::UnboundedSender<String>);

    async fn remove_connection(&self, session_id: &str);

    async fn send_to_session(&self, session_id: &str, message: &str);

    async fn send_to_sessions(&self, session_ids: &[String], message: &str);
}

pub struct InMemoryConnectionManager {
    // session id -> sender
    connections: Arc<RwLock<HashMap<String, mpsc::UnboundedSender<String>>>>,
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(&self, session_id: String, sender: mpsc::UnboundedSender<String>) {
        let mut connections = self.connections.write().await;
        connections.insert(session_id, sender);
    }

    async fn remove_connection(&self, session_id: &str) {
        let mut connections = self.connections.write().await;
        connections.remove(session_id);
    }

    async fn send_to_session(&self, session_id: &str, message: &str) {
        let connections = self.connections.read().await;
        match connections.get(session_id) {
            Some(sender) => {
                if sender.send(message.to_string()).is_err() {
                    debug!(session_id = %session_id, "Dropped message for closed connection");
                }
            }
            None => debug!(session_id = %session_id, "No connection for session"),
        }
    }

    async fn send_to_sessions(&self, session_ids: &[String], message: &str) {
        let connections = self.connections.read().await;
        for session_id in session_ids {
            if let Some(sender) = connections.get(session_id) {
                let _ = sender.send(message.to_string());
            }
        }
    }
}
