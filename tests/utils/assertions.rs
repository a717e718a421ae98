//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use slidesync::websockets::{MessageType, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    sessions: Vec<&'a str>,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for every session in the setup
    pub fn for_all_sessions(setup: &'a TestSetup) -> Self {
        let sessions = setup.sessions.iter().map(|s| s.as_str()).collect();
        Self { setup, sessions }
    }

    /// Create an assertion for specific sessions
    pub fn for_sessions(setup: &'a TestSetup, sessions: Vec<&'a str>) -> Self {
        Self { setup, sessions }
    }

    /// Assert that sessions received a specific message type (consumes the message from queue)
    pub async fn received_message_type(self, expected_type: MessageType) -> MessageContent {
        let mut messages = vec![];

        for session in &self.sessions {
            let message = self
                .setup
                .mock_conn_manager
                .consume_message_for(session)
                .await;
            assert!(
                message.is_some(),
                "{} should have received a message",
                session
            );

            let msg: WebSocketMessage = serde_json::from_str(&message.unwrap()).unwrap();
            assert_eq!(
                msg.message_type, expected_type,
                "{} received wrong message type",
                session
            );
            messages.push(msg);
        }

        // A broadcast carries the same payload to every member
        if messages.len() > 1 {
            let first_payload = &messages[0].payload;
            for (i, msg) in messages.iter().enumerate().skip(1) {
                assert_eq!(
                    &msg.payload, first_payload,
                    "Session {} payload differs from session {}",
                    self.sessions[i], self.sessions[0]
                );
            }
        }

        MessageContent {
            payload: messages
                .into_iter()
                .next()
                .map(|msg| msg.payload)
                .unwrap_or_default(),
        }
    }

    /// Assert that sessions have no pending messages
    pub async fn received_no_messages(self) {
        for session in &self.sessions {
            let messages = self.setup.mock_conn_manager.get_messages_for(session).await;
            assert!(
                messages.is_empty(),
                "{} should not have received any messages, got {:?}",
                session,
                messages
            );
        }
    }

    /// Count how many messages of a specific type a session received (non-consuming)
    pub async fn count_message_type(&self, session: &str, msg_type: MessageType) -> usize {
        let messages = self.setup.mock_conn_manager.get_messages_for(session).await;
        messages
            .iter()
            .filter_map(|msg_str| serde_json::from_str::<WebSocketMessage>(msg_str).ok())
            .filter(|msg| msg.message_type == msg_type)
            .count()
    }

    /// Assert that sessions received exactly this sequence of message types (consumes them)
    pub async fn received_message_sequence(
        self,
        expected_types: Vec<MessageType>,
    ) -> Vec<MessageContent> {
        let mut result_messages = vec![];

        for session in &self.sessions {
            let session_messages = self.setup.mock_conn_manager.get_messages_for(session).await;
            let received: Vec<WebSocketMessage> = session_messages
                .iter()
                .enumerate()
                .map(|(i, raw)| {
                    serde_json::from_str(raw).unwrap_or_else(|e| {
                        panic!("Failed to parse message {} for {}: {}", i, session, e)
                    })
                })
                .collect();
            let received_types: Vec<MessageType> =
                received.iter().map(|msg| msg.message_type).collect();

            assert_eq!(
                received_types, expected_types,
                "{} received the wrong message sequence",
                session
            );

            for _ in 0..received.len() {
                self.setup
                    .mock_conn_manager
                    .consume_message_for(session)
                    .await;
            }

            // Only collect messages from the first session to avoid duplicates
            if session == &self.sessions[0] {
                result_messages.extend(received.into_iter().map(|msg| MessageContent {
                    payload: msg.payload,
                }));
            }
        }

        result_messages
    }
}

// ============================================================================
// Message Content Assertions
// ============================================================================

pub struct MessageContent {
    payload: serde_json::Value,
}

impl MessageContent {
    pub fn with_room(self, expected_room: &str) -> Self {
        assert_eq!(self.payload["room_id"], expected_room);
        self
    }

    pub fn with_page(self, expected_page: u32) -> Self {
        assert_eq!(self.payload["page"], expected_page);
        self
    }

    pub fn with_url(self, expected_url: &str) -> Self {
        assert_eq!(self.payload["url"], expected_url);
        self
    }

    /// Assert the roster names in join order
    pub fn with_player_names(self, expected_names: Vec<&str>) -> Self {
        let names: Vec<&str> = self.payload["players"]
            .as_array()
            .expect("players should be an array")
            .iter()
            .map(|player| player["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, expected_names);
        self
    }

    /// Assert the roster session ids in join order
    pub fn with_player_ids(self, expected_ids: Vec<&str>) -> Self {
        let ids: Vec<&str> = self.payload["players"]
            .as_array()
            .expect("players should be an array")
            .iter()
            .map(|player| player["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, expected_ids);
        self
    }
}
