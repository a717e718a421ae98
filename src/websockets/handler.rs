use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::event::{EventBus, SessionEvent};
use crate::shared::AppState;
use crate::websockets::messages::{
    GoToPagePayload, JoinRoomPayload, MessageType, RoomPayload, WebSocketMessage,
};

use super::socket::{Connection, MessageHandler};

/// Why an inbound frame did not become a session event
#[derive(Debug, Error)]
pub enum InboundError {
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Message type {0:?} cannot be sent by clients")]
    NotAccepted(MessageType),
}

/// Parses a client frame into the event it requests
pub fn parse_client_message(session_id: &str, message: &str) -> Result<SessionEvent, InboundError> {
    let ws_message: WebSocketMessage = serde_json::from_str(message)?;
    let session_id = session_id.to_string();

    let event = match ws_message.message_type {
        MessageType::JoinRoom => {
            let payload: JoinRoomPayload = serde_json::from_value(ws_message.payload)?;
            SessionEvent::Join {
                session_id,
                room_id: payload.room_id,
                player_name: payload.player_name,
            }
        }
        MessageType::NextPage => {
            let payload: RoomPayload = serde_json::from_value(ws_message.payload)?;
            SessionEvent::NextPage {
                session_id,
                room_id: payload.room_id,
            }
        }
        MessageType::PrevPage => {
            let payload: RoomPayload = serde_json::from_value(ws_message.payload)?;
            SessionEvent::PrevPage {
                session_id,
                room_id: payload.room_id,
            }
        }
        MessageType::GoToPage => {
            let payload: GoToPagePayload = serde_json::from_value(ws_message.payload)?;
            SessionEvent::GoToPage {
                session_id,
                room_id: payload.room_id,
                page_number: payload.page_number,
            }
        }
        other => return Err(InboundError::NotAccepted(other)),
    };

    Ok(event)
}

/// Message handler for receiving WebSocket messages from the client
pub struct WebsocketReceiveHandler {
    event_bus: EventBus,
}

impl WebsocketReceiveHandler {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, session_id: &str, message: String) {
        debug!(
            session_id = %session_id,
            message = %message,
            "Received message"
        );

        match parse_client_message(session_id, &message) {
            Ok(event) => self.event_bus.emit(event).await,
            Err(e) => {
                warn!(
                    session_id = %session_id,
                    error = %e,
                    "Ignoring client message"
                );
            }
        }
    }
}

/// WebSocket endpoint
///
/// GET /ws
/// Each upgraded connection gets a fresh session id and joins rooms by message
#[instrument(name = "websocket_handler", skip(ws, app_state))]
pub async fn websocket_handler(ws: WebSocketUpgrade, State(app_state): State<AppState>) -> Response {
    let session_id = Uuid::new_v4().to_string();
    info!(session_id = %session_id, "WebSocket connection requested");

    ws.on_upgrade(move |socket| handle_websocket_connection(socket, session_id, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(
    socket: axum::extract::ws::WebSocket,
    session_id: String,
    app_state: AppState,
) {
    info!(session_id = %session_id, "WebSocket connection established");

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    app_state
        .connection_manager
        .add_connection(session_id.clone(), outbound_sender.clone())
        .await;

    match serde_json::to_string(&WebSocketMessage::welcome(&session_id)) {
        Ok(welcome) => {
            let _ = outbound_sender.send(welcome);
        }
        Err(e) => warn!(session_id = %session_id, error = %e, "Failed to serialize welcome"),
    }
    // The connection manager holds the only sender from here on
    drop(outbound_sender);

    let message_handler = Arc::new(WebsocketReceiveHandler::new(app_state.event_bus.clone()));

    let connection = Connection::new(
        session_id.clone(),
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(session_id = %session_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(
                session_id = %session_id,
                error = %e,
                "WebSocket connection error"
            );
        }
    }

    // Cleanup: remove from connection manager and emit disconnect event
    app_state
        .connection_manager
        .remove_connection(&session_id)
        .await;

    app_state
        .event_bus
        .emit(SessionEvent::Disconnect {
            session_id: session_id.clone(),
        })
        .await;

    info!(session_id = %session_id, "WebSocket disconnect event emitted");
}
