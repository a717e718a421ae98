use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::event::EventBus;
use crate::room::RoomService;
use crate::upload::DocumentStore;
use crate::websockets::ConnectionManager;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub room_service: Arc<RoomService>,
    pub event_bus: EventBus,
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub document_store: Arc<DocumentStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        room_service: Arc<RoomService>,
        event_bus: EventBus,
        connection_manager: Arc<dyn ConnectionManager>,
        document_store: Arc<DocumentStore>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            room_service,
            event_bus,
            connection_manager,
            document_store,
            config,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::UploadFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Upload failed: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
