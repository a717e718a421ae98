use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::event::SessionEvent;
use crate::shared::{AppError, AppState};

/// Multipart field carrying the document
pub const DOCUMENT_FIELD: &str = "pdf";

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

/// HTTP handler for replacing the shared document
///
/// POST /upload (multipart/form-data, field "pdf")
/// Stores the file, then tells the rooms a document is available
#[instrument(name = "upload_document", skip(state, multipart))]
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut contents = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!(error = %e, "Malformed multipart body");
        AppError::BadRequest(format!("Malformed upload: {}", e))
    })? {
        if field.name() != Some(DOCUMENT_FIELD) {
            continue;
        }
        let bytes = field.bytes().await.map_err(|e| {
            warn!(error = %e, "Failed to read uploaded document");
            AppError::UploadFailed(e.to_string())
        })?;
        contents = Some(bytes);
        break;
    }

    let contents = contents.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let document = state
        .document_store
        .store(&contents)
        .await
        .map_err(|e| AppError::UploadFailed(e.to_string()))?;

    // The file is complete on disk before anyone is told about it
    state
        .event_bus
        .emit(SessionEvent::DocumentUploaded {
            url: document.url.clone(),
        })
        .await;

    info!(url = %document.url, bytes = contents.len(), "Document uploaded");

    Ok(Json(UploadResponse {
        message: format!(
            "File uploaded successfully as {}",
            state.document_store.file_name()
        ),
    }))
}
