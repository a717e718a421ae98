// Public API - what other modules can use
pub use handlers::{upload_document, UploadResponse, DOCUMENT_FIELD};
pub use store::{DocumentStore, UploadError};

// Internal modules
mod handlers;
mod store;
