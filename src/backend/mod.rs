//! Backend API
//!
//! Client side of the document backend. The backend itself is an
//! external service; this module only consumes it.
//!
//! # Endpoints
//!
//! - `POST /ingest/text` - `{title, content}` → `{document_id}`
//! - `POST /ingest/file-reference` - `{title, file_path, file_type}` → `{document_id}`
//! - `POST /generate/` - `{document_id, type}` → `{content}`
//!
//! Every call carries the session token as a bearer header.

mod client;
mod dto;
mod error;

pub use client::{BackendClient, BackendConfig};
pub use dto::{
    DocumentId, FileRefIngestRequest, GenerateRequest, GenerateResponse, IngestResponse,
    TextIngestRequest,
};
pub use error::{BackendError, BackendResult};

use async_trait::async_trait;

/// Operations the generation pipeline needs from the backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Register raw text as a document
    async fn ingest_text(
        &self,
        request: &TextIngestRequest,
        token: &str,
    ) -> BackendResult<IngestResponse>;

    /// Register an already uploaded file as a document
    async fn ingest_file_reference(
        &self,
        request: &FileRefIngestRequest,
        token: &str,
    ) -> BackendResult<IngestResponse>;

    /// Generate learning content for a document
    async fn generate(&self, request: &GenerateRequest, token: &str)
        -> BackendResult<GenerateResponse>;
}
