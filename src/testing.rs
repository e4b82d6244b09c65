//! Shared test fixtures

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::{
    Backend, BackendError, BackendResult, DocumentId, FileRefIngestRequest, GenerateRequest,
    GenerateResponse, IngestResponse, TextIngestRequest,
};
use crate::objects::{ObjectStorage, UploadError};

/// Serve `router` on an ephemeral local port, returning its base URL
pub async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A call seen by [`FakeBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Upload {
        path: String,
        size: usize,
        content_type: Option<String>,
    },
    IngestText {
        title: String,
        content: String,
    },
    IngestFile {
        title: String,
        file_path: String,
        file_type: String,
    },
    Generate {
        document_id: Value,
        kind: String,
    },
}

/// In-process backend and object storage that records every call
pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    content: Value,
    delay: Option<Duration>,
    upload_error: Option<String>,
    ingest_status: Option<u16>,
    generate_status: Option<u16>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn modify(self: Arc<Self>, f: impl FnOnce(&mut Self)) -> Arc<Self> {
        let mut inner = Arc::try_unwrap(self).unwrap_or_else(|_| panic!("fake already shared"));
        f(&mut inner);
        Arc::new(inner)
    }

    pub fn with_content(self: Arc<Self>, content: Value) -> Arc<Self> {
        self.modify(|f| f.content = content)
    }

    pub fn with_delay(self: Arc<Self>, delay: Duration) -> Arc<Self> {
        self.modify(|f| f.delay = Some(delay))
    }

    pub fn failing_upload(self: Arc<Self>, message: &str) -> Arc<Self> {
        let message = message.to_string();
        self.modify(|f| f.upload_error = Some(message))
    }

    pub fn failing_ingest(self: Arc<Self>, status: u16) -> Arc<Self> {
        self.modify(|f| f.ingest_status = Some(status))
    }

    pub fn failing_generate(self: Arc<Self>, status: u16) -> Arc<Self> {
        self.modify(|f| f.generate_status = Some(status))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn rejected(status: u16) -> BackendError {
        BackendError::ApiError {
            status,
            message: json!({"detail": "rejected"}).to_string(),
        }
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            content: json!({"flashcards": [{"front": "ATP", "back": "Energy currency"}]}),
            delay: None,
            upload_error: None,
            ingest_status: None,
            generate_status: None,
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn ingest_text(
        &self,
        request: &TextIngestRequest,
        _token: &str,
    ) -> BackendResult<IngestResponse> {
        self.record(Call::IngestText {
            title: request.title.clone(),
            content: request.content.clone(),
        })
        .await;
        if let Some(status) = self.ingest_status {
            return Err(Self::rejected(status));
        }
        Ok(IngestResponse {
            status: Some("success".to_string()),
            document_id: DocumentId::new("doc-1"),
        })
    }

    async fn ingest_file_reference(
        &self,
        request: &FileRefIngestRequest,
        _token: &str,
    ) -> BackendResult<IngestResponse> {
        self.record(Call::IngestFile {
            title: request.title.clone(),
            file_path: request.file_path.clone(),
            file_type: request.file_type.clone(),
        })
        .await;
        if let Some(status) = self.ingest_status {
            return Err(Self::rejected(status));
        }
        Ok(IngestResponse {
            status: Some("success".to_string()),
            document_id: DocumentId::new("doc-2"),
        })
    }

    async fn generate(
        &self,
        request: &GenerateRequest,
        _token: &str,
    ) -> BackendResult<GenerateResponse> {
        self.record(Call::Generate {
            document_id: request.document_id.as_value().clone(),
            kind: request.kind.as_str().to_string(),
        })
        .await;
        if let Some(status) = self.generate_status {
            return Err(Self::rejected(status));
        }
        Ok(GenerateResponse {
            content: self.content.clone(),
        })
    }
}

#[async_trait]
impl ObjectStorage for FakeBackend {
    fn bucket(&self) -> &str {
        "documents"
    }

    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: Option<&str>,
        _token: &str,
    ) -> Result<(), UploadError> {
        self.record(Call::Upload {
            path: path.to_string(),
            size: bytes.len(),
            content_type: content_type.map(str::to_string),
        })
        .await;
        match &self.upload_error {
            Some(message) => Err(UploadError::Rejected {
                status: 400,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}
