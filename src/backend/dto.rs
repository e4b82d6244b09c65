//! Request/response bodies of the ingest and generate endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::pipeline::FeatureType;

/// Identifier returned by the ingest endpoints.
///
/// Kept as the raw JSON value so it is echoed back to `/generate/`
/// exactly as the backend produced it (string or number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Value);

impl DocumentId {
    pub fn new(id: impl Into<Value>) -> Self {
        Self(id.into())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// POST /ingest/text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextIngestRequest {
    pub title: String,
    pub content: String,
}

/// POST /ingest/file-reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRefIngestRequest {
    pub title: String,
    pub file_path: String,
    pub file_type: String,
}

/// Response of both ingest endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct IngestResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub document_id: DocumentId,
}

/// POST /generate/
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub document_id: DocumentId,
    #[serde(rename = "type")]
    pub kind: FeatureType,
}

/// Response of the generate endpoint.
///
/// The backend returns the stored generation row; only `content`
/// is consumed here.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub content: Value,
}
