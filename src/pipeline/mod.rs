//! Generation Request Pipeline
//!
//! Turns pasted text or a selected file into generated learning content.
//!
//! ```text
//! Idle → Uploading (file only) → Ingesting → Generating → Rendered | Failed
//! ```
//!
//! Steps run strictly in sequence and each waits for its predecessor.
//! Any failure aborts the remaining steps; nothing is retried and no
//! partial result is kept. `Rendered` and `Failed` are terminal for one
//! invocation and the next one starts again from `Idle`.
//!
//! # Example
//!
//! ```rust,no_run
//! use edubot::backend::{BackendClient, BackendConfig};
//! use edubot::objects::{StorageConfig, SupabaseStorage};
//! use edubot::pipeline::{FeatureType, GenerationPipeline, GenerationRequest, PipelineOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(BackendClient::new(BackendConfig::default())?);
//!     let objects = Arc::new(SupabaseStorage::new(StorageConfig::default())?);
//!     let pipeline = GenerationPipeline::new(backend, objects, PipelineOptions::default());
//!
//!     let request = GenerationRequest::from_inputs(
//!         "Photosynthesis converts light into chemical energy",
//!         None,
//!         FeatureType::DeepDive,
//!     )
//!     .expect("text is not empty");
//!
//!     let output = pipeline.run(&request, "session-token", None, |_| {}).await?;
//!     println!("{}", output.rendered);
//!     Ok(())
//! }
//! ```

mod feature;
mod render;
mod runner;
mod trigger;

pub use feature::{feature_display_name, feature_type_for, FeatureType};
pub use render::render_content;
pub use runner::{AbortController, AbortSignal, GenerationPipeline, PipelineOptions};
pub use trigger::{Trigger, TriggerLease, BUSY_LABEL, IDLE_LABEL};

use serde_json::Value;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::backend::{BackendError, DocumentId};
use crate::objects::{file_extension, UploadError};

/// A file picked by the user
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, guessing its MIME type from the extension
    pub async fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let mut file = Self::new(name, bytes);
        file.content_type = guess_content_type(file.extension()).map(str::to_string);
        Ok(file)
    }

    /// Text after the last `.` of the name
    pub fn extension(&self) -> &str {
        file_extension(&self.name)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false)
    }
}

fn guess_content_type(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        "md" => Some("text/markdown"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Where the document comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Text(String),
    File(SelectedFile),
}

/// Discriminant of [`Source`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    File,
}

/// One generation request, alive until its result or error is shown
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub source: Source,
    pub feature: FeatureType,
}

impl GenerationRequest {
    /// Build a request from the generator inputs.
    ///
    /// A selected file takes precedence over the text. Returns `None` when
    /// there is neither text nor a file.
    pub fn from_inputs(text: &str, file: Option<SelectedFile>, feature: FeatureType) -> Option<Self> {
        let source = match file {
            Some(file) => Source::File(file),
            None if !text.is_empty() => Source::Text(text.to_string()),
            None => return None,
        };
        Some(Self { source, feature })
    }

    pub fn source_kind(&self) -> SourceKind {
        match self.source {
            Source::Text(_) => SourceKind::Text,
            Source::File(_) => SourceKind::File,
        }
    }
}

/// Pipeline progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Uploading,
    Ingesting,
    Generating,
    Rendered,
    Failed,
}

impl PipelineStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Rendered | PipelineStage::Failed)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Uploading => "uploading",
            PipelineStage::Ingesting => "ingesting",
            PipelineStage::Generating => "generating",
            PipelineStage::Rendered => "rendered",
            PipelineStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Remote call that answered with a non-success status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    FileIngestion,
    TextIngestion,
    Generation,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::FileIngestion => "File Ingestion",
            Step::TextIngestion => "Text Ingestion",
            Step::Generation => "Generation",
        };
        f.write_str(name)
    }
}

/// Successful pipeline result
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    pub document_id: DocumentId,
    pub content: Value,
    /// Text for the result area
    pub rendered: String,
}

/// Pipeline failures. Display is the message shown to the user.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Please paste text OR upload a file")]
    EmptyInput,

    #[error("Upload Failed: {source}. Does '{bucket}' bucket exist?")]
    Upload {
        bucket: String,
        #[source]
        source: UploadError,
    },

    #[error("{step} failed")]
    Rejected {
        step: Step,
        status: u16,
        #[source]
        source: BackendError,
    },

    #[error("{0}")]
    Transport(#[source] BackendError),

    #[error("Request timed out")]
    TimedOut,

    #[error("Request aborted")]
    Aborted,
}

impl PipelineError {
    pub(crate) fn from_backend(step: Step, err: BackendError) -> Self {
        match err.status() {
            Some(status) => PipelineError::Rejected {
                step,
                status,
                source: err,
            },
            None => PipelineError::Transport(err),
        }
    }
}
