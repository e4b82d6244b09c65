//! Pipeline runner

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use super::{
    render_content, GenerationOutput, GenerationRequest, PipelineError, PipelineStage, Source,
    Step,
};
use crate::backend::{
    Backend, DocumentId, FileRefIngestRequest, GenerateRequest, TextIngestRequest,
};
use crate::objects::{random_suffix, upload_path, ObjectStorage};

/// Title given to pasted text documents
pub const TEXT_DOCUMENT_TITLE: &str = "Frontend Text";

/// Tunables for a pipeline
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Limit for a whole invocation. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Directory prefix of uploaded objects
    pub upload_prefix: String,
    /// Title sent with pasted text
    pub text_title: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            upload_prefix: "uploads".to_string(),
            text_title: TEXT_DOCUMENT_TITLE.to_string(),
        }
    }
}

/// Owner side of an abort signal
#[derive(Debug)]
pub struct AbortController {
    tx: watch::Sender<bool>,
}

/// Observed by a running pipeline; cheap to clone
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

impl AbortController {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Abort every pipeline watching this controller
    pub fn abort(&self) {
        self.tx.send_replace(true);
    }

    /// Re-arm for the next run. Signals handed out earlier see the reset too.
    pub fn reset(&self) {
        self.tx.send_replace(false);
    }

    pub fn is_aborted(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for AbortController {
    fn default() -> Self {
        Self::new()
    }
}

impl AbortSignal {
    pub fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once aborted. Never resolves if the controller is dropped first.
    pub async fn aborted(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Runs upload → ingest → generate → render
pub struct GenerationPipeline {
    backend: Arc<dyn Backend>,
    objects: Arc<dyn ObjectStorage>,
    options: PipelineOptions,
}

impl GenerationPipeline {
    pub fn new(
        backend: Arc<dyn Backend>,
        objects: Arc<dyn ObjectStorage>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            backend,
            objects,
            options,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run one invocation.
    ///
    /// `on_stage` sees every transition, ending with `Rendered` or
    /// `Failed`. A timeout or abort ends the run through the same error
    /// path as a failed call.
    pub async fn run<F>(
        &self,
        request: &GenerationRequest,
        token: &str,
        abort: Option<&AbortSignal>,
        mut on_stage: F,
    ) -> Result<GenerationOutput, PipelineError>
    where
        F: FnMut(PipelineStage) + Send,
    {
        on_stage(PipelineStage::Idle);

        let result = {
            let work = self.execute(request, token, &mut on_stage);
            let limited = async {
                match self.options.timeout {
                    Some(limit) => tokio::time::timeout(limit, work)
                        .await
                        .unwrap_or(Err(PipelineError::TimedOut)),
                    None => work.await,
                }
            };

            match abort {
                Some(signal) if signal.is_aborted() => Err(PipelineError::Aborted),
                Some(signal) => tokio::select! {
                    result = limited => result,
                    _ = signal.aborted() => Err(PipelineError::Aborted),
                },
                None => limited.await,
            }
        };

        match &result {
            Ok(output) => {
                tracing::info!(
                    document_id = %output.document_id,
                    feature = %request.feature,
                    "Content generated"
                );
                on_stage(PipelineStage::Rendered);
            }
            Err(e) => {
                tracing::error!(feature = %request.feature, error = %e, "Generation pipeline failed");
                on_stage(PipelineStage::Failed);
            }
        }

        result
    }

    async fn execute<F>(
        &self,
        request: &GenerationRequest,
        token: &str,
        on_stage: &mut F,
    ) -> Result<GenerationOutput, PipelineError>
    where
        F: FnMut(PipelineStage) + Send,
    {
        let document_id = match &request.source {
            Source::File(file) => {
                on_stage(PipelineStage::Uploading);
                let extension = file.extension();
                let path = upload_path(
                    &self.options.upload_prefix,
                    extension,
                    Utc::now().timestamp_millis(),
                    &random_suffix(),
                );
                tracing::info!(file = %file.name, path = %path, size = file.size(), "Uploading file");

                self.objects
                    .upload(&path, &file.bytes, file.content_type.as_deref(), token)
                    .await
                    .map_err(|source| PipelineError::Upload {
                        bucket: self.objects.bucket().to_string(),
                        source,
                    })?;

                on_stage(PipelineStage::Ingesting);
                let ingest = FileRefIngestRequest {
                    title: file.name.clone(),
                    file_path: path,
                    file_type: extension.to_string(),
                };
                self.backend
                    .ingest_file_reference(&ingest, token)
                    .await
                    .map_err(|e| PipelineError::from_backend(Step::FileIngestion, e))?
                    .document_id
            }
            Source::Text(text) => {
                on_stage(PipelineStage::Ingesting);
                let ingest = TextIngestRequest {
                    title: self.options.text_title.clone(),
                    content: text.clone(),
                };
                self.backend
                    .ingest_text(&ingest, token)
                    .await
                    .map_err(|e| PipelineError::from_backend(Step::TextIngestion, e))?
                    .document_id
            }
        };

        self.generate(document_id, request, token, on_stage).await
    }

    async fn generate<F>(
        &self,
        document_id: DocumentId,
        request: &GenerationRequest,
        token: &str,
        on_stage: &mut F,
    ) -> Result<GenerationOutput, PipelineError>
    where
        F: FnMut(PipelineStage) + Send,
    {
        on_stage(PipelineStage::Generating);
        tracing::info!(document_id = %document_id, feature = %request.feature, "Generating content");

        let generate = GenerateRequest {
            document_id: document_id.clone(),
            kind: request.feature,
        };
        let response = self
            .backend
            .generate(&generate, token)
            .await
            .map_err(|e| PipelineError::from_backend(Step::Generation, e))?;

        let rendered = render_content(request.feature, &response.content);
        Ok(GenerationOutput {
            document_id,
            content: response.content,
            rendered,
        })
    }
}
