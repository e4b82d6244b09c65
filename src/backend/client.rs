//! Backend REST API Client
//!
//! HTTP client for the ingest and generate endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use super::dto::{
    FileRefIngestRequest, GenerateRequest, GenerateResponse, IngestResponse, TextIngestRequest,
};
use super::error::{BackendError, BackendResult};
use super::Backend;

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL for the backend (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: None,
        }
    }
}

/// Backend REST API client
pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Create a new backend client with the given configuration
    pub fn new(mut config: BackendConfig) -> BackendResult<Self> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// POST a JSON body with the bearer token and decode the JSON reply
    async fn post_json<B, R>(&self, path: &str, body: &B, token: &str) -> BackendResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(BackendError::from_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(BackendError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        response.json::<R>().await.map_err(BackendError::Request)
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn ingest_text(
        &self,
        request: &TextIngestRequest,
        token: &str,
    ) -> BackendResult<IngestResponse> {
        self.post_json("/ingest/text", request, token).await
    }

    async fn ingest_file_reference(
        &self,
        request: &FileRefIngestRequest,
        token: &str,
    ) -> BackendResult<IngestResponse> {
        self.post_json("/ingest/file-reference", request, token).await
    }

    async fn generate(
        &self,
        request: &GenerateRequest,
        token: &str,
    ) -> BackendResult<GenerateResponse> {
        self.post_json("/generate/", request, token).await
    }
}
