//! Supabase storage REST client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ObjectStorage, UploadError};

/// Configuration for the storage client
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Provider project URL (e.g., "http://localhost:54321")
    pub base_url: String,
    /// Public anon key sent as `apikey`
    pub anon_key: String,
    /// Target bucket
    pub bucket: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            bucket: "documents".to_string(),
        }
    }
}

/// Uploads objects through `POST /storage/v1/object/<bucket>/<path>`
pub struct SupabaseStorage {
    client: Client,
    config: StorageConfig,
}

#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl SupabaseStorage {
    pub fn new(mut config: StorageConfig) -> Result<Self, UploadError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    fn object_url(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url,
            urlencoding::encode(&self.config.bucket),
            encoded.join("/")
        )
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    fn bucket(&self) -> &str {
        &self.config.bucket
    }

    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: Option<&str>,
        token: &str,
    ) -> Result<(), UploadError> {
        let url = self.object_url(path);
        // Without a session the anon key doubles as the bearer
        let bearer = if token.is_empty() {
            self.config.anon_key.as_str()
        } else {
            token
        };

        tracing::debug!(url = %url, size = bytes.len(), "Uploading object");

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
            .header(
                "Content-Type",
                content_type.unwrap_or("application/octet-stream"),
            )
            .header("x-upsert", "false")
            .body(bytes.to_vec())
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<StorageErrorBody>(&text)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or(text);

        Err(UploadError::Rejected { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_stub;
    use axum::{
        body::Bytes,
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::json;

    #[test]
    fn test_object_url_encodes_segments() {
        let storage = SupabaseStorage::new(StorageConfig {
            base_url: "http://sb.local/".to_string(),
            anon_key: "anon".to_string(),
            bucket: "documents".to_string(),
        })
        .unwrap();

        assert_eq!(
            storage.object_url("uploads/1-ab c.pdf"),
            "http://sb.local/storage/v1/object/documents/uploads/1-ab%20c.pdf"
        );
    }

    #[tokio::test]
    async fn test_upload_sends_bytes_and_headers() {
        let router = Router::new().route(
            "/storage/v1/object/documents/*path",
            post(
                |Path(path): Path<String>, headers: HeaderMap, body: Bytes| async move {
                    assert_eq!(path, "uploads/1-abc.txt");
                    assert_eq!(headers["apikey"], "anon");
                    assert_eq!(headers["authorization"], "Bearer tok");
                    assert_eq!(headers["content-type"], "text/plain");
                    assert_eq!(&body[..], b"hello");
                    Json(json!({"Key": "documents/uploads/1-abc.txt"}))
                },
            ),
        );
        let base_url = spawn_stub(router).await;

        let storage = SupabaseStorage::new(StorageConfig {
            base_url,
            anon_key: "anon".to_string(),
            bucket: "documents".to_string(),
        })
        .unwrap();

        storage
            .upload("uploads/1-abc.txt", b"hello", Some("text/plain"), "tok")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_missing_bucket_surfaces_provider_message() {
        let router = Router::new().route(
            "/storage/v1/object/:bucket/*path",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "statusCode": "404",
                        "error": "Bucket not found",
                        "message": "Bucket not found"
                    })),
                )
            }),
        );
        let base_url = spawn_stub(router).await;

        let storage = SupabaseStorage::new(StorageConfig {
            base_url,
            anon_key: "anon".to_string(),
            bucket: "missing".to_string(),
        })
        .unwrap();

        let err = storage
            .upload("uploads/1-abc.pdf", b"%PDF", None, "")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Rejected { status: 400, .. }));
        assert_eq!(err.to_string(), "Bucket not found");
    }
}
