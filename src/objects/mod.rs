//! Object Storage
//!
//! Raw file uploads to the auth/storage provider, done before a file is
//! registered with the backend. Uploaded objects get a fresh unique path
//! `<prefix>/<epoch-ms>-<random>.<ext>` so repeated uploads of the same
//! file never collide.

mod supabase;

pub use supabase::{StorageConfig, SupabaseStorage};

use async_trait::async_trait;
use thiserror::Error;

/// Write access to a storage bucket
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Bucket the objects are written to
    fn bucket(&self) -> &str;

    /// Store `bytes` at `path` inside the bucket
    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: Option<&str>,
        token: &str,
    ) -> Result<(), UploadError>;
}

/// Upload failures. Display is the provider's own message.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },
}

/// Extension of a file name: the text after the last `.`, or the
/// whole name when it has no dot.
pub fn file_extension(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}

/// Short lowercase alphanumeric suffix for upload paths
pub fn random_suffix() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..6].to_string()
}

/// Build the object path for an upload
pub fn upload_path(prefix: &str, extension: &str, timestamp_ms: i64, suffix: &str) -> String {
    format!(
        "{}/{}-{}.{}",
        prefix.trim_end_matches('/'),
        timestamp_ms,
        suffix,
        extension
    )
}
