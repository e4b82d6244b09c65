//! # EduBot
//!
//! Learning assistant client: turns pasted notes or uploaded documents into
//! flashcards, quizzes, and deep-dive summaries, and drives the dashboard,
//! profile, and feedback pages around that generator.
//!
//! ## Modules
//!
//! - [`pipeline`]: upload → ingest → generate → render request pipeline
//! - [`backend`]: HTTP client for the generation backend
//! - [`objects`]: object storage uploads
//! - [`auth`]: session token, identity provider, page-load auth gate
//! - [`store`]: local key/value store (memory or JSON file)
//! - [`pages`]: dashboard, profile, and feedback page controllers
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edubot::pages::DashboardController;
//! use edubot::{BackendClient, Config, FileStore, GenerationPipeline, SupabaseStorage};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let store = Arc::new(FileStore::open(config.data_dir())?);
//!
//!     let backend = Arc::new(BackendClient::new(config.backend())?);
//!     let objects = Arc::new(SupabaseStorage::new(config.object_storage())?);
//!     let pipeline = GenerationPipeline::new(backend, objects, config.pipeline());
//!
//!     let mut page = DashboardController::new(store, pipeline);
//!     page.handle_feature_click("flashcards");
//!     page.set_source_text("Mitochondria are the powerhouse of the cell");
//!     page.generate().await;
//!
//!     if let Some(result) = page.view().generator.result {
//!         println!("{}", result);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod backend;
pub mod config;
pub mod objects;
pub mod pages;
pub mod pipeline;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-export top-level types for convenience
pub use auth::{AuthError, AuthGate, AuthProvider, AuthUser, GateOutcome, SupabaseAuth};

pub use backend::{Backend, BackendClient, BackendConfig, BackendError, BackendResult};

pub use config::{Config, ConfigError, LoggingConfig};

pub use objects::{ObjectStorage, SupabaseStorage, UploadError};

pub use pipeline::{
    AbortController, AbortSignal, FeatureType, GenerationOutput, GenerationPipeline,
    GenerationRequest, PipelineError, PipelineOptions, PipelineStage, SelectedFile, Trigger,
};

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, StoreResult};
