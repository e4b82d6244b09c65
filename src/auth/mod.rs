//! Authentication
//!
//! Session token handling and the gate that keeps pages behind a login.
//!
//! - **provider**: validates tokens with the auth provider
//! - **gate**: page-load check that either binds the user or redirects

mod gate;
mod provider;

pub use gate::{AuthGate, GateOutcome, RedirectReason, DEFAULT_LOGIN_URL};
pub use provider::{AuthConfig, AuthUser, SupabaseAuth};

use async_trait::async_trait;
use thiserror::Error;

use crate::store::{keys, KeyValueStore, StoreResult};

/// Token validation against the auth provider
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve the user owning `token`
    async fn get_user(&self, token: &str) -> Result<AuthUser, AuthError>;
}

/// Errors that can occur validating a session
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Token rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Read the stored session token. Empty values count as absent.
pub fn session_token(store: &dyn KeyValueStore) -> StoreResult<Option<String>> {
    Ok(store
        .get(keys::SESSION_TOKEN)?
        .filter(|token| !token.is_empty()))
}

/// Persist a session token issued by the login page
pub fn store_session_token(store: &dyn KeyValueStore, token: &str) -> StoreResult<()> {
    store.set(keys::SESSION_TOKEN, token)
}

/// Forget the current session
pub fn clear_session(store: &dyn KeyValueStore) -> StoreResult<()> {
    store.remove(keys::SESSION_TOKEN)
}
