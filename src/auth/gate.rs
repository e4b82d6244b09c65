//! Authentication gate
//!
//! Runs once on page load. Fails closed: a missing token, a rejected
//! token, and any error while validating all end in a redirect.

use std::sync::Arc;

use super::{clear_session, session_token, AuthProvider, AuthUser};
use crate::store::KeyValueStore;

/// Default login boundary
pub const DEFAULT_LOGIN_URL: &str = "login.html";

/// Why the gate sent the user away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    MissingToken,
    InvalidToken,
}

/// Result of the page-load check
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Token validated; page logic may continue
    Authenticated {
        user: AuthUser,
        display_name: Option<String>,
    },
    /// Terminal. No further page logic runs.
    Redirect { to: String, reason: RedirectReason },
}

impl GateOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, GateOutcome::Authenticated { .. })
    }
}

/// Keeps a page usable only by holders of a valid session token
#[derive(Clone)]
pub struct AuthGate {
    provider: Arc<dyn AuthProvider>,
    login_url: String,
}

impl AuthGate {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            login_url: DEFAULT_LOGIN_URL.to_string(),
        }
    }

    /// Override the login boundary
    pub fn login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = url.into();
        self
    }

    fn redirect(&self, reason: RedirectReason) -> GateOutcome {
        GateOutcome::Redirect {
            to: self.login_url.clone(),
            reason,
        }
    }

    /// Check the stored session
    pub async fn check(&self, store: &dyn KeyValueStore) -> GateOutcome {
        let token = match session_token(store) {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::info!("No session token, redirecting to login");
                return self.redirect(RedirectReason::MissingToken);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not read session token");
                return self.redirect(RedirectReason::MissingToken);
            }
        };

        match self.provider.get_user(&token).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, email = ?user.email, "Logged in");
                let display_name = user.display_name();
                GateOutcome::Authenticated { user, display_name }
            }
            Err(e) => {
                tracing::error!(error = %e, "Invalid token");
                if let Err(e) = clear_session(store) {
                    tracing::warn!(error = %e, "Failed to clear session token");
                }
                self.redirect(RedirectReason::InvalidToken)
            }
        }
    }
}
