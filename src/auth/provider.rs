//! Auth provider client
//!
//! Validates session tokens against `GET /auth/v1/user`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{AuthError, AuthProvider};

/// User returned by the auth provider
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
}

impl AuthUser {
    /// `user_metadata.full_name` when set
    pub fn full_name(&self) -> Option<&str> {
        self.user_metadata
            .get("full_name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Name shown in the header: full name, else the email local part
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.full_name() {
            return Some(name.to_string());
        }
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .map(str::to_string)
    }
}

/// Configuration for the auth provider client
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Provider project URL
    pub base_url: String,
    /// Public anon key sent as `apikey`
    pub anon_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
        }
    }
}

/// Supabase auth REST client
pub struct SupabaseAuth {
    client: Client,
    config: AuthConfig,
}

impl SupabaseAuth {
    pub fn new(mut config: AuthConfig) -> Result<Self, AuthError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn get_user(&self, token: &str) -> Result<AuthUser, AuthError> {
        let url = format!("{}/auth/v1/user", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected { status, message });
        }

        Ok(response.json::<AuthUser>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_stub;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::json;

    fn user(email: Option<&str>, metadata: Value) -> AuthUser {
        serde_json::from_value(json!({
            "id": "u1",
            "email": email,
            "user_metadata": metadata,
        }))
        .unwrap()
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let u = user(Some("sam.lee@school.edu"), json!({"full_name": "Sam Lee"}));
        assert_eq!(u.display_name().as_deref(), Some("Sam Lee"));
    }

    #[test]
    fn test_display_name_falls_back_to_email_local_part() {
        let u = user(Some("sam.lee@school.edu"), json!({}));
        assert_eq!(u.display_name().as_deref(), Some("sam.lee"));

        let blank = user(Some("kai@school.edu"), json!({"full_name": ""}));
        assert_eq!(blank.display_name().as_deref(), Some("kai"));

        let nobody = user(None, json!({}));
        assert!(nobody.display_name().is_none());
    }

    #[tokio::test]
    async fn test_get_user_round_trip() {
        let router = Router::new().route(
            "/auth/v1/user",
            get(|headers: HeaderMap| async move {
                if headers["authorization"] != "Bearer good" {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"msg": "invalid JWT"})),
                    );
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "id": "u1",
                        "email": "ada@edubot.ai",
                        "user_metadata": {"full_name": "Ada"}
                    })),
                )
            }),
        );
        let base_url = spawn_stub(router).await;
        let auth = SupabaseAuth::new(AuthConfig {
            base_url,
            anon_key: "anon".to_string(),
        })
        .unwrap();

        let u = auth.get_user("good").await.unwrap();
        assert_eq!(u.full_name(), Some("Ada"));

        let err = auth.get_user("bad").await.unwrap_err();
        assert!(matches!(err, AuthError::Rejected { status: 401, .. }));
    }
}
