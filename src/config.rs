//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `EDUBOT_*` environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::auth::{AuthConfig as ProviderAuthConfig, DEFAULT_LOGIN_URL};
use crate::backend::BackendConfig;
use crate::objects::StorageConfig as ObjectStorageConfig;
use crate::pipeline::PipelineOptions;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub local: LocalConfig,

    #[serde(default)]
    pub feedback: FeedbackConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generation backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Bound on one generation run; unset means wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            request_timeout_secs: None,
        }
    }
}

/// Identity provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_auth_url")]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,

    #[serde(default = "default_login_url")]
    pub login_url: String,

    #[serde(default = "default_require_login")]
    pub require_login: bool,
}

fn default_auth_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_login_url() -> String {
    DEFAULT_LOGIN_URL.to_string()
}

fn default_require_login() -> bool {
    true
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            url: default_auth_url(),
            anon_key: String::new(),
            login_url: default_login_url(),
            require_login: default_require_login(),
        }
    }
}

/// Object storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_bucket")]
    pub bucket: String,

    #[serde(default = "default_upload_prefix")]
    pub upload_prefix: String,
}

fn default_bucket() -> String {
    "documents".to_string()
}

fn default_upload_prefix() -> String {
    "uploads".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            upload_prefix: default_upload_prefix(),
        }
    }
}

/// Local store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LocalConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("edubot").to_string_lossy().to_string())
        .unwrap_or_else(|| "./edubot_data".to_string())
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Feedback page configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackConfig {
    #[serde(default = "default_submit_delay")]
    pub submit_delay_ms: u64,
}

fn default_submit_delay() -> u64 {
    2000
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("edubot").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("EDUBOT_API_URL") {
            self.api.url = url;
        }

        if let Some(url) = var("EDUBOT_AUTH_URL") {
            self.auth.url = url;
        }
        if let Some(key) = var("EDUBOT_AUTH_KEY") {
            self.auth.anon_key = key;
        }

        if let Some(data_dir) = var("EDUBOT_DATA_DIR") {
            self.local.data_dir = data_dir;
        }

        if let Some(level) = var("EDUBOT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("EDUBOT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.api.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn backend(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.api.url.clone(),
            request_timeout: self.request_timeout(),
        }
    }

    pub fn object_storage(&self) -> ObjectStorageConfig {
        ObjectStorageConfig {
            base_url: self.auth.url.clone(),
            anon_key: self.auth.anon_key.clone(),
            bucket: self.storage.bucket.clone(),
        }
    }

    pub fn identity_provider(&self) -> ProviderAuthConfig {
        ProviderAuthConfig {
            base_url: self.auth.url.clone(),
            anon_key: self.auth.anon_key.clone(),
        }
    }

    pub fn pipeline(&self) -> PipelineOptions {
        PipelineOptions {
            timeout: self.request_timeout(),
            upload_prefix: self.storage.upload_prefix.clone(),
            ..PipelineOptions::default()
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.local.data_dir)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.feedback.submit_delay_ms)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# EduBot Configuration
#
# Environment variables override these settings:
# - EDUBOT_API_URL
# - EDUBOT_AUTH_URL
# - EDUBOT_AUTH_KEY
# - EDUBOT_DATA_DIR
# - EDUBOT_LOG_LEVEL
# - EDUBOT_LOG_FORMAT

[api]
# Generation backend base URL
url = "http://localhost:8000"

# Give up on a generation run after this many seconds
# request_timeout_secs = 120

[auth]
# Identity and object storage provider URL
url = "http://localhost:54321"

# Public (anon) API key of the provider
anon_key = ""

# Where unauthenticated users are sent
login_url = "login.html"

# Require a valid session before showing the dashboard
require_login = true

[storage]
# Bucket receiving uploaded documents
bucket = "documents"

# Object path prefix for uploads
upload_prefix = "uploads"

[local]
# Directory holding local_storage.json. Defaults to the platform data dir.
# data_dir = "/path/to/edubot/data"

[feedback]
# Simulated submission delay (ms)
submit_delay_ms = 2000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
