//! Global configuration types for Chatdesk.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! HTTP listener, the allowed frontend origin, and the dialogue engine
//! connection.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Chatdesk service.
///
/// All fields have sensible defaults, so an empty file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Origin allowed by the CORS layer. `*` allows any origin.
    #[serde(default = "default_frontend_origin")]
    pub frontend_origin: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dialogue: DialogueConfig,
}

fn default_frontend_origin() -> String {
    "http://localhost:5173".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            frontend_origin: default_frontend_origin(),
            server: ServerConfig::default(),
            dialogue: DialogueConfig::default(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Connection settings for the external dialogue engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Base address, e.g. `http://localhost:5005`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the REST webhook on the engine.
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,

    /// Deadline for one relay call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5005".to_string()
}

fn default_webhook_path() -> String {
    "/webhooks/rest/webhook".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl DialogueConfig {
    /// Full webhook URL, joined without doubling the slash.
    pub fn webhook_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.webhook_path.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            webhook_path: default_webhook_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
