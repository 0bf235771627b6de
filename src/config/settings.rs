use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    pub matrix: MatrixConfig,
    pub github: GitHubConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub otel: OtelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on webhook request bodies
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Clone, Deserialize)]
pub struct MatrixConfig {
    #[serde(default = "default_homeserver")]
    pub homeserver: String,
    pub access_token: String,
    pub room_id: String,
    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

// Keep the token out of debug output
impl std::fmt::Debug for MatrixConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixConfig")
            .field("homeserver", &self.homeserver)
            .field("access_token", &"<redacted>")
            .field("room_id", &self.room_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[derive(Clone, Deserialize)]
pub struct GitHubConfig {
    pub webhook_secret: String,
    /// Senders whose `label` events are dropped (GitHub's system account
    /// creates default labels on new repositories)
    #[serde(default = "default_ignored_label_senders")]
    pub ignored_label_senders: Vec<String>,
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("webhook_secret", &"<redacted>")
            .field("ignored_label_senders", &self.ignored_label_senders)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtelConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_otel_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_max_body_bytes() -> usize {
    25 * 1024 * 1024 // GitHub caps payloads at 25 MB
}

fn default_homeserver() -> String {
    "https://matrix.org".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_ignored_label_senders() -> Vec<String> {
    vec!["ghost".to_string()]
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "github-matrix-notifier".to_string()
}

fn default_sampling_ratio() -> f64 {
    1.0
}

impl Settings {
    pub fn new() -> Result<Self> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // APP__SERVER__PORT, APP__MATRIX__ROOM_ID, ...
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("github.ignored_label_senders"),
            )
            // Flat secret names used by existing deployments
            .set_override_option("matrix.access_token", env::var("MATRIX_TOKEN").ok())?
            .set_override_option("matrix.room_id", env::var("MATRIX_ROOM_ID").ok())?
            .set_override_option("github.webhook_secret", env::var("GITHUB_WEBHOOK_SECRET").ok())?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Whether a `label` event from `sender` should be dropped
    pub fn ignores_label_sender(&self, sender: &str) -> bool {
        self.github
            .ignored_label_senders
            .iter()
            .any(|ignored| ignored == sender)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for OtelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_otel_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
        }
    }
}
