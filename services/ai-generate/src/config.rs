use std::env;
use std::time::Duration;

use stayconnect::config::{parse_port, parse_seconds, ConfigError, ServerConfig, TelemetryConfig};

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8001";
const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly local guide helping home-stay guests. \
    Answer directly and keep replies short and practical.";

/// Configuration for the generation proxy.
#[derive(Debug, Clone)]
pub(crate) struct GenerateConfig {
    pub(crate) server: ServerConfig,
    pub(crate) telemetry: TelemetryConfig,
    pub(crate) upstream: UpstreamConfig,
}

/// Connection settings for the completion backend.
#[derive(Debug, Clone)]
pub(crate) struct UpstreamConfig {
    pub(crate) backend_url: String,
    pub(crate) system_prompt: String,
    pub(crate) timeout: Duration,
}

impl GenerateConfig {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let host = env::var("GENERATE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_port("GENERATE_PORT", 8100)?;
        let log_level = env::var("GENERATE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let backend_url =
            env::var("COMPLETION_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let system_prompt = env::var("GENERATE_SYSTEM_PROMPT")
            .unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string());
        let timeout = Duration::from_secs(parse_seconds("GENERATE_TIMEOUT_SECS", 60)?);

        Ok(Self {
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            upstream: UpstreamConfig {
                backend_url,
                system_prompt,
                timeout,
            },
        })
    }
}
