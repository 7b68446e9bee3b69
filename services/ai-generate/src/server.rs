use std::error::Error;
use std::fmt;
use std::sync::Arc;

use stayconnect::config::ConfigError;
use stayconnect::telemetry::{self, TelemetryError};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::GenerateConfig;
use crate::routes::generate_router;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Startup failures for the generation proxy.
#[derive(Debug)]
pub enum ServeError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Client(UpstreamError),
    Io(std::io::Error),
    Server(axum::Error),
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeError::Config(err) => write!(f, "configuration error: {}", err),
            ServeError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            ServeError::Client(err) => write!(f, "upstream client error: {}", err),
            ServeError::Io(err) => write!(f, "io error: {}", err),
            ServeError::Server(err) => write!(f, "server error: {}", err),
        }
    }
}

impl Error for ServeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServeError::Config(err) => Some(err),
            ServeError::Telemetry(err) => Some(err),
            ServeError::Client(err) => Some(err),
            ServeError::Io(err) => Some(err),
            ServeError::Server(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ServeError {
    fn from(err: ConfigError) -> Self {
        ServeError::Config(err)
    }
}

impl From<TelemetryError> for ServeError {
    fn from(err: TelemetryError) -> Self {
        ServeError::Telemetry(err)
    }
}

impl From<UpstreamError> for ServeError {
    fn from(err: UpstreamError) -> Self {
        ServeError::Client(err)
    }
}

impl From<std::io::Error> for ServeError {
    fn from(err: std::io::Error) -> Self {
        ServeError::Io(err)
    }
}

impl From<axum::Error> for ServeError {
    fn from(err: axum::Error) -> Self {
        ServeError::Server(err)
    }
}

pub(crate) async fn run() -> Result<(), ServeError> {
    let config = GenerateConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let client = UpstreamClient::new(config.upstream.clone())?;
    let app = generate_router(Arc::new(client));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, backend = %config.upstream.backend_url, "generation proxy ready");

    axum::serve(listener, app).await?;
    Ok(())
}
