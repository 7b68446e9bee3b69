use std::error::Error;
use std::fmt;

use tracing_subscriber::filter::{EnvFilter, ParseError};

use crate::config::TelemetryConfig;

/// Errors raised while installing the global tracing subscriber.
#[derive(Debug)]
pub enum TelemetryError {
    Filter { directive: String, source: ParseError },
    Install(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { directive, .. } => {
                write!(f, "invalid log filter directive '{}'", directive)
            }
            TelemetryError::Install(err) => write!(f, "failed to install subscriber: {}", err),
        }
    }
}

impl Error for TelemetryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Install(err) => Some(err.as_ref()),
        }
    }
}

/// Install the process-wide subscriber, preferring `RUST_LOG` over the
/// configured default directive.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(&config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Install)
}

fn env_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(directive).map_err(|source| TelemetryError::Filter {
            directive: directive.to_string(),
            source,
        }),
    }
}
