//! Tracing subscriber setup.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Errors from installing the global tracing subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
    #[error("failed to install tracing subscriber: {0}")]
    Init(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `config.filter`. Peer resolution logs
/// discarded client IP headers at `debug` under the `peerinfo_core` target,
/// e.g. `RUST_LOG=info,peerinfo_core=debug`.
///
/// # Errors
///
/// Returns `TelemetryError::Filter` if `config.filter` cannot be parsed and
/// `TelemetryError::Init` if a global subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(TelemetryError::Init)
}
