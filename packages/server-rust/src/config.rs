//! Configuration types for peer resolution and logging.

use peerinfo_core::HeaderNames;

/// Settings shared by the peer info layer and the gRPC interceptor.
#[derive(Debug, Clone)]
pub struct PeerInfoConfig {
    /// Metadata keys carrying the peer name and the client IP override.
    pub headers: HeaderNames,
    /// Whether each request runs inside a `peer` tracing span.
    pub record_span: bool,
}

impl Default for PeerInfoConfig {
    fn default() -> Self {
        Self {
            headers: HeaderNames::default(),
            record_span: true,
        }
    }
}

/// Log output settings for [`init_tracing`](crate::telemetry::init_tracing).
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directives used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}
