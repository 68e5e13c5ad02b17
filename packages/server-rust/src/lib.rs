//! Peer identity for axum and tonic servers -- a Tower layer, a gRPC
//! interceptor, and an extractor built on `peerinfo-core`.

pub mod config;
pub mod extract;
pub mod interceptor;
pub mod middleware;
pub mod telemetry;

pub use config::{LogConfig, PeerInfoConfig};
pub use extract::ResolvedPeer;
pub use interceptor::{peer_info, peer_info_interceptor};
pub use middleware::{PeerInfoLayer, PeerInfoService};
pub use peerinfo_core::{
    CallContext, ConnectionDescriptor, HeaderNames, InMemoryContext, MetadataMap, PeerInfo,
    PeerResolver,
};
pub use telemetry::{init_tracing, TelemetryError};
