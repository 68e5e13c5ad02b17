//! Peer identity core -- call metadata, connection descriptors, and the peer resolver.

pub mod addr;
pub mod context;
pub mod metadata;
pub mod resolver;
pub mod transport;
pub mod types;

pub use addr::{split_host_port, AddrError};
pub use context::{CallContext, ConnectionDescriptor, InMemoryContext};
pub use metadata::MetadataMap;
pub use resolver::PeerResolver;
#[cfg(feature = "http")]
pub use transport::metadata_from_headers;
pub use types::{HeaderNames, PeerInfo, CLIENT_IP_HEADER, PEER_NAME_HEADER};
