use std::net::SocketAddr;

use crate::metadata::MetadataMap;

/// Per-call handle supplied by the transport layer.
///
/// The resolver only reads through these two accessors. Transports decide
/// where the data actually lives (HTTP headers, gRPC metadata, connection
/// extensions).
pub trait CallContext {
    /// Incoming call metadata, or `None` when the call carries none.
    fn incoming_metadata(&self) -> Option<MetadataMap>;

    /// Transport-level peer of the underlying connection, if known.
    fn peer(&self) -> Option<ConnectionDescriptor>;
}

/// Transport-level address of the physical peer connection.
///
/// Independent of application headers. The address is a `host:port`,
/// `[host]:port`, or bare IP literal string, or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    addr: Option<String>,
}

impl ConnectionDescriptor {
    /// Descriptor carrying the given address string.
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: Some(addr.into()),
        }
    }

    /// Descriptor whose transport did not report an address.
    #[must_use]
    pub fn without_addr() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn addr(&self) -> Option<&str> {
        self.addr.as_deref()
    }
}

impl From<SocketAddr> for ConnectionDescriptor {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.to_string())
    }
}

/// A call context whose metadata and peer are already materialized.
///
/// Useful for transports without a native context type and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryContext {
    /// Incoming metadata; `None` means the call carried no metadata at all.
    pub metadata: Option<MetadataMap>,
    /// Connection descriptor attached by the transport.
    pub peer: Option<ConnectionDescriptor>,
}

impl InMemoryContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the metadata, replacing any previous map.
    #[must_use]
    pub fn with_metadata(mut self, metadata: MetadataMap) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Appends one header value, creating the metadata map if needed.
    #[must_use]
    pub fn with_header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.get_or_insert_with(MetadataMap::new).append(key, value);
        self
    }

    #[must_use]
    pub fn with_peer(mut self, peer: ConnectionDescriptor) -> Self {
        self.peer = Some(peer);
        self
    }
}

impl CallContext for InMemoryContext {
    fn incoming_metadata(&self) -> Option<MetadataMap> {
        self.metadata.clone()
    }

    fn peer(&self) -> Option<ConnectionDescriptor> {
        self.peer.clone()
    }
}

impl<C: CallContext + ?Sized> CallContext for &C {
    fn incoming_metadata(&self) -> Option<MetadataMap> {
        (**self).incoming_metadata()
    }

    fn peer(&self) -> Option<ConnectionDescriptor> {
        (**self).peer()
    }
}
