//! HTTP request adapters.
//!
//! Metadata comes from the request headers. The peer is taken from a
//! [`ConnectionDescriptor`] extension when the transport inserted one, and
//! otherwise from axum's `ConnectInfo<SocketAddr>` extension.

use http::request::Parts;
use http::{Extensions, HeaderMap, Request};

use crate::context::{CallContext, ConnectionDescriptor};
use crate::metadata::MetadataMap;

/// Copies every header value into a [`MetadataMap`].
///
/// Values that are not visible ASCII are skipped; they cannot carry a peer
/// name or IP literal anyway.
#[must_use]
pub fn metadata_from_headers(headers: &HeaderMap) -> MetadataMap {
    let mut metadata = MetadataMap::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            metadata.append(name.as_str(), value);
        }
    }
    metadata
}

fn peer_from_extensions(extensions: &Extensions) -> Option<ConnectionDescriptor> {
    extensions
        .get::<ConnectionDescriptor>()
        .cloned()
        .or_else(|| connect_info_peer(extensions))
}

#[cfg(feature = "axum")]
fn connect_info_peer(extensions: &Extensions) -> Option<ConnectionDescriptor> {
    use axum::extract::ConnectInfo;

    extensions
        .get::<ConnectInfo<std::net::SocketAddr>>()
        .map(|ConnectInfo(addr)| ConnectionDescriptor::from(*addr))
}

#[cfg(not(feature = "axum"))]
fn connect_info_peer(_extensions: &Extensions) -> Option<ConnectionDescriptor> {
    None
}

impl<B> CallContext for Request<B> {
    fn incoming_metadata(&self) -> Option<MetadataMap> {
        Some(metadata_from_headers(self.headers()))
    }

    fn peer(&self) -> Option<ConnectionDescriptor> {
        peer_from_extensions(self.extensions())
    }
}

impl CallContext for Parts {
    fn incoming_metadata(&self) -> Option<MetadataMap> {
        Some(metadata_from_headers(&self.headers))
    }

    fn peer(&self) -> Option<ConnectionDescriptor> {
        peer_from_extensions(&self.extensions)
    }
}
