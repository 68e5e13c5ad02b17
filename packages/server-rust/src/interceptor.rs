//! gRPC interceptor attaching [`PeerInfo`] to incoming tonic requests.

use std::sync::Arc;

use peerinfo_core::{PeerInfo, PeerResolver};
use tonic::{Request, Status};
use tracing::{debug, info_span, Span};

use crate::config::PeerInfoConfig;

/// Interceptor factory that resolves peer identity for each call.
///
/// The resolved [`PeerInfo`] is inserted into the request extensions. When
/// `config.record_span` is set, the resolution event is emitted inside a
/// `peer` span carrying `peer.name` and `peer.ip`. The interceptor never
/// fails a call.
///
/// # Example
/// ```ignore
/// use peerinfo_server::{peer_info_interceptor, PeerInfoConfig};
///
/// let interceptor = peer_info_interceptor(PeerInfoConfig::default());
/// let service = LedgerServer::with_interceptor(ledger_impl, interceptor);
/// ```
pub fn peer_info_interceptor(
    config: PeerInfoConfig,
) -> impl Fn(Request<()>) -> Result<Request<()>, Status> + Clone {
    let config = Arc::new(config);
    move |mut req: Request<()>| {
        let info = PeerResolver::with_headers(config.headers.clone()).peer_info(Some(&req));

        let span = if config.record_span {
            info_span!("peer", peer.name = %info.name, peer.ip = %info.ip)
        } else {
            Span::none()
        };
        let _entered = span.enter();
        debug!(peer.name = %info.name, peer.ip = %info.ip, "grpc peer resolved");
        req.extensions_mut().insert(info);
        Ok(req)
    }
}

/// Peer info for a tonic request.
///
/// Returns the value stored by [`peer_info_interceptor`], or resolves it with
/// the default headers when the interceptor is not installed.
pub fn peer_info<T>(req: &Request<T>) -> PeerInfo {
    req.extensions()
        .get::<PeerInfo>()
        .cloned()
        .unwrap_or_else(|| PeerResolver::new().peer_info(Some(req)))
}
