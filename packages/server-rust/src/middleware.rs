//! Tower layer that resolves the caller's [`PeerInfo`] for every HTTP request.
//!
//! The resolved value is stored in the request extensions so handlers and
//! inner layers (auth, rate limiting, audit) can read it without resolving
//! again. The layer never rejects a request: unknown fields are empty.

use std::sync::Arc;
use std::task::{Context, Poll};

use http::Request;
use peerinfo_core::{PeerInfo, PeerResolver};
use tower::{Layer, Service};
use tracing::instrument::Instrumented;
use tracing::{debug, info_span, Instrument, Span};

use crate::config::PeerInfoConfig;

// ---------------------------------------------------------------------------
// PeerInfoLayer
// ---------------------------------------------------------------------------

/// Tower layer that attaches a resolved [`PeerInfo`] to each request.
#[derive(Debug, Clone, Default)]
pub struct PeerInfoLayer {
    config: Arc<PeerInfoConfig>,
}

impl PeerInfoLayer {
    #[must_use]
    pub fn new(config: PeerInfoConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for PeerInfoLayer {
    type Service = PeerInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PeerInfoService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

// ---------------------------------------------------------------------------
// PeerInfoService
// ---------------------------------------------------------------------------

/// Service wrapper that resolves peer identity before calling the inner service.
///
/// A fresh [`PeerResolver`] is built per request, so no cached metadata is
/// shared between calls.
#[derive(Debug, Clone)]
pub struct PeerInfoService<S> {
    inner: S,
    config: Arc<PeerInfoConfig>,
}

impl<S, B> Service<Request<B>> for PeerInfoService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Instrumented<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let info = PeerResolver::with_headers(self.config.headers.clone()).peer_info(Some(&req));

        let span = if self.config.record_span {
            info_span!("peer", peer.name = %info.name, peer.ip = %info.ip)
        } else {
            Span::none()
        };
        debug!(parent: &span, peer = %info, "resolved peer");

        req.extensions_mut().insert::<PeerInfo>(info);
        self.inner.call(req).instrument(span)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::future::{ready, Ready};

    use peerinfo_core::{ConnectionDescriptor, HeaderNames};
    use tower::ServiceExt;

    use super::*;

    /// Service that echoes back the `PeerInfo` found in the request extensions.
    struct EchoPeer;

    impl Service<Request<()>> for EchoPeer {
        type Response = Option<PeerInfo>;
        type Error = Infallible;
        type Future = Ready<Result<Self::Response, Self::Error>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<()>) -> Self::Future {
            ready(Ok(req.extensions().get::<PeerInfo>().cloned()))
        }
    }

    fn request(headers: &[(&str, &str)], peer: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let mut req = builder.body(()).unwrap();
        if let Some(addr) = peer {
            req.extensions_mut().insert(ConnectionDescriptor::new(addr));
        }
        req
    }

    #[tokio::test]
    async fn inserts_resolved_peer_info() {
        let svc = PeerInfoLayer::default().layer(EchoPeer);
        let req = request(
            &[("x-peer-name", "billing"), ("x-client-ip", "203.0.113.5")],
            Some("198.51.100.7:4433"),
        );
        let info = svc.oneshot(req).await.unwrap().unwrap();
        assert_eq!(info.name, "billing");
        assert_eq!(info.ip, "203.0.113.5");
    }

    #[tokio::test]
    async fn malformed_client_ip_uses_connection() {
        let svc = PeerInfoLayer::default().layer(EchoPeer);
        let req = request(&[("x-client-ip", "not-an-ip")], Some("198.51.100.7:4433"));
        let info = svc.oneshot(req).await.unwrap().unwrap();
        assert_eq!(info.name, "");
        assert_eq!(info.ip, "198.51.100.7");
    }

    #[tokio::test]
    async fn unknown_peer_is_still_inserted() {
        let svc = PeerInfoLayer::default().layer(EchoPeer);
        let info = svc.oneshot(request(&[], None)).await.unwrap().unwrap();
        assert!(info.is_unknown());
    }

    #[tokio::test]
    async fn custom_headers_without_span() {
        let layer = PeerInfoLayer::new(PeerInfoConfig {
            headers: HeaderNames::new("x-service", "x-forwarded-ip"),
            record_span: false,
        });
        let svc = layer.layer(EchoPeer);
        let req = request(
            &[("x-service", "ledger"), ("x-forwarded-ip", "2001:db8::5")],
            None,
        );
        let info = svc.oneshot(req).await.unwrap().unwrap();
        assert_eq!(info.name, "ledger");
        assert_eq!(info.ip, "2001:db8::5");
    }

    #[tokio::test]
    async fn each_request_is_resolved_independently() {
        let layer = PeerInfoLayer::default();
        let mut svc = layer.layer(EchoPeer);

        let first = svc
            .ready()
            .await
            .unwrap()
            .call(request(&[("x-peer-name", "alice")], None))
            .await
            .unwrap()
            .unwrap();
        let second = svc
            .ready()
            .await
            .unwrap()
            .call(request(&[("x-peer-name", "bob")], None))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(first.name, "alice");
        assert_eq!(second.name, "bob");
    }
}
