//! axum extractor for the caller's [`PeerInfo`].

use std::convert::Infallible;
use std::ops::Deref;

use axum::extract::FromRequestParts;
use http::request::Parts;
use peerinfo_core::{PeerInfo, PeerResolver};

/// Extracts the caller's [`PeerInfo`].
///
/// Uses the value stored by [`PeerInfoLayer`](crate::PeerInfoLayer) when the
/// layer is installed; otherwise resolves it from the request with the
/// default headers. Extraction never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeer(pub PeerInfo);

impl ResolvedPeer {
    #[must_use]
    pub fn into_inner(self) -> PeerInfo {
        self.0
    }
}

impl Deref for ResolvedPeer {
    type Target = PeerInfo;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ResolvedPeer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(info) = parts.extensions.get::<PeerInfo>() {
            return Ok(Self(info.clone()));
        }
        Ok(Self(PeerResolver::new().peer_info(Some(&*parts))))
    }
}
