//! Per-call peer identity resolution.
//!
//! A [`PeerResolver`] answers two independent questions about a call: the
//! caller-declared name, and the IP address the call should be attributed to.
//! IP resolution runs in two tiers:
//!
//! 1. **Header tier** -- the client-supplied IP header, admitted only if it
//!    parses as an IPv4 or IPv6 literal.
//! 2. **Connection tier** -- the host part of the transport peer address.
//!
//! Nothing here fails. Every unresolvable field comes back as an empty string.

use std::net::IpAddr;

use tracing::debug;

use crate::addr::split_host_port;
use crate::context::CallContext;
use crate::metadata::MetadataMap;
use crate::types::{HeaderNames, PeerInfo};

/// Resolves [`PeerInfo`] for a single call.
///
/// Create one per inbound call. The incoming metadata is read from the
/// context on first use and cached for the life of the instance, including
/// an empty map when the call carried no metadata.
#[derive(Debug, Default)]
pub struct PeerResolver {
    headers: HeaderNames,
    metadata: Option<MetadataMap>,
}

impl PeerResolver {
    /// Resolver using the default `x-peer-name` / `x-client-ip` headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver reading identity from custom header keys.
    #[must_use]
    pub fn with_headers(headers: HeaderNames) -> Self {
        Self {
            headers,
            metadata: None,
        }
    }

    /// Resolves both name and IP.
    ///
    /// A missing context short-circuits to an empty [`PeerInfo`] without
    /// touching the metadata cache.
    pub fn peer_info<C>(&mut self, ctx: Option<&C>) -> PeerInfo
    where
        C: CallContext + ?Sized,
    {
        if ctx.is_none() {
            return PeerInfo::default();
        }

        PeerInfo {
            name: self.peer_name(ctx),
            ip: self.peer_ip(ctx),
        }
    }

    /// Caller-declared peer name, returned verbatim.
    pub fn peer_name<C>(&mut self, ctx: Option<&C>) -> String
    where
        C: CallContext + ?Sized,
    {
        self.header_value(ctx, HeaderNames::peer_name)
    }

    /// Best-effort client IP for the call.
    pub fn peer_ip<C>(&mut self, ctx: Option<&C>) -> String
    where
        C: CallContext + ?Sized,
    {
        let claimed = self.header_value(ctx, HeaderNames::client_ip);
        if !claimed.is_empty() {
            if claimed.parse::<IpAddr>().is_ok() {
                return claimed;
            }
            debug!(value = %claimed, "ignoring malformed client ip header");
        }

        ctx.map_or_else(String::new, connection_ip)
    }

    /// First value of the header selected by `key`, or empty.
    fn header_value<C>(&mut self, ctx: Option<&C>, key: fn(&HeaderNames) -> &str) -> String
    where
        C: CallContext + ?Sized,
    {
        let metadata = self.metadata.get_or_insert_with(|| {
            ctx.and_then(|c| c.incoming_metadata()).unwrap_or_default()
        });

        let key = key(&self.headers);
        if ctx.is_none() || key.is_empty() {
            return String::new();
        }

        metadata.get(key).map(str::to_owned).unwrap_or_default()
    }
}

/// Host of the transport peer address, or a bare IP literal address.
fn connection_ip<C>(ctx: &C) -> String
where
    C: CallContext + ?Sized,
{
    let Some(addr) = ctx.peer().and_then(|peer| peer.addr().map(str::to_owned)) else {
        return String::new();
    };

    match split_host_port(&addr).map(|(host, _port)| host.to_owned()) {
        Ok(host) => host,
        Err(_) if addr.parse::<IpAddr>().is_ok() => addr,
        Err(err) => {
            debug!(addr = %addr, error = %err, "unusable peer address");
            String::new()
        }
    }
}
