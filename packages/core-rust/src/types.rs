use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Header carrying the caller-declared peer name.
pub const PEER_NAME_HEADER: &str = "x-peer-name";

/// Header carrying the caller-declared client IP override.
pub const CLIENT_IP_HEADER: &str = "x-client-ip";

/// Resolved caller identity for a single call.
///
/// Both fields use the empty string as the "unknown" sentinel. Consumers
/// apply their own policy (reject, default, ignore) when a field is empty;
/// the resolver never reports failure any other way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerInfo {
    /// Caller-declared name, taken verbatim from the peer name header.
    pub name: String,
    /// Best-effort client IP: a validated header value or the transport host.
    pub ip: String,
}

impl PeerInfo {
    /// Returns `true` when neither the name nor the IP could be resolved.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.name.is_empty() && self.ip.is_empty()
    }
}

impl fmt::Display for PeerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() { "-" } else { &self.name };
        let ip = if self.ip.is_empty() { "-" } else { &self.ip };
        write!(f, "{name}@{ip}")
    }
}

/// Metadata keys the resolver consults.
///
/// Keys are stored lowercase so lookups against a [`MetadataMap`](crate::MetadataMap)
/// stay case-insensitive regardless of how they were configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNames {
    peer_name: Cow<'static, str>,
    client_ip: Cow<'static, str>,
}

impl HeaderNames {
    /// Builds a custom key set. Keys are lowercased on construction.
    pub fn new(
        peer_name: impl Into<Cow<'static, str>>,
        client_ip: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            peer_name: lowercase(peer_name.into()),
            client_ip: lowercase(client_ip.into()),
        }
    }

    /// Key of the peer name header.
    #[must_use]
    pub fn peer_name(&self) -> &str {
        &self.peer_name
    }

    /// Key of the client IP header.
    #[must_use]
    pub fn client_ip(&self) -> &str {
        &self.client_ip
    }
}

impl Default for HeaderNames {
    fn default() -> Self {
        Self {
            peer_name: Cow::Borrowed(PEER_NAME_HEADER),
            client_ip: Cow::Borrowed(CLIENT_IP_HEADER),
        }
    }
}

fn lowercase(key: Cow<'static, str>) -> Cow<'static, str> {
    if key.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(key.to_ascii_lowercase())
    } else {
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_header_names() {
        let names = HeaderNames::default();
        assert_eq!(names.peer_name(), "x-peer-name");
        assert_eq!(names.client_ip(), "x-client-ip");
    }

    #[test]
    fn custom_header_names_are_lowercased() {
        let names = HeaderNames::new("X-Caller", String::from("X-Real-IP"));
        assert_eq!(names.peer_name(), "x-caller");
        assert_eq!(names.client_ip(), "x-real-ip");
    }

    #[test]
    fn default_peer_info_is_unknown() {
        let info = PeerInfo::default();
        assert!(info.is_unknown());
        assert_eq!(info.to_string(), "-@-");
    }

    #[test]
    fn peer_info_display() {
        let info = PeerInfo {
            name: "billing".to_string(),
            ip: "10.0.0.4".to_string(),
        };
        assert!(!info.is_unknown());
        assert_eq!(info.to_string(), "billing@10.0.0.4");
    }

    #[test]
    fn peer_info_serializes_as_flat_object() {
        let info = PeerInfo {
            name: "alice".to_string(),
            ip: String::new(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "alice", "ip": "" }));
    }
}
