//! `host:port` splitting for transport peer addresses.

use thiserror::Error;

/// Reasons an address string could not be split into host and port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddrError {
    #[error("missing port in address")]
    MissingPort,
    #[error("too many colons in address")]
    TooManyColons,
    #[error("missing ']' in address")]
    MissingBracket,
    #[error("unexpected '[' in address")]
    UnexpectedOpenBracket,
    #[error("unexpected ']' in address")]
    UnexpectedCloseBracket,
}

/// Splits `host:port` or `[host]:port` into its host and port parts.
///
/// The last colon separates the port, which may be empty. A bracketed host
/// may contain colons (IPv6, optionally with a zone); an unbracketed one may
/// not. The host is returned without brackets and is not validated further.
///
/// # Errors
///
/// Returns [`AddrError`] when the string has no port separator, has colons
/// in an unbracketed host, or has unbalanced or misplaced brackets.
pub fn split_host_port(addr: &str) -> Result<(&str, &str), AddrError> {
    let bytes = addr.as_bytes();
    let colon = addr.rfind(':').ok_or(AddrError::MissingPort)?;

    let (host, rest_start, port_search_start) = if bytes.first() == Some(&b'[') {
        let close = addr.find(']').ok_or(AddrError::MissingBracket)?;
        match close + 1 {
            end if end == addr.len() => return Err(AddrError::MissingPort),
            end if end == colon => {}
            end if bytes[end] == b':' => return Err(AddrError::TooManyColons),
            _ => return Err(AddrError::MissingPort),
        }
        (&addr[1..close], 1, close + 1)
    } else {
        let host = &addr[..colon];
        if host.contains(':') {
            return Err(AddrError::TooManyColons);
        }
        (host, 0, 0)
    };

    if addr[rest_start..].contains('[') {
        return Err(AddrError::UnexpectedOpenBracket);
    }
    if addr[port_search_start..].contains(']') {
        return Err(AddrError::UnexpectedCloseBracket);
    }

    Ok((host, &addr[colon + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_ipv4_with_port() {
        assert_eq!(
            split_host_port("198.51.100.7:4433"),
            Ok(("198.51.100.7", "4433"))
        );
    }

    #[test]
    fn splits_bracketed_ipv6() {
        assert_eq!(
            split_host_port("[2001:db8::1]:443"),
            Ok(("2001:db8::1", "443"))
        );
        assert_eq!(split_host_port("[fe80::1%eth0]:80"), Ok(("fe80::1%eth0", "80")));
    }

    #[test]
    fn host_is_not_validated() {
        assert_eq!(split_host_port("localhost:8080"), Ok(("localhost", "8080")));
        assert_eq!(split_host_port(":8080"), Ok(("", "8080")));
    }

    #[test]
    fn empty_port_is_accepted() {
        assert_eq!(split_host_port("10.0.0.1:"), Ok(("10.0.0.1", "")));
    }

    #[test]
    fn bare_addresses_are_rejected() {
        assert_eq!(split_host_port("203.0.113.9"), Err(AddrError::MissingPort));
        assert_eq!(split_host_port("2001:db8::1"), Err(AddrError::TooManyColons));
        assert_eq!(split_host_port("[::1]"), Err(AddrError::MissingPort));
        assert_eq!(split_host_port(""), Err(AddrError::MissingPort));
    }

    #[test]
    fn malformed_brackets_are_rejected() {
        assert_eq!(split_host_port("[::1:80"), Err(AddrError::MissingBracket));
        assert_eq!(split_host_port("[::1]::80"), Err(AddrError::TooManyColons));
        assert_eq!(split_host_port("[::1]x:80"), Err(AddrError::MissingPort));
        assert_eq!(
            split_host_port("[a[b]:80"),
            Err(AddrError::UnexpectedOpenBracket)
        );
        assert_eq!(
            split_host_port("a]:80"),
            Err(AddrError::UnexpectedCloseBracket)
        );
        assert_eq!(
            split_host_port("[::1]:8]0"),
            Err(AddrError::UnexpectedCloseBracket)
        );
    }
}
