//! Per-request timezone resolution.
//!
//! A user either pins a timezone in their settings or lets it be detected from
//! their IP address. Detection goes through the public geolocation services
//! in `geoip`, with answers cached for a day in `cache`.

pub mod cache;
pub mod geoip;
pub mod resolve;

use std::net::IpAddr;

use axum::http::HeaderMap;

/// Returns the originating client address: the first `X-Forwarded-For` hop if
/// the header is present, otherwise the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> Option<IpAddr> {
    match headers.get("x-forwarded-for") {
        Some(value) => value
            .to_str()
            .ok()?
            .split(',')
            .next()
            .map(str::trim)
            .and_then(|ip| ip.parse().ok()),
        None => peer,
    }
}

/// Whether geolocating `ip` can give a meaningful answer.
pub fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation())
        }
        IpAddr::V6(v6) => {
            if let Some(v4) = v6.to_ipv4_mapped() {
                return is_public_ip(IpAddr::V4(v4));
            }
            let first = v6.segments()[0];
            let unique_local = (first & 0xfe00) == 0xfc00;
            let link_local = (first & 0xffc0) == 0xfe80;
            !(v6.is_loopback() || v6.is_unspecified() || unique_local || link_local)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_private_addresses_are_skipped() {
        for addr in [
            "127.0.0.1",
            "10.1.2.3",
            "192.168.0.10",
            "172.16.5.4",
            "172.31.255.1",
            "169.254.1.1",
            "0.0.0.0",
            "::1",
            "fd00::1",
            "fe80::1",
            "::ffff:192.168.1.1",
        ] {
            assert!(!is_public_ip(ip(addr)), "{addr} should not be public");
        }
    }

    #[test]
    fn test_public_addresses_are_detected() {
        for addr in ["8.8.8.8", "172.32.0.1", "2606:4700::1111", "::ffff:1.1.1.1"] {
            assert!(is_public_ip(ip(addr)), "{addr} should be public");
        }
    }

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(
            client_ip(&headers, Some(ip("10.0.0.2"))),
            Some(ip("203.0.113.7"))
        );
    }

    #[test]
    fn test_client_ip_falls_back_to_peer() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, Some(ip("8.8.4.4"))), Some(ip("8.8.4.4")));
        assert_eq!(client_ip(&headers, None), None);
    }

    #[test]
    fn test_client_ip_garbage_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("localhost"));
        assert_eq!(client_ip(&headers, Some(ip("8.8.4.4"))), None);
    }
}
