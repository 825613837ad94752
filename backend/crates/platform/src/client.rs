//! Client identification utilities

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Resolve the client IP address.
///
/// The first `X-Forwarded-For` entry is only honoured behind a trusted
/// reverse proxy; otherwise clients could pick their own key.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>, trust_forwarded: bool) -> Option<IpAddr> {
    if trust_forwarded {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|xff| xff.split(',').next())
            .and_then(|first| first.trim().parse::<IpAddr>().ok());
        if forwarded.is_some() {
            return forwarded;
        }
    }
    peer
}
