//! Client IP extraction
//!
//! Picks the address to geolocate: the raw value of a configured header, or
//! the host part of the transport peer address.

use axum::extract::ConnectInfo;
use axum::http::{HeaderValue, Request};
use std::net::SocketAddr;

#[derive(Debug, Clone, Default)]
pub struct IpExtractor {
    custom_header: Option<String>,
}

impl IpExtractor {
    /// An empty header name means "use the peer address".
    pub fn new(custom_header: Option<&str>) -> Self {
        Self {
            custom_header: custom_header.filter(|h| !h.is_empty()).map(str::to_string),
        }
    }

    /// The client address for `req`, as it will appear in the IP header.
    ///
    /// The header value is returned byte for byte, unvalidated; an absent
    /// header or an absent peer address yields an empty value.
    pub fn extract<B>(&self, req: &Request<B>) -> HeaderValue {
        let value = match &self.custom_header {
            Some(name) => req.headers().get(name.as_str()).cloned(),
            None => req
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .and_then(|ConnectInfo(addr)| HeaderValue::from_str(&peer_host(addr)).ok()),
        };
        value.unwrap_or_else(|| HeaderValue::from_static(""))
    }
}

/// Host part of a peer address. IPv6 scope ids are kept (`fe80::1%2`).
fn peer_host(addr: &SocketAddr) -> String {
    match addr {
        SocketAddr::V6(v6) if v6.scope_id() != 0 => format!("{}%{}", v6.ip(), v6.scope_id()),
        _ => addr.ip().to_string(),
    }
}
