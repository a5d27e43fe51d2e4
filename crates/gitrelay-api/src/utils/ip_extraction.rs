//! Client address resolution
//!
//! Picks the caller's IP out of `X-Forwarded-For` / `X-Real-IP`, trusting only as many
//! trailing forwarded entries as there are proxies in front of the service.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{request::Parts, HeaderMap};

use crate::state::AppState;

const UNKNOWN: &str = "unknown";

/// Resolved client IP (`"unknown"` when nothing usable was found)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl ClientIp {
    pub fn as_option(&self) -> Option<&str> {
        (self.0 != UNKNOWN).then_some(self.0.as_str())
    }
}

impl FromRequestParts<Arc<AppState>> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let socket_addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0);
        Ok(ClientIp(extract_client_ip(
            &parts.headers,
            socket_addr.as_ref(),
            state.config.base().trusted_proxy_count,
        )))
    }
}

/// Client IP from forwarding headers, falling back to the socket peer address.
pub fn extract_client_ip(
    headers: &HeaderMap,
    socket_addr: Option<&SocketAddr>,
    trusted_proxy_count: usize,
) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| from_forwarded_for(v, trusted_proxy_count));

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| is_valid_ip(ip))
            .map(String::from)
    };

    forwarded
        .or_else(real_ip)
        .or_else(|| socket_addr.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// `client, proxy1, proxy2`: with N trusted proxies the client is the entry before the
/// last N. With none trusted, or a chain too short, only the nearest hop is believed.
fn from_forwarded_for(header_value: &str, trusted_proxy_count: usize) -> Option<String> {
    let hops: Vec<&str> = header_value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let index = if trusted_proxy_count == 0 || hops.len() <= trusted_proxy_count {
        hops.len().checked_sub(1)?
    } else {
        hops.len() - trusted_proxy_count - 1
    };

    let candidate = hops[index];
    is_valid_ip(candidate).then(|| candidate.to_string())
}

fn is_valid_ip(ip_str: &str) -> bool {
    ip_str.parse::<IpAddr>().is_ok()
}
