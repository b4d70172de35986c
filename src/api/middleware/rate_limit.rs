//! Per-client token bucket rate limits.

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Per-client key: the socket peer address, or the forwarded client address
/// when running behind a trusted reverse proxy.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl ClientIpKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        Self { behind_proxy }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.behind_proxy {
            SmartIpKeyExtractor.extract(req)
        } else {
            PeerIpKeyExtractor.extract(req)
        }
    }
}

pub type RateLimitLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Refill interval and bucket size for one limiter.
#[derive(Debug, Clone, Copy)]
struct Quota {
    per_second: u64,
    burst: u32,
}

/// `/health`, polled by load balancers and uptime checks.
const PUBLIC_QUOTA: Quota = Quota {
    per_second: 2,
    burst: 100,
};

/// `/api/*`. A generation run or CSV import writes many rows per request.
const API_QUOTA: Quota = Quota {
    per_second: 1,
    burst: 20,
};

fn build(quota: Quota, behind_proxy: bool) -> RateLimitLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor::new(behind_proxy))
        .per_second(quota.per_second)
        .burst_size(quota.burst)
        .finish()
        .expect("rate limit quotas are non-zero");

    GovernorLayer::new(Arc::new(config))
}

/// Limiter for public endpoints. Over-limit requests get `429`.
pub fn layer(behind_proxy: bool) -> RateLimitLayer {
    build(PUBLIC_QUOTA, behind_proxy)
}

/// Stricter limiter for authenticated endpoints.
pub fn secure_layer(behind_proxy: bool) -> RateLimitLayer {
    build(API_QUOTA, behind_proxy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::ConnectInfo;
    use std::net::SocketAddr;

    fn request(forwarded: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri("/api/events");
        if let Some(ip) = forwarded {
            builder = builder.header("x-forwarded-for", ip);
        }
        let mut req = builder.body(()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 40000))));
        req
    }

    #[test]
    fn test_peer_address_used_without_proxy() {
        let key = ClientIpKeyExtractor::new(false)
            .extract(&request(Some("203.0.113.9")))
            .unwrap();
        assert_eq!(key, "10.0.0.1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_forwarded_address_used_behind_proxy() {
        let key = ClientIpKeyExtractor::new(true)
            .extract(&request(Some("203.0.113.9")))
            .unwrap();
        assert_eq!(key, "203.0.113.9".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_behind_proxy_falls_back_to_peer() {
        let key = ClientIpKeyExtractor::new(true)
            .extract(&request(None))
            .unwrap();
        assert_eq!(key, "10.0.0.1".parse::<IpAddr>().unwrap());
    }
}
