use crate::utils::ip_extraction::extract_client_ip;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use gitrelay_core::AppError;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::error::HttpAppError;

/// Fixed-window counter for one client
#[derive(Clone, Debug)]
struct RateLimitBucket {
    count: u32,
    reset_at: Instant,
}

impl RateLimitBucket {
    fn new(window: Duration) -> Self {
        Self {
            count: 0,
            reset_at: Instant::now() + window,
        }
    }

    /// Returns `Ok(remaining)` when admitted, `Err(reset_in)` otherwise.
    fn check_and_increment(&mut self, limit: u32, window: Duration) -> Result<u32, Duration> {
        let now = Instant::now();

        if now >= self.reset_at {
            self.count = 0;
            self.reset_at = now + window;
        }

        if self.count < limit {
            self.count += 1;
            Ok(limit.saturating_sub(self.count))
        } else {
            Err(self.reset_at.saturating_duration_since(now))
        }
    }
}

/// Process-wide per-IP limiter, sharded to spread lock contention
///
/// Counters live only in this process and reset when the window elapses.
#[derive(Clone, Debug)]
pub struct HttpRateLimiter {
    shards: Vec<Arc<Mutex<HashMap<String, RateLimitBucket>>>>,
    limit: u32,
    window: Duration,
    trusted_proxy_count: usize,
    max_buckets_per_shard: usize,
}

impl HttpRateLimiter {
    pub fn new(limit: u32, window: Duration, trusted_proxy_count: usize) -> Self {
        Self::with_shards(limit, window, trusted_proxy_count, 16)
    }

    pub fn with_shards(
        limit: u32,
        window: Duration,
        trusted_proxy_count: usize,
        shard_count: usize,
    ) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Arc::new(Mutex::new(HashMap::new())))
            .collect();
        Self {
            shards,
            limit,
            window,
            trusted_proxy_count,
            max_buckets_per_shard: 10_000,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    fn shard_for(&self, key: &str) -> &Mutex<HashMap<String, RateLimitBucket>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % self.shards.len()]
    }

    /// Count one request for `key`.
    pub async fn check(&self, key: &str) -> Result<u32, Duration> {
        let mut buckets = self.shard_for(key).lock().await;

        if buckets.len() >= self.max_buckets_per_shard && !buckets.contains_key(key) {
            let now = Instant::now();
            buckets.retain(|_, bucket| bucket.reset_at > now);

            if buckets.len() >= self.max_buckets_per_shard {
                let oldest = buckets
                    .iter()
                    .min_by_key(|(_, bucket)| bucket.reset_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    buckets.remove(&oldest);
                }
            }
        }

        buckets
            .entry(key.to_string())
            .or_insert_with(|| RateLimitBucket::new(self.window))
            .check_and_increment(self.limit, self.window)
    }

    /// Drop buckets whose window has elapsed.
    pub async fn cleanup_expired_buckets(&self) {
        let now = Instant::now();
        let mut cleaned = 0;

        for shard in &self.shards {
            let mut buckets = shard.lock().await;
            let before = buckets.len();
            buckets.retain(|_, bucket| bucket.reset_at > now);
            cleaned += before - buckets.len();
        }

        if cleaned > 0 {
            tracing::debug!(
                buckets_cleaned = cleaned,
                "Cleaned up expired rate limit buckets"
            );
        }
    }
}

fn set_header(response: &mut Response, name: &'static str, value: impl ToString) {
    if let Ok(value) = HeaderValue::from_str(&value.to_string()) {
        response.headers_mut().insert(name, value);
    }
}

/// Per-IP rate limiting middleware
///
/// Adds `X-RateLimit-Limit` and `X-RateLimit-Remaining` to every response and answers
/// `429 RATE_LIMITED` with `Retry-After` once the window's budget is spent.
pub async fn rate_limit_middleware(
    State(rate_limiter): State<Arc<HttpRateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let socket_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);
    let ip = extract_client_ip(
        request.headers(),
        socket_addr.as_ref(),
        rate_limiter.trusted_proxy_count,
    );
    let limit = rate_limiter.limit();

    match rate_limiter.check(&format!("ip:{}", ip)).await {
        Ok(remaining) => {
            let mut response = next.run(request).await;
            set_header(&mut response, "X-RateLimit-Limit", limit);
            set_header(&mut response, "X-RateLimit-Remaining", remaining);
            response
        }
        Err(reset_in) => {
            tracing::warn!(
                client_ip = %ip,
                path = %request.uri().path(),
                limit = limit,
                "Rate limit exceeded"
            );

            let mut response = HttpAppError(AppError::RateLimited {
                retry_after_secs: reset_in.as_secs().max(1),
            })
            .into_response();
            set_header(&mut response, "X-RateLimit-Limit", limit);
            set_header(&mut response, "X-RateLimit-Remaining", 0);
            response
        }
    }
}
