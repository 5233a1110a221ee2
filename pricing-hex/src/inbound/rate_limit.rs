//! Rate limiting middleware using Governor.
//!
//! Implements per-client rate limiting with a token bucket algorithm.
//! Clients are told apart by the peer address of the connection; request
//! headers are caller-controlled and never used as the key.
//! Pricing itself is stateless; this is purely transport protection.

use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
};
use serde_json::json;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    sync::Arc,
    time::Duration,
};

type KeyedLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Key for connections served without peer information.
const UNKNOWN_PEER: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    /// One token bucket per peer address
    limiter: KeyedLimiter,
    quota: Quota,
    clock: DefaultClock,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::per_minute(100)
    }
}

impl RateLimiterState {
    /// Allows `requests` per minute per client, refilled evenly over the
    /// minute, with a burst of the same size. Zero is treated as one.
    pub fn per_minute(requests: u32) -> Self {
        let burst = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_minute(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            quota,
            clock: DefaultClock::default(),
        }
    }

    pub fn quota(&self) -> &Quota {
        &self.quota
    }

    /// Admits one request from `client`, or returns how long until the
    /// next one would be admitted.
    pub fn check(&self, client: IpAddr) -> Result<(), Duration> {
        self.limiter
            .check_key(&client)
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    /// Number of clients currently holding a bucket.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Drops buckets that have refilled completely; they are
    /// indistinguishable from a client never seen before.
    pub fn evict_idle(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Runs `evict_idle` every `every` until the runtime shuts down.
    pub fn spawn_eviction(self: Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                self.evict_idle();
                tracing::trace!(clients = self.tracked_clients(), "Evicted idle rate limiters");
            }
        })
    }
}

/// Whole seconds a client should wait, rounded up and never zero.
fn retry_after_seconds(wait: Duration) -> u64 {
    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    secs.max(1)
}

/// Rate limiting middleware.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Skip rate limiting for health endpoint
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(UNKNOWN_PEER);

    if let Err(wait) = limiter.check(client) {
        let retry_after = retry_after_seconds(wait);
        tracing::warn!(%client, retry_after, "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, retry_after.to_string())],
            Json(json!({
                "error": "Rate limit exceeded. Please try again later.",
                "retry_after_seconds": retry_after
            })),
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn test_quota_refills_across_the_minute() {
        let state = RateLimiterState::per_minute(100);
        assert_eq!(state.quota().replenish_interval(), Duration::from_millis(600));
        assert_eq!(state.quota().burst_size().get(), 100);
    }

    #[test]
    fn test_quota_exhausts_per_key() {
        let state = RateLimiterState::per_minute(2);
        assert!(state.check(peer(1)).is_ok());
        assert!(state.check(peer(1)).is_ok());
        let wait = state.check(peer(1)).unwrap_err();
        assert!(wait <= Duration::from_secs(30));
        assert!(state.check(peer(2)).is_ok());
    }

    #[test]
    fn test_zero_requests_treated_as_one() {
        let state = RateLimiterState::per_minute(0);
        assert!(state.check(peer(1)).is_ok());
        assert!(state.check(peer(1)).is_err());
    }

    #[test]
    fn test_idle_clients_are_evicted() {
        // 600/min refills one request every 100ms.
        let state = RateLimiterState::per_minute(600);
        for last in 1..=5 {
            assert!(state.check(peer(last)).is_ok());
        }
        assert_eq!(state.tracked_clients(), 5);

        std::thread::sleep(Duration::from_millis(250));
        state.evict_idle();
        assert_eq!(state.tracked_clients(), 0);
    }

    #[test]
    fn test_retry_after_rounds_up() {
        assert_eq!(retry_after_seconds(Duration::from_millis(600)), 1);
        assert_eq!(retry_after_seconds(Duration::from_millis(19_001)), 20);
        assert_eq!(retry_after_seconds(Duration::from_secs(20)), 20);
        assert_eq!(retry_after_seconds(Duration::ZERO), 1);
    }
}
