//! Sliding-window rate limiter keyed by caller identity

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::domain::RateLimitConfig;

/// Result of a rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    /// Requests still available in the current window
    pub remaining: u32,
    pub limit: u32,
    /// Time until the oldest request leaves the window
    pub retry_after: Duration,
}

/// Per-identity request timestamps within a sliding window
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    records: RwLock<HashMap<String, VecDeque<Instant>>>,
    cleanup_interval: Duration,
    last_cleanup: RwLock<Instant>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            records: RwLock::new(HashMap::new()),
            cleanup_interval: Duration::from_secs(300),
            last_cleanup: RwLock::new(Instant::now()),
        }
    }

    #[cfg(test)]
    async fn check_and_record(&self, identity: &str) -> RateLimitResult {
        self.check_and_record_weighted(identity, 1).await
    }

    /// Check the limit for a request that takes `cost` slots and record all
    /// of them if allowed
    pub async fn check_and_record_weighted(&self, identity: &str, cost: u32) -> RateLimitResult {
        self.check_and_record_at(identity, Instant::now(), cost).await
    }

    /// Same as `check_and_record_weighted` with an explicit clock reading.
    ///
    /// Purge, check and append happen under one write lock, so concurrent
    /// callers with the same identity cannot both take the last slot.
    pub async fn check_and_record_at(
        &self,
        identity: &str,
        now: Instant,
        cost: u32,
    ) -> RateLimitResult {
        self.maybe_cleanup(now).await;

        let mut records = self.records.write().await;
        let timestamps = records.entry(identity.to_string()).or_default();
        purge(timestamps, now, self.config.window);

        let used = timestamps.len() as u32;
        let limit = self.config.max_requests;

        if used + cost > limit {
            // The window reopens once enough of the oldest slots expire
            let must_expire = (used + cost - limit) as usize;
            let retry_after = timestamps
                .get(must_expire - 1)
                .map(|ts| (*ts + self.config.window).saturating_duration_since(now))
                .unwrap_or(self.config.window);

            return RateLimitResult {
                allowed: false,
                remaining: limit.saturating_sub(used),
                limit,
                retry_after,
            };
        }

        timestamps.extend(std::iter::repeat_n(now, cost as usize));

        RateLimitResult {
            allowed: true,
            remaining: limit - used - cost,
            limit,
            retry_after: Duration::ZERO,
        }
    }

    /// Drop identities whose requests have all left the window
    async fn maybe_cleanup(&self, now: Instant) {
        {
            let last = self.last_cleanup.read().await;
            if now.saturating_duration_since(*last) < self.cleanup_interval {
                return;
            }
        }

        *self.last_cleanup.write().await = now;

        let window = self.config.window;
        let mut records = self.records.write().await;
        records.retain(|_, timestamps| {
            purge(timestamps, now, window);
            !timestamps.is_empty()
        });
    }

    #[cfg(test)]
    async fn tracked_identities(&self) -> usize {
        self.records.read().await.len()
    }
}

fn purge(timestamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(oldest) = timestamps.front() {
        if now.saturating_duration_since(*oldest) >= window {
            timestamps.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn limiter(max_requests: u32, window_secs: u64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig::new(
            max_requests,
            Duration::from_secs(window_secs),
        ))
    }

    #[tokio::test]
    async fn test_allows_up_to_limit_then_rejects() {
        let limiter = limiter(3, 60);
        let start = Instant::now();

        for i in 0..3 {
            let result = limiter
                .check_and_record_at("client-a", start + Duration::from_secs(i), 1)
                .await;
            assert!(result.allowed);
            assert_eq!(result.remaining, 2 - i as u32);
        }

        let rejected = limiter
            .check_and_record_at("client-a", start + Duration::from_secs(10), 1)
            .await;
        assert!(!rejected.allowed);
        assert_eq!(rejected.remaining, 0);
        assert_eq!(rejected.retry_after, Duration::from_secs(50));
    }

    #[tokio::test]
    async fn test_allowed_again_after_window() {
        let limiter = limiter(1, 60);
        let start = Instant::now();

        assert!(limiter.check_and_record_at("client-a", start, 1).await.allowed);
        assert!(!limiter
            .check_and_record_at("client-a", start + Duration::from_secs(59), 1)
            .await
            .allowed);
        assert!(limiter
            .check_and_record_at("client-a", start + Duration::from_secs(60), 1)
            .await
            .allowed);
    }

    #[tokio::test]
    async fn test_rejected_requests_are_not_recorded() {
        let limiter = limiter(1, 60);
        let start = Instant::now();

        limiter.check_and_record_at("client-a", start, 1).await;
        limiter
            .check_and_record_at("client-a", start + Duration::from_secs(30), 1)
            .await;

        // Only the first request counts, so the window reopens 60s after it
        assert!(limiter
            .check_and_record_at("client-a", start + Duration::from_secs(61), 1)
            .await
            .allowed);
    }

    #[tokio::test]
    async fn test_identities_are_independent() {
        let limiter = limiter(1, 60);

        assert!(limiter.check_and_record("client-a").await.allowed);
        assert!(limiter.check_and_record("client-b").await.allowed);
        assert!(!limiter.check_and_record("client-a").await.allowed);
    }

    #[tokio::test]
    async fn test_weighted_request_takes_several_slots() {
        let limiter = limiter(3, 60);
        let start = Instant::now();

        let first = limiter.check_and_record_at("client-a", start, 2).await;
        assert!(first.allowed);
        assert_eq!(first.remaining, 1);

        // One slot left is not enough for another pair
        let second = limiter
            .check_and_record_at("client-a", start + Duration::from_secs(10), 2)
            .await;
        assert!(!second.allowed);
        assert_eq!(second.remaining, 1);
        assert_eq!(second.retry_after, Duration::from_secs(50));

        assert!(limiter
            .check_and_record_at("client-a", start + Duration::from_secs(10), 1)
            .await
            .allowed);
    }

    #[tokio::test]
    async fn test_cost_above_limit_is_never_allowed() {
        let limiter = limiter(1, 60);

        let result = limiter.check_and_record_weighted("client-a", 2).await;

        assert!(!result.allowed);
        assert_eq!(result.retry_after, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_concurrent_callers_never_exceed_limit() {
        let limiter = Arc::new(limiter(5, 60));

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move { limiter.check_and_record("shared").await.allowed })
            })
            .collect();

        let mut allowed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                allowed += 1;
            }
        }

        assert_eq!(allowed, 5);
    }

    #[tokio::test]
    async fn test_cleanup_drops_idle_identities() {
        let limiter = limiter(5, 60);
        let start = Instant::now();

        limiter.check_and_record_at("idle", start, 1).await;
        limiter
            .check_and_record_at("active", start + Duration::from_secs(400), 1)
            .await;

        assert_eq!(limiter.tracked_identities().await, 1);
    }
}
