//! Per-IP rate limiting using token buckets.
//!
//! The site runs two limiters: a generous one over every request and a
//! stricter one over settings writes and logo uploads.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::config::RateLimitSettings;

/// Buckets idle this long are dropped by cleanup.
const IDLE_BUCKET_AGE: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    max_tokens: f64,
    /// Tokens added per second.
    refill_rate: f64,
    last_update: Instant,
}

impl TokenBucket {
    fn new(max_tokens: f64, refill_rate: f64) -> Self {
        Self {
            tokens: max_tokens,
            max_tokens,
            refill_rate,
            last_update: Instant::now(),
        }
    }

    fn try_consume(&mut self) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        self.last_update = now;

        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.max_tokens);

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Seconds until one whole token is available again.
    fn seconds_until_token(&self) -> u64 {
        let missing = (1.0 - self.tokens).max(0.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let secs = (missing / self.refill_rate).ceil() as u64;
        secs.max(1)
    }
}

/// Requests allowed per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Burst size and requests per window.
    pub requests: u32,
    /// Window length in seconds.
    pub per_secs: u32,
}

impl RateLimitConfig {
    /// The limiter applied to every request.
    #[must_use]
    pub fn global(settings: &RateLimitSettings) -> Self {
        Self {
            requests: settings.requests,
            per_secs: settings.per_secs,
        }
    }

    /// The limiter applied to settings writes.
    #[must_use]
    pub fn settings_writes(settings: &RateLimitSettings) -> Self {
        Self {
            requests: settings.settings_requests,
            per_secs: settings.settings_per_secs,
        }
    }

    fn refill_rate(&self) -> f64 {
        f64::from(self.requests) / f64::from(self.per_secs.max(1))
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request may proceed.
    Allowed,
    /// Request is over the limit.
    Limited {
        /// Seconds the client should wait.
        retry_after: u64,
        /// Configured requests per window.
        limit: u32,
    },
}

impl RateLimitResult {
    /// Whether the request may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Token buckets per client address.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    name: &'static str,
    buckets: Arc<RwLock<HashMap<IpAddr, TokenBucket>>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a limiter; `name` appears in logs.
    #[must_use]
    pub fn new(name: &'static str, config: RateLimitConfig) -> Self {
        Self {
            name,
            buckets: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Count a request from `ip`.
    pub async fn check(&self, ip: IpAddr) -> RateLimitResult {
        let mut buckets = self.buckets.write().await;
        let bucket = buckets.entry(ip).or_insert_with(|| {
            TokenBucket::new(f64::from(self.config.requests), self.config.refill_rate())
        });

        if bucket.try_consume() {
            RateLimitResult::Allowed
        } else {
            debug!("{} rate limit hit by {}", self.name, ip);
            RateLimitResult::Limited {
                retry_after: bucket.seconds_until_token(),
                limit: self.config.requests,
            }
        }
    }

    /// Drop buckets that have been idle for a while.
    pub async fn cleanup(&self) -> usize {
        let mut buckets = self.buckets.write().await;
        let now = Instant::now();
        let before = buckets.len();
        buckets.retain(|_, bucket| now.duration_since(bucket.last_update) < IDLE_BUCKET_AGE);
        before - buckets.len()
    }

    /// Spawn a task that runs [`cleanup`](Self::cleanup) every `interval`.
    pub fn start_cleanup_task(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let removed = limiter.cleanup().await;
                if removed > 0 {
                    debug!("{} limiter dropped {} idle buckets", limiter.name, removed);
                }
            }
        })
    }

    /// Number of client addresses being tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.buckets.read().await.len()
    }
}
