use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::time::sleep;

/// A token bucket which allows fractional tokens for precise refill
#[derive(Debug)]
pub struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn new(capacity: f64, refill_per_sec: f64) -> Self {
        let now = Instant::now();
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec,
            last_refill: now,
        }
    }

    /// Refill tokens based on elapsed time. Uses double precision arithmetic.
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            self.last_refill = now;
        }
    }

    /// Try to consume `amount` tokens. Return true if allowed, and remaining tokens.
    /// Small epsilon to avoid fp surprises
    fn try_consume(&mut self, amount: f64) -> bool {
        self.refill();
        if self.tokens + 1e-12 >= amount {
            self.tokens -= amount;
            true
        } else {
            false
        }
    }

    /// How many tokens remaining (useful for headers)
    fn remaining(&self) -> f64 {
        self.tokens
    }
}

/// Sliding window
#[derive(Debug)]
pub struct SlidingWindow {
    window_size: Duration,
    limit: u64,
    current_window_start: Instant,
    current_count: u64,
    prev_count: u64,
}

impl SlidingWindow {
    fn new(window_size: Duration, limit: u64) -> Self {
        Self {
            window_size,
            limit,
            current_window_start: Instant::now(),
            current_count: 0,
            prev_count: 0,
        }
    }

    /// Returns (allowed, effective_count)
    fn allow(&mut self) -> (bool, f64) {
        let now = Instant::now();
        let mut elapsed = now.duration_since(self.current_window_start);

        if elapsed >= self.window_size {
            // a gap longer than two windows leaves nothing to carry over
            self.prev_count = if elapsed >= self.window_size * 2 { 0 } else { self.current_count };
            self.current_count = 0;
            self.current_window_start = now;
            elapsed = Duration::ZERO;
        }

        let weight = elapsed.as_secs_f64() / self.window_size.as_secs_f64();
        let effective = (self.prev_count as f64) * (1.0 - weight) + (self.current_count as f64);

        if effective < self.limit as f64 {
            self.current_count += 1;
            (true, effective + 1.0)
        } else {
            (false, effective)
        }
    }
}

#[derive(Debug)]
struct RateHybridLimiter {
    bucket: TokenBucket,
    window: SlidingWindow,
    last_seen: Instant,
    per_second_limit: u64,
}

impl RateHybridLimiter {
    fn new(capacity: f64, refill_per_sec: f64, window_size: Duration, limit: u64) -> Self {
        Self {
            bucket: TokenBucket::new(capacity, refill_per_sec),
            window: SlidingWindow::new(window_size, limit),
            last_seen: Instant::now(),
            per_second_limit: limit,
        }
    }

    fn is_allowed(&mut self) -> RateLimitDecision {
        self.last_seen = Instant::now();
        // Try token bucket first
        if self.bucket.try_consume(1.0) {
            return RateLimitDecision::allowed(self.bucket.remaining(), self.per_second_limit);
        }
        // Fallback to sliding window
        let (allow, _eff) = self.window.allow();
        if allow {
            return RateLimitDecision::allowed(0.0_f64.max(self.bucket.remaining()), self.per_second_limit);
        }
        // Rejected: compute retry-after estimate (seconds until 1 token refill or until window moves)
        let tokens_needed = 1.0 - self.bucket.remaining();
        let retry_after = if tokens_needed > 0.0 {
            // seconds to wait for next token
            ((tokens_needed / self.bucket.refill_per_sec).ceil() as u64).max(1)
        } else {
            1
        };
        RateLimitDecision {
            allowed: false,
            remaining: self.bucket.remaining(),
            retry_after: Some(retry_after),
            limit: self.per_second_limit,
        }
    }
}

/// Outcome of one request against a client's limiter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: f64,
    pub retry_after: Option<u64>,
    pub limit: u64,
}

impl RateLimitDecision {
    fn allowed(remaining: f64, limit: u64) -> Self {
        Self { allowed: true, remaining, retry_after: None, limit }
    }
}

type Key = String;

/// Per-client limiters keyed by IP.
#[derive(Clone)]
pub struct RateHybridLimiterStore {
    map: Arc<DashMap<Key, Arc<Mutex<RateHybridLimiter>>>>,
    default_capacity: f64,
    default_refill_per_sec: f64,
    default_window_size: Duration,
    default_limit: u64,
    bucket_ttl: Duration,
}

impl RateHybridLimiterStore {
    pub fn new(
        capacity: f64,
        refill_per_sec: f64,
        window_size: Duration,
        limit: u64,
        bucket_ttl: Duration,
    ) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            default_capacity: capacity,
            default_refill_per_sec: refill_per_sec,
            default_window_size: window_size,
            default_limit: limit,
            bucket_ttl,
        }
    }

    /// Store for the auth endpoints: one minute window sized to the bucket.
    pub fn for_auth(capacity: f64, refill_per_sec: f64) -> Self {
        Self::new(
            capacity,
            refill_per_sec,
            Duration::from_secs(60),
            capacity.max(1.0) as u64,
            Duration::from_secs(600),
        )
    }

    /// Drops limiters idle for longer than the bucket TTL. Must be called
    /// from inside a Tokio runtime.
    pub fn spawn_eviction(&self) {
        let map = self.map.clone();
        let ttl = self.bucket_ttl;
        tokio::spawn(async move {
            let interval = Duration::from_secs(30);
            loop {
                sleep(interval).await;
                let now = Instant::now();
                map.retain(|_, limiter| now.duration_since(limiter.lock().last_seen) <= ttl);
            }
        });
    }

    fn get_bucket(&self, key: &str) -> Arc<Mutex<RateHybridLimiter>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }

        self.map
            .entry(key.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(RateHybridLimiter::new(
                    self.default_capacity,
                    self.default_refill_per_sec,
                    self.default_window_size,
                    self.default_limit,
                )))
            })
            .clone()
    }

    pub fn check(&self, key: &str) -> RateLimitDecision {
        let bucket = self.get_bucket(key);
        let mut limiter = bucket.lock();
        limiter.is_allowed()
    }

    pub fn tracked_clients(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_then_window_then_reject() {
        // two tokens, no refill, one extra request through the window
        let store = RateHybridLimiterStore::new(2.0, 0.0001, Duration::from_secs(60), 1, Duration::from_secs(60));

        assert!(store.check("10.0.0.1").allowed);
        assert!(store.check("10.0.0.1").allowed);
        assert!(store.check("10.0.0.1").allowed);

        let rejected = store.check("10.0.0.1");
        assert!(!rejected.allowed);
        assert!(rejected.retry_after.is_some_and(|secs| secs >= 1));
    }

    #[test]
    fn clients_are_limited_independently() {
        let store = RateHybridLimiterStore::new(1.0, 0.0001, Duration::from_secs(60), 0, Duration::from_secs(60));

        assert!(store.check("10.0.0.1").allowed);
        assert!(!store.check("10.0.0.1").allowed);
        assert!(store.check("10.0.0.2").allowed);
        assert_eq!(store.tracked_clients(), 2);
    }
}
