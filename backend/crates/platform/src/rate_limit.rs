//! Rate Limiting Infrastructure
//!
//! Fixed-window request counting keyed by client.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 120,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    pub fn window_ms(&self) -> i64 {
        (self.window.as_millis() as i64).max(1)
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the current window closes
    pub reset_after: Duration,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count one request for `key` and report whether it is within the limit
    async fn check_and_increment(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult;
}

/// Process-local counters. Counts are lost on restart and not shared
/// between instances.
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    windows: Mutex<Windows>,
}

#[derive(Debug, Default)]
struct Windows {
    current_start_ms: i64,
    counts: HashMap<String, u32>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as [`RateLimitStore::check_and_increment`] with an explicit clock
    pub fn check_at(&self, key: &str, config: &RateLimitConfig, now_ms: i64) -> RateLimitResult {
        let window_ms = config.window_ms();
        let window_start = now_ms.div_euclid(window_ms) * window_ms;

        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Entering a new window drops every stale counter at once.
        if windows.current_start_ms != window_start {
            windows.current_start_ms = window_start;
            windows.counts.clear();
        }

        let count = windows.counts.entry(key.to_string()).or_insert(0);
        *count = count.saturating_add(1);

        RateLimitResult {
            allowed: *count <= config.max_requests,
            limit: config.max_requests,
            remaining: config.max_requests.saturating_sub(*count),
            reset_after: Duration::from_millis((window_start + window_ms - now_ms) as u64),
        }
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn check_and_increment(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult {
        self.check_at(key, config, now_ms())
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max: u32) -> RateLimitConfig {
        RateLimitConfig::new(max, Duration::from_secs(60))
    }

    #[test]
    fn test_allows_up_to_limit() {
        let store = MemoryRateLimitStore::new();
        let config = config(2);

        let first = store.check_at("1.2.3.4", &config, 1_000);
        assert!(first.allowed);
        assert_eq!(first.remaining, 1);

        assert!(store.check_at("1.2.3.4", &config, 2_000).allowed);

        let third = store.check_at("1.2.3.4", &config, 3_000);
        assert!(!third.allowed);
        assert_eq!(third.remaining, 0);
        assert_eq!(third.reset_after, Duration::from_millis(57_000));
    }

    #[test]
    fn test_keys_are_independent() {
        let store = MemoryRateLimitStore::new();
        let config = config(1);

        assert!(store.check_at("a", &config, 0).allowed);
        assert!(!store.check_at("a", &config, 1).allowed);
        assert!(store.check_at("b", &config, 2).allowed);
    }

    #[test]
    fn test_new_window_resets_counts() {
        let store = MemoryRateLimitStore::new();
        let config = config(1);

        assert!(store.check_at("a", &config, 59_999).allowed);
        assert!(!store.check_at("a", &config, 59_999).allowed);
        assert!(store.check_at("a", &config, 60_000).allowed);
    }

    #[test]
    fn test_defaults() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 120);
        assert_eq!(config.window_ms(), 60_000);
    }
}
