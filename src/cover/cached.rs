//! LRU/TTL cache and circuit breaker in front of a cover lookup.

use super::{normalize_isbn, CoverError, CoverLookup};
use crate::config::CoverConfig;
use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
struct CacheEntry {
    fetched_at: Instant,
    url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BreakerState {
    Closed { consecutive_failures: usize },
    Open { since: Instant },
    /// A trial request went upstream at `since`; another is admitted only after a further cooldown.
    HalfOpen { since: Instant },
}

/// Decorates a lookup with a per-ISBN cache (found and not-found answers, never errors)
/// and fails fast while the upstream has been failing.
pub struct CachedCovers<L> {
    inner: L,
    cache: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
    failure_threshold: usize,
    cooldown: Duration,
    breaker: Mutex<BreakerState>,
}

impl<L: CoverLookup> CachedCovers<L> {
    pub fn new(
        inner: L,
        capacity: NonZeroUsize,
        ttl: Duration,
        failure_threshold: NonZeroUsize,
        cooldown: Duration,
    ) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
            ttl,
            failure_threshold: failure_threshold.get(),
            cooldown,
            breaker: Mutex::new(BreakerState::Closed { consecutive_failures: 0 }),
        }
    }

    pub fn from_config(inner: L, config: &CoverConfig) -> Self {
        Self::new(
            inner,
            config.cache_capacity,
            config.cache_ttl,
            config.breaker_threshold,
            config.breaker_cooldown,
        )
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_open(&self) -> bool {
        self.breaker
            .lock()
            .map(|s| matches!(*s, BreakerState::Open { .. }))
            .unwrap_or(false)
    }

    fn cached(&self, key: &str) -> Option<Option<String>> {
        let mut cache = self.cache.lock().ok()?;
        let fresh = match cache.get(key) {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => Some(entry.url.clone()),
            Some(_) => None,
            None => return None,
        };
        if fresh.is_none() {
            cache.pop(key);
        }
        fresh
    }

    fn store(&self, key: String, url: Option<String>) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, CacheEntry { fetched_at: Instant::now(), url });
        }
    }

    /// Whether a request may go upstream now. Moves Open to HalfOpen once the cooldown has passed.
    fn admit(&self) -> bool {
        let Ok(mut state) = self.breaker.lock() else {
            return true;
        };
        match *state {
            BreakerState::Closed { .. } => true,
            BreakerState::Open { since } | BreakerState::HalfOpen { since } if since.elapsed() >= self.cooldown => {
                *state = BreakerState::HalfOpen { since: Instant::now() };
                true
            }
            BreakerState::Open { .. } | BreakerState::HalfOpen { .. } => false,
        }
    }

    fn record_success(&self) {
        if let Ok(mut state) = self.breaker.lock() {
            if *state != (BreakerState::Closed { consecutive_failures: 0 }) {
                tracing::debug!("cover lookup circuit closed");
            }
            *state = BreakerState::Closed { consecutive_failures: 0 };
        }
    }

    fn record_failure(&self) {
        if let Ok(mut state) = self.breaker.lock() {
            let failures = match *state {
                BreakerState::Closed { consecutive_failures } => consecutive_failures + 1,
                _ => self.failure_threshold,
            };
            if failures >= self.failure_threshold {
                tracing::warn!(failures, cooldown = ?self.cooldown, "cover lookup circuit opened");
                *state = BreakerState::Open { since: Instant::now() };
            } else {
                *state = BreakerState::Closed { consecutive_failures: failures };
            }
        }
    }
}

#[async_trait]
impl<L: CoverLookup> CoverLookup for CachedCovers<L> {
    async fn lookup(&self, isbn: &str) -> Result<Option<String>, CoverError> {
        let key = normalize_isbn(isbn);
        if key.is_empty() {
            return Ok(None);
        }
        if let Some(hit) = self.cached(&key) {
            tracing::debug!(isbn = %key, "cover cache hit");
            return Ok(hit);
        }
        if !self.admit() {
            return Err(CoverError::CircuitOpen);
        }
        match self.inner.lookup(&key).await {
            Ok(url) => {
                self.record_success();
                self.store(key, url.clone());
                Ok(url)
            }
            Err(e) => {
                self.record_failure();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Upstream {
        calls: Arc<AtomicUsize>,
        failing: Arc<AtomicBool>,
    }

    #[async_trait]
    impl CoverLookup for Upstream {
        async fn lookup(&self, isbn: &str) -> Result<Option<String>, CoverError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(CoverError::Status(503));
            }
            if isbn.starts_with('0') {
                return Ok(None);
            }
            Ok(Some(format!("http://covers/{}.jpg", isbn)))
        }
    }

    fn n(v: usize) -> NonZeroUsize {
        NonZeroUsize::new(v).unwrap()
    }

    fn cached(upstream: &Upstream, ttl: Duration, threshold: usize, cooldown: Duration) -> CachedCovers<Upstream> {
        CachedCovers::new(upstream.clone(), n(4), ttl, n(threshold), cooldown)
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let up = Upstream::default();
        let covers = cached(&up, Duration::from_secs(60), 3, Duration::from_secs(60));

        let first = covers.lookup("978-1").await.unwrap();
        let second = covers.lookup("9781").await.unwrap();
        assert_eq!(first.as_deref(), Some("http://covers/9781.jpg"));
        assert_eq!(first, second);
        assert_eq!(up.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn not_found_answers_are_cached_too() {
        let up = Upstream::default();
        let covers = cached(&up, Duration::from_secs(60), 3, Duration::from_secs(60));

        assert_eq!(covers.lookup("0123").await.unwrap(), None);
        assert_eq!(covers.lookup("0123").await.unwrap(), None);
        assert_eq!(up.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entries_are_refetched() {
        let up = Upstream::default();
        let covers = cached(&up, Duration::ZERO, 3, Duration::from_secs(60));

        covers.lookup("9781").await.unwrap();
        covers.lookup("9781").await.unwrap();
        assert_eq!(up.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn capacity_evicts_least_recently_used() {
        let up = Upstream::default();
        let covers = cached(&up, Duration::from_secs(60), 3, Duration::from_secs(60));
        for isbn in ["1", "2", "3", "4", "5"] {
            covers.lookup(isbn).await.unwrap();
        }
        assert_eq!(covers.cached_len(), 4);
        covers.lookup("1").await.unwrap();
        assert_eq!(up.calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn errors_are_not_cached_and_open_the_circuit() {
        let up = Upstream::default();
        up.failing.store(true, Ordering::SeqCst);
        let covers = cached(&up, Duration::from_secs(60), 2, Duration::from_secs(60));

        assert!(matches!(covers.lookup("9781").await, Err(CoverError::Status(503))));
        assert!(!covers.is_open());
        assert!(matches!(covers.lookup("9782").await, Err(CoverError::Status(503))));
        assert!(covers.is_open());

        assert!(matches!(covers.lookup("9783").await, Err(CoverError::CircuitOpen)));
        assert_eq!(up.calls.load(Ordering::SeqCst), 2);
        assert_eq!(covers.cached_len(), 0);
    }

    #[tokio::test]
    async fn trial_after_cooldown_closes_or_reopens() {
        let up = Upstream::default();
        up.failing.store(true, Ordering::SeqCst);
        let covers = cached(&up, Duration::from_secs(60), 1, Duration::ZERO);

        assert!(covers.lookup("9781").await.is_err());
        assert!(covers.is_open());

        assert!(matches!(covers.lookup("9781").await, Err(CoverError::Status(503))));
        assert!(covers.is_open());

        up.failing.store(false, Ordering::SeqCst);
        assert!(covers.lookup("9781").await.unwrap().is_some());
        assert!(!covers.is_open());
    }

    #[tokio::test]
    async fn empty_isbn_never_reaches_upstream() {
        let up = Upstream::default();
        let covers = cached(&up, Duration::from_secs(60), 1, Duration::from_secs(60));
        assert_eq!(covers.lookup("  ").await.unwrap(), None);
        assert_eq!(up.calls.load(Ordering::SeqCst), 0);
    }
}
