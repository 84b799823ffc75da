//! Verdict cache
//!
//! Caches analysis verdicts by image identity so repeated requests for the
//! same image skip classification. Entries expire after a fixed TTL and the
//! cache holds at most `max_size` entries.
//!
//! Eviction is strictly first-in-first-out: reading an entry never moves it,
//! so under capacity pressure the oldest insertion goes first even if it was
//! just read.

use contentguard_core::{CacheConfig, ClassProbability, Verdict};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tracing::debug;

/// Cached analysis result
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Image identity (opaque, typically a resource locator)
    pub key: String,
    /// Aggregated verdict
    pub verdict: Verdict,
    /// Classifier predictions the verdict was computed from
    pub predictions: Vec<ClassProbability>,
    /// Insertion time
    pub created_at: Instant,
}

impl CacheEntry {
    /// Age at `now`
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total lookups
    pub lookups: u64,
    /// Cache hits
    pub hits: u64,
    /// Cache misses (absent or expired)
    pub misses: u64,
    /// Entries dropped on lookup because their TTL had elapsed
    pub expirations: u64,
    /// Entries dropped to make room
    pub evictions: u64,
    /// Insertions
    pub insertions: u64,
}

impl CacheStats {
    /// Hit rate (0.0 - 1.0)
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}

/// TTL-bounded, FIFO-evicting verdict cache
pub struct VerdictCache {
    entries: HashMap<String, CacheEntry>,
    /// Keys in insertion order, oldest first
    order: VecDeque<String>,
    max_size: usize,
    ttl: Duration,
    stats: CacheStats,
}

impl VerdictCache {
    /// Create a new cache
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::with_capacity(max_size),
            order: VecDeque::with_capacity(max_size),
            max_size,
            ttl,
            stats: CacheStats::default(),
        }
    }

    /// Create a cache from configuration
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_size, config.ttl())
    }

    /// Look up a live entry
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        self.get_at(key, Instant::now())
    }

    /// Look up a live entry as of `now`; an expired entry is removed
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<&CacheEntry> {
        self.stats.lookups += 1;

        let expired = match self.entries.get(key) {
            None => {
                self.stats.misses += 1;
                return None;
            }
            Some(entry) => entry.age_at(now) >= self.ttl,
        };

        if expired {
            self.remove(key);
            self.stats.misses += 1;
            self.stats.expirations += 1;
            debug!(key, "Cache entry expired");
            return None;
        }

        self.stats.hits += 1;
        debug!(key, "Cache hit");
        self.entries.get(key)
    }

    /// Store a verdict
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        verdict: Verdict,
        predictions: Vec<ClassProbability>,
    ) {
        self.insert_at(key, verdict, predictions, Instant::now());
    }

    /// Store a verdict as of `now`.
    ///
    /// When the cache is full the oldest insertion is evicted first, even if
    /// `key` is already present. Overwriting a key that survives keeps its
    /// original position and refreshes its timestamp.
    pub fn insert_at(
        &mut self,
        key: impl Into<String>,
        verdict: Verdict,
        predictions: Vec<ClassProbability>,
        now: Instant,
    ) {
        let key = key.into();

        if self.entries.len() >= self.max_size {
            self.evict_oldest();
        }

        if !self.entries.contains_key(&key) {
            self.order.push_back(key.clone());
        }

        self.entries.insert(
            key.clone(),
            CacheEntry {
                key,
                verdict,
                predictions,
                created_at: now,
            },
        );
        self.stats.insertions += 1;
    }

    /// Check if a key is present (expired or not)
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove an entry
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        Some(entry)
    }

    /// Clear all cached entries
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        debug!("Verdict cache cleared");
    }

    /// Evict the oldest insertion (FIFO policy)
    fn evict_oldest(&mut self) {
        if let Some(oldest) = self.order.pop_front() {
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
            debug!(key = oldest.as_str(), "Evicted oldest cache entry");
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get maximum number of entries
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Get entry lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
