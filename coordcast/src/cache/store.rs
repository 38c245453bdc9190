//! LRU store with lazy expiry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::trace;

use crate::coord::Format;
use crate::time::Clock;

use super::stats::{CacheStats, CacheStatsSnapshot};
use super::types::{CacheConfig, CacheKey, CachedConversion};

/// Stored entry: the conversion plus bookkeeping instants.
#[derive(Debug, Clone)]
struct CacheEntry {
    conversion: CachedConversion,
    /// Creation time; age past `max_age` makes the entry invisible.
    created: Instant,
    /// Last hit time, for LRU eviction. A hit counts as a use.
    last_accessed: Instant,
}

/// Fixed-capacity conversion cache.
///
/// Single-writer by design: the engine owns one instance and is the only
/// component that inserts. Interior mutability keeps the engine API
/// `&self`.
pub struct ConversionCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    stats: CacheStats,
}

impl ConversionCache {
    /// Creates an empty cache.
    pub fn new(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
            clock,
            stats: CacheStats::default(),
        }
    }

    /// Looks up a conversion, refreshing its recency on a hit.
    ///
    /// Entries older than `max_age` are treated as absent but left in
    /// place; the next insert at capacity will evict them first since
    /// their recency is stale.
    pub fn get(&self, raw: &str, format: Format) -> Option<CachedConversion> {
        let key = CacheKey::new(format, raw);
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();

        match entries.get_mut(&key) {
            Some(entry) => {
                if now.duration_since(entry.created) > self.config.max_age {
                    trace!(text = %key.text, %format, "cache entry expired");
                    self.stats.record_expired();
                    return None;
                }
                entry.last_accessed = now;
                self.stats.record_hit();
                Some(entry.conversion.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Inserts a conversion, evicting the least-recently-used entry when
    /// at capacity.
    pub fn put(&self, raw: &str, format: Format, conversion: CachedConversion) {
        let key = CacheKey::new(format, raw);
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();

        if entries.len() >= self.config.capacity && !entries.contains_key(&key) {
            if let Some(victim) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_accessed)
                .map(|(key, _)| key.clone())
            {
                trace!(text = %victim.text, "evicting least recently used cache entry");
                entries.remove(&victim);
                self.stats.record_eviction();
            }
        }

        entries.insert(
            key,
            CacheEntry {
                conversion,
                created: now,
                last_accessed: now,
            },
        );
    }

    /// Empties the cache unconditionally. Statistics are kept.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Number of physically present entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// True when no entries are present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counter snapshot.
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }
}
