//! Bounded conversion cache.
//!
//! A fixed-capacity LRU keyed by `(format, normalized text)` that fronts
//! the conversion engine. Entries expire lazily after a maximum age: an
//! expired entry is ignored on lookup, not deleted, and there is no
//! background sweep. Eviction only happens on insert when the capacity is
//! reached, and picks the least-recently-used entry.

mod stats;
mod store;
mod types;

pub use stats::{CacheStats, CacheStatsSnapshot};
pub use store::ConversionCache;
pub use types::{CacheConfig, CacheKey, CachedConversion};
