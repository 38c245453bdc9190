//! Memoization wrapper for geocoders.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

use crate::coord::{LatLong, WordTriple};

use super::types::{Geocoder, ResolveFuture};

/// Geocoder wrapper that remembers successful resolutions.
///
/// Only successes are remembered: transient failures stay retryable and
/// unknown triples are re-queried in case the provider learns them. The
/// map is unbounded by entry count but each entry is a short string and
/// two floats; the conversion cache in front of the engine bounds how many
/// distinct triples are alive in practice.
pub struct MemoizingGeocoder {
    inner: Arc<dyn Geocoder>,
    known: DashMap<String, LatLong>,
}

impl MemoizingGeocoder {
    /// Wraps `inner` with an empty memo table.
    pub fn new(inner: Arc<dyn Geocoder>) -> Self {
        Self {
            inner,
            known: DashMap::new(),
        }
    }

    /// Number of remembered triples.
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// True when nothing has been remembered yet.
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl Geocoder for MemoizingGeocoder {
    fn resolve<'a>(&'a self, words: &'a WordTriple) -> ResolveFuture<'a> {
        Box::pin(async move {
            let key = words.key();
            if let Some(hit) = self.known.get(&key) {
                trace!(words = %key, "geocoding memo hit");
                return Ok(*hit);
            }

            let position = self.inner.resolve(words).await?;
            self.known.insert(key, position);
            Ok(position)
        })
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
