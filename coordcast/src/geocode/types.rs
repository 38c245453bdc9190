//! Geocoder trait and error types.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::coord::{LatLong, WordTriple};

/// Errors from word-triple resolution.
///
/// Transient failures (`Network`, `RateLimited`) are distinct from
/// permanent input failures (`UnknownWords`) so callers can offer a retry
/// only where it is meaningful.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// Transport-level failure: DNS, TLS, timeout, 5xx.
    #[error("geocoding request failed: {0}")]
    Network(String),

    /// The caller-side request budget is exhausted.
    #[error("geocoding rate limit exceeded ({limit} requests per minute)")]
    RateLimited { limit: u32 },

    /// The provider does not know this triple.
    #[error("no position is known for '{0}'")]
    UnknownWords(String),

    /// The provider answered with something other than the documented
    /// shape.
    #[error("geocoding response was malformed: {0}")]
    InvalidResponse(String),
}

impl GeocodeError {
    /// True for failures where retrying later can succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GeocodeError::Network(_) | GeocodeError::RateLimited { .. }
        )
    }
}

/// Boxed future returned by [`Geocoder::resolve`].
pub type ResolveFuture<'a> = Pin<Box<dyn Future<Output = Result<LatLong, GeocodeError>> + Send + 'a>>;

/// Resolves word triples to positions.
///
/// The boxed-future signature keeps the trait object-safe so the engine
/// can hold `Arc<dyn Geocoder>` and wrappers can stack freely.
pub trait Geocoder: Send + Sync {
    /// Resolves `words` to a geographic position.
    fn resolve<'a>(&'a self, words: &'a WordTriple) -> ResolveFuture<'a>;

    /// Implementation name for logging.
    fn name(&self) -> &str;
}

/// Geocoder backed by a fixed in-memory table.
///
/// Serves tests and offline operation; lookups are keyed by the lowercased
/// `a.b.c` form.
#[derive(Debug, Default, Clone)]
pub struct StaticGeocoder {
    entries: HashMap<String, LatLong>,
}

impl StaticGeocoder {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a triple to the table, replacing any previous position.
    pub fn with_entry(mut self, words: &str, position: LatLong) -> Self {
        self.entries.insert(words.to_lowercase(), position);
        self
    }
}

impl Geocoder for StaticGeocoder {
    fn resolve<'a>(&'a self, words: &'a WordTriple) -> ResolveFuture<'a> {
        Box::pin(async move {
            self.entries
                .get(&words.key())
                .copied()
                .ok_or_else(|| GeocodeError::UnknownWords(words.key()))
        })
    }

    fn name(&self) -> &str {
        "static"
    }
}
