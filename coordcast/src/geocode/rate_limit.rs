//! Caller-side rate limiting for the geocoding provider.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::warn;

use crate::coord::WordTriple;
use crate::time::Clock;

use super::types::{GeocodeError, Geocoder, ResolveFuture};

/// Sliding-window request limiter.
///
/// Admits at most `limit` acquisitions per `window`; older acquisitions
/// fall out of the window as the clock advances. The clock is injected so
/// tests can slide the window without sleeping.
pub struct SlidingWindowLimiter {
    limit: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
    admitted: Mutex<VecDeque<std::time::Instant>>,
}

impl SlidingWindowLimiter {
    /// Creates a limiter admitting `limit` requests per `window`.
    pub fn new(limit: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            limit,
            window,
            clock,
            admitted: Mutex::new(VecDeque::new()),
        }
    }

    /// Tries to take one slot; fails with `RateLimited` when the window is
    /// full.
    pub fn try_acquire(&self) -> Result<(), GeocodeError> {
        let now = self.clock.now();
        let mut admitted = self.admitted.lock().unwrap();

        while let Some(&front) = admitted.front() {
            if now.duration_since(front) >= self.window {
                admitted.pop_front();
            } else {
                break;
            }
        }

        if admitted.len() as u32 >= self.limit {
            return Err(GeocodeError::RateLimited { limit: self.limit });
        }
        admitted.push_back(now);
        Ok(())
    }
}

/// Geocoder wrapper that spends the caller-side request budget before any
/// request reaches the inner implementation.
pub struct RateLimitedGeocoder {
    inner: Arc<dyn Geocoder>,
    limiter: SlidingWindowLimiter,
}

impl RateLimitedGeocoder {
    /// Wraps `inner` with a 60 requests/minute default budget.
    pub fn new(inner: Arc<dyn Geocoder>, clock: Arc<dyn Clock>) -> Self {
        Self::with_limit(inner, 60, clock)
    }

    /// Wraps `inner` with a custom per-minute budget.
    pub fn with_limit(inner: Arc<dyn Geocoder>, per_minute: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            limiter: SlidingWindowLimiter::new(per_minute, Duration::from_secs(60), clock),
        }
    }
}

impl Geocoder for RateLimitedGeocoder {
    fn resolve<'a>(&'a self, words: &'a WordTriple) -> ResolveFuture<'a> {
        Box::pin(async move {
            if let Err(err) = self.limiter.try_acquire() {
                warn!(words = %words.key(), "geocoding request rejected by local rate limit");
                return Err(err);
            }
            self.inner.resolve(words).await
        })
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
