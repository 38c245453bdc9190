//! Word-triple geocoding collaborator.
//!
//! Resolution of a word triple to a position is owned by an external
//! provider; this module defines the [`Geocoder`] seam plus the
//! implementations and wrappers the engine composes:
//!
//! - [`HttpGeocoder`] - real lookups over a what3words-style JSON API
//! - [`StaticGeocoder`] - fixed in-memory table for tests and offline use
//! - [`RateLimitedGeocoder`] - enforces the provider's documented
//!   60 requests/minute budget before any request leaves the process
//! - [`MemoizingGeocoder`] - remembers successful resolutions so repeated
//!   triples never hit the provider twice
//!
//! The usual stack is `Memoizing(RateLimited(Http))`: memoization sits on
//! the outside so a remembered triple spends no rate-limit budget.

mod http;
mod memo;
mod rate_limit;
mod types;

pub use http::{HttpGeocoder, HttpResponse, ReqwestTransport, Transport};
pub use memo::MemoizingGeocoder;
pub use rate_limit::{RateLimitedGeocoder, SlidingWindowLimiter};
pub use types::{GeocodeError, Geocoder, ResolveFuture, StaticGeocoder};
