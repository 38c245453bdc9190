//! High-level service facade.
//!
//! [`CoordinateService`] wires clock, cache, geocoder stack, engine, and
//! scheduler together from a [`crate::config::ConfigFile`]. It replaces
//! any process-wide singleton: construct one at application start, pass it
//! by reference, and call [`CoordinateService::shutdown`] on the way out
//! to cancel pending work, clear the cache, and stop the offload worker.

mod error;
mod facade;

pub use error::ServiceError;
pub use facade::CoordinateService;
