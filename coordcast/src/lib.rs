//! Coordcast - coordinate notation detection, validation, and conversion.
//!
//! This library accepts free-text coordinates in four notations
//! (decimal/DMS lat-long, UTM, MGRS, word triples), detects which one was
//! used, validates it with actionable suggestions, and converts it into
//! every other representable notation. A bounded LRU cache and a
//! debounced, budget-measured scheduler make the pipeline cheap enough to
//! run on every keystroke of an interactive input field.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides the facade:
//!
//! ```ignore
//! use coordcast::config::ConfigFile;
//! use coordcast::coord::Format;
//! use coordcast::service::CoordinateService;
//!
//! let config = ConfigFile::load()?;
//! let service = CoordinateService::new(&config)?;
//!
//! let format = service.detect("18TWL8562811322").unwrap();
//! let result = service.convert("18TWL8562811322", format).await?;
//! ```

pub mod cache;
pub mod config;
pub mod convert;
pub mod coord;
pub mod detect;
pub mod geocode;
pub mod geodesy;
pub mod logging;
pub mod parse;
pub mod sched;
pub mod service;
pub mod time;
pub mod validate;

/// Version of the coordcast library and CLI.
///
/// Synchronized across all components in the workspace; defined in
/// `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_injected() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn detection_is_reachable_from_the_crate_root() {
        use crate::coord::Format;
        assert_eq!(detect::detect("40.7128, -74.0060"), Some(Format::LatLong));
    }
}
