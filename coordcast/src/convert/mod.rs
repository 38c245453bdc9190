//! Cross-format conversion engine.
//!
//! [`ConversionEngine`] runs the full pipeline for one input: trim,
//! reject empty, cache lookup, parse, invariant check, derive the
//! equivalents in every other representable format, store, return. All
//! failures are error values; unexpected internal conditions are
//! normalized to [`ConvertError::Internal`] at this boundary so callers
//! never see a raw panic or a half-written cache.
//!
//! [`offload`] provides the optional message-passing worker: a request
//! `{raw, format}` answered with the same [`ConversionResult`] the inline
//! path produces.

mod engine;
mod error;
pub mod offload;

pub use engine::{Conversion, ConversionEngine, ConversionResult};
pub use error::ConvertError;
