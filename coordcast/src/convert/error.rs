//! Conversion error taxonomy.

use thiserror::Error;

use crate::geocode::GeocodeError;
use crate::parse::ParseError;

/// Errors surfaced by the conversion engine.
///
/// Input errors (`Parse`) are permanent: retrying the same text cannot
/// succeed. Geocoding errors may be transient; callers inspect
/// [`ConvertError::is_transient`] to decide whether a retry is worth
/// offering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Empty or all-whitespace input.
    #[error("input is empty")]
    EmptyInput,

    /// The text failed the selected format's grammar or range checks.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Word-triple resolution failed.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// A word triple was submitted but no geocoding provider is wired in.
    #[error("no geocoding provider is configured")]
    GeocoderUnavailable,

    /// Normalization boundary for unexpected internal failures; the
    /// underlying cause is preserved as a message.
    #[error("internal conversion failure: {0}")]
    Internal(String),
}

impl ConvertError {
    /// True when retrying the same input later can succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ConvertError::Geocode(err) if err.is_transient())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Format;

    #[test]
    fn parse_errors_are_permanent() {
        let err = ConvertError::from(ParseError::GrammarMismatch(Format::Utm));
        assert!(!err.is_transient());
        assert!(err.to_string().contains("utm"));
    }

    #[test]
    fn network_errors_are_transient() {
        let err = ConvertError::from(GeocodeError::Network("timeout".into()));
        assert!(err.is_transient());

        let err = ConvertError::from(GeocodeError::UnknownWords("a.b.c".into()));
        assert!(!err.is_transient());
    }
}
