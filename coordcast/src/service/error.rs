//! Service error types.

use thiserror::Error;

use crate::config::ConfigFileError;
use crate::geocode::GeocodeError;

/// Errors during service construction or teardown.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration could not be loaded or holds invalid values.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigFileError),

    /// The geocoding transport could not be created.
    #[error("geocoder error: {0}")]
    Geocoder(#[from] GeocodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_cause() {
        let err = ServiceError::from(GeocodeError::Network("no client".into()));
        assert!(err.to_string().contains("geocoder error"));
        assert!(err.to_string().contains("no client"));
    }
}
