//! CLI error handling with user-friendly messages.

use std::fmt;
use std::process;

use coordcast::service::ServiceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to create the service
    ServiceCreation(ServiceError),
    /// The input could not be converted
    Conversion(String),
    /// Failed to build the async runtime
    Runtime(String),
    /// Failed reading from stdin
    Stdin(std::io::Error),
}

impl CliError {
    /// Exits the process with an error message and code 1.
    ///
    /// Invalid input is not an internal failure; `Conversion` errors exit
    /// with code 2 so scripts can tell the two apart.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        let code = match self {
            CliError::Conversion(_) => 2,
            _ => 1,
        };
        process::exit(code)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ServiceCreation(e) => write!(f, "Failed to create service: {}", e),
            CliError::Conversion(msg) => write!(f, "{}", msg),
            CliError::Runtime(msg) => write!(f, "Failed to start async runtime: {}", msg),
            CliError::Stdin(e) => write!(f, "Failed to read input: {}", e),
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        CliError::ServiceCreation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        let err = CliError::Config("bad key".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("bad key"));
    }
}
