//! Helpers shared by the command handlers.

use coordcast::config::ConfigFile;
use coordcast::convert::Conversion;
use coordcast::coord::Format;
use coordcast::service::CoordinateService;

use crate::error::CliError;

/// Builds the tokio runtime the async commands run on.
pub fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))
}

/// Builds the full service from configuration.
pub fn build_service(config: &ConfigFile) -> Result<CoordinateService, CliError> {
    CoordinateService::new(config).map_err(CliError::from)
}

/// Prints a conversion in the fixed notation order.
pub fn print_conversion(conversion: &Conversion) {
    for format in Format::ALL {
        if let Some(coordinate) = conversion.conversions.get(&format) {
            println!("{:<8} {}", format.name(), coordinate.raw());
        }
    }
}

/// Serializes a conversion for `--json` output.
pub fn conversion_to_json(input: &str, format: Format, conversion: &Conversion) -> serde_json::Value {
    let mut conversions = serde_json::Map::new();
    for notation in Format::ALL {
        if let Some(coordinate) = conversion.conversions.get(&notation) {
            conversions.insert(
                notation.name().to_string(),
                serde_json::json!({
                    "text": coordinate.raw(),
                    "value": coordinate,
                }),
            );
        }
    }

    serde_json::json!({
        "input": input,
        "format": format.name(),
        "cache_hit": conversion.cache_hit,
        "conversions": conversions,
    })
}
