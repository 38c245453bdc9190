//! One-shot conversion command.

use clap::Args;
use coordcast::config::ConfigFile;
use coordcast::coord::Format;

use crate::error::CliError;

use super::common;

/// Arguments for `coordcast convert`.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Coordinate text in any supported notation
    pub input: String,

    /// Source notation; auto-detected when omitted
    #[arg(long, value_parser = parse_format)]
    pub format: Option<Format>,

    /// Emit machine-readable JSON instead of the table
    #[arg(long)]
    pub json: bool,
}

pub(super) fn parse_format(value: &str) -> Result<Format, String> {
    value.parse()
}

/// Runs the convert command.
pub fn run(config: &ConfigFile, args: ConvertArgs) -> Result<(), CliError> {
    let format = match args.format.or_else(|| coordcast::detect::detect(&args.input)) {
        Some(format) => format,
        None => return Err(CliError::Conversion("input is empty".to_string())),
    };

    let runtime = common::runtime()?;
    let service = common::build_service(config)?;

    let result = runtime.block_on(service.convert(&args.input, format));
    runtime.block_on(service.shutdown());

    match result {
        Ok(conversion) => {
            if args.json {
                let json = common::conversion_to_json(&args.input, format, &conversion);
                println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
            } else {
                common::print_conversion(&conversion);
            }
            Ok(())
        }
        Err(err) => {
            // Surface the validator's suggestions alongside the error.
            let validation = service.validate(&args.input, format);
            for suggestion in &validation.suggestions {
                eprintln!("hint: {}", suggestion);
            }
            Err(CliError::Conversion(err.to_string()))
        }
    }
}
