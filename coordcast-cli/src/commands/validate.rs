//! Validation command.

use std::process;

use clap::Args;
use coordcast::config::ConfigFile;
use coordcast::coord::Format;

use crate::error::CliError;

use super::common;
use super::convert::parse_format;

/// Arguments for `coordcast validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Coordinate text to validate
    pub input: String,

    /// Notation to validate against; auto-detected when omitted
    #[arg(long, value_parser = parse_format)]
    pub format: Option<Format>,

    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs the validate command.
///
/// Exits 0 for valid input and 2 for invalid input, so scripts can branch
/// without parsing the output.
pub fn run(config: &ConfigFile, args: ValidateArgs) -> Result<(), CliError> {
    let format = match args.format.or_else(|| coordcast::detect::detect(&args.input)) {
        Some(format) => format,
        None => return Err(CliError::Conversion("input is empty".to_string())),
    };

    let result = if format == Format::Words {
        // Word triples are checked against the provider, which is async.
        let runtime = common::runtime()?;
        let service = common::build_service(config)?;
        let result = runtime.block_on(service.validate_words(&args.input));
        runtime.block_on(service.shutdown());
        result
    } else {
        coordcast::validate::validate(&args.input, format)
    };

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "input": args.input,
                "format": format.name(),
                "result": result,
            })
        );
    } else if result.valid {
        println!("valid {}", format.name());
    } else {
        println!(
            "invalid: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
        for suggestion in &result.suggestions {
            println!("hint: {}", suggestion);
        }
    }

    if !result.valid {
        process::exit(2);
    }
    Ok(())
}
