//! Notation detection command.

use clap::Args;
use coordcast::detect::detect;

use crate::error::CliError;

/// Arguments for `coordcast detect`.
#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Coordinate text to classify
    pub input: String,

    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs the detect command.
pub fn run(args: DetectArgs) -> Result<(), CliError> {
    match detect(&args.input) {
        Some(format) => {
            if args.json {
                println!("{}", serde_json::json!({ "input": args.input, "format": format.name() }));
            } else {
                println!("{}", format.name());
            }
            Ok(())
        }
        None => Err(CliError::Conversion("input is empty".to_string())),
    }
}
