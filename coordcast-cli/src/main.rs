//! Coordcast CLI - command-line interface.
//!
//! Provides one-shot `convert`, `detect`, and `validate` commands plus an
//! interactive `watch` mode that feeds stdin lines through the debounced
//! scheduler the way a UI input field would.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use coordcast::config::ConfigFile;
use coordcast::logging::init_logging;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "coordcast")]
#[command(version = coordcast::VERSION)]
#[command(about = "Detect, validate, and convert coordinate notations", long_about = None)]
struct Args {
    /// Write logs to the configured log file as well as stderr
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a coordinate into every supported notation
    Convert(commands::convert::ConvertArgs),
    /// Guess which notation a coordinate is written in
    Detect(commands::detect::DetectArgs),
    /// Validate a coordinate and print suggestions on failure
    Validate(commands::validate::ValidateArgs),
    /// Read lines from stdin and convert them with debouncing
    Watch(commands::watch::WatchArgs),
}

fn main() {
    let args = Args::parse();

    let config = match ConfigFile::load() {
        Ok(config) => config,
        Err(e) => CliError::Config(e.to_string()).exit(),
    };

    // Keep the guard alive for the process lifetime.
    let _logging_guard = if args.log {
        match init_logging(&config.logging.directory, &config.logging.file) {
            Ok(guard) => Some(guard),
            Err(e) => CliError::LoggingInit(e.to_string()).exit(),
        }
    } else {
        None
    };

    let result = match args.command {
        Command::Convert(convert_args) => commands::convert::run(&config, convert_args),
        Command::Detect(detect_args) => commands::detect::run(detect_args),
        Command::Validate(validate_args) => commands::validate::run(&config, validate_args),
        Command::Watch(watch_args) => commands::watch::run(&config, watch_args),
    };

    if let Err(e) = result {
        e.exit();
    }
}
