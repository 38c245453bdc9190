//! Interactive stdin mode.
//!
//! Feeds stdin lines through the debounced scheduler the way a UI input
//! field would: bursts arriving inside the coalescing window collapse to
//! the latest line, and every executed unit prints its validation verdict,
//! conversion table, and budget measurements.

use std::time::Duration;

use clap::Args;
use coordcast::config::ConfigFile;
use coordcast::coord::Format;
use coordcast::sched::ScheduledOutcome;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::error::CliError;

use super::common;
use super::convert::parse_format;

/// How often pending debounced work is polled for its deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(4);

/// Arguments for `coordcast watch`.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Notation for all lines; auto-detected per line when omitted
    #[arg(long, value_parser = parse_format)]
    pub format: Option<Format>,
}

/// Runs the watch command until stdin closes.
pub fn run(config: &ConfigFile, args: WatchArgs) -> Result<(), CliError> {
    let runtime = common::runtime()?;
    let service = common::build_service(config)?;

    runtime.block_on(async {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => service.submit(&line, args.format).await,
                    Ok(None) => {
                        // Stdin closed: run whatever is still pending.
                        if let Some(outcome) = service.flush().await {
                            print_outcome(&outcome);
                        }
                        break;
                    }
                    Err(e) => {
                        service.shutdown().await;
                        return Err(CliError::Stdin(e));
                    }
                },
                _ = tokio::time::sleep(POLL_INTERVAL) => {
                    if let Some(outcome) = service.poll().await {
                        print_outcome(&outcome);
                    }
                }
            }
        }

        service.shutdown().await;
        Ok(())
    })
}

fn print_outcome(outcome: &ScheduledOutcome) {
    debug!(raw = %outcome.raw, valid = outcome.validation.valid, "scheduled unit finished");
    match outcome.format {
        Some(format) => println!("> {} ({})", outcome.raw, format.name()),
        None => println!("> {}", outcome.raw),
    }

    if !outcome.validation.valid {
        println!(
            "invalid: {}",
            outcome.validation.error.as_deref().unwrap_or("unknown error")
        );
        for suggestion in &outcome.validation.suggestions {
            println!("hint: {}", suggestion);
        }
        return;
    }

    match &outcome.conversion {
        Some(Ok(conversion)) => common::print_conversion(conversion),
        Some(Err(err)) => println!("error: {}", err),
        None => {}
    }

    if let Some(measurement) = &outcome.conversion_time {
        if measurement.over_budget {
            println!(
                "note: conversion took {:?}, over its {:?} budget",
                measurement.elapsed, measurement.budget
            );
        }
    }
}
