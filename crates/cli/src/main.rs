//! Assetra command line
//!
//! Browse the rental catalog, price a cart and place simulated orders.

use std::{io, process};

use tracing::error;

use crate::config::Cli;

mod args;
mod commands;
mod config;
mod observability;

/// Assetra CLI entry point
pub fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(init_error) = observability::init_subscriber(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("{init_error}");
        }

        process::exit(1);
    }

    let mut stdout = io::stdout().lock();

    if let Err(run_error) = commands::run(&cli.command, &cli.catalog, &mut stdout) {
        error!("{run_error}");

        #[expect(
            clippy::print_stderr,
            reason = "the error is the command's answer, not just a log line"
        )]
        {
            eprintln!("error: {run_error}");
        }

        process::exit(1);
    }
}
