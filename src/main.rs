//! Javelin: native-image build helper for JavaFX Maven projects.
//!
//! This is the main entry point for the `javelin` CLI. It parses
//! arguments, dispatches to the appropriate command handler, and handles
//! errors with proper exit codes.

mod cleanup;
mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod invoker;
pub mod linker;
#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
