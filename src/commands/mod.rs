//! Command implementations for javelin.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod link;
mod runagent;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Link(args) => link::cmd_link(args),
        Command::Runagent(args) => runagent::cmd_runagent(args),
    }
}
