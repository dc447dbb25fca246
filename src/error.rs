//! Error types for the javelin CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for javelin operations.
///
/// Each variant maps to a specific exit code. A missing JavaFX plugin in
/// the descriptor is deliberately not represented here: it is a warning,
/// not an error, and the run continues without patching.
#[derive(Error, Debug)]
pub enum JavelinError {
    /// User provided invalid arguments or the project is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// The source build descriptor is missing or malformed.
    #[error("failed to read build descriptor: {0}")]
    DescriptorParse(String),

    /// The patched descriptor could not be serialized.
    #[error("failed to write agent descriptor: {0}")]
    DescriptorWrite(String),

    /// Maven could not be started.
    #[error("{0}")]
    Invocation(String),

    /// Maven ran but exited unsuccessfully.
    #[error("{0}")]
    RunFailed(String),

    /// The external native linker failed. The cause chain from the
    /// toolchain boundary is rendered in full.
    #[error("native link failed: {0:#}")]
    LinkError(anyhow::Error),
}

impl JavelinError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            JavelinError::UserError(_) => exit_codes::USER_ERROR,
            JavelinError::DescriptorParse(_) => exit_codes::DESCRIPTOR_FAILURE,
            JavelinError::DescriptorWrite(_) => exit_codes::DESCRIPTOR_FAILURE,
            JavelinError::Invocation(_) => exit_codes::INVOCATION_FAILURE,
            JavelinError::RunFailed(_) => exit_codes::INVOCATION_FAILURE,
            JavelinError::LinkError(_) => exit_codes::LINK_FAILURE,
        }
    }
}

/// Result type alias for javelin operations.
pub type Result<T> = std::result::Result<T, JavelinError>;
