//! Exit code constants for the javelin CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid state)
//! - 2: Descriptor failure (parse or write)
//! - 3: Maven invocation failure
//! - 4: Native link failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, not a Maven project, missing toolchain.
pub const USER_ERROR: i32 = 1;

/// Descriptor failure: the build descriptor could not be read or the
/// patched copy could not be written.
pub const DESCRIPTOR_FAILURE: i32 = 2;

/// Maven invocation failure: the subprocess could not be started or
/// exited unsuccessfully.
pub const INVOCATION_FAILURE: i32 = 3;

/// Native link failure: the external linker reported an error.
pub const LINK_FAILURE: i32 = 4;
