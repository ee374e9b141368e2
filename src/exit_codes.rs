//! Exit code constants for the cke CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid configuration)
//! - 2: Discovery or evaluation failure
//! - 3: Output failure (safety check, output directory, stdout)
//!
//! Per-instance and per-resource problems are reported but never change the
//! exit code.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Source files could not be discovered, loaded or evaluated.
pub const EVALUATION_FAILURE: i32 = 2;

/// Rendered output could not be produced.
pub const OUTPUT_FAILURE: i32 = 3;
