//! Error types for the cke CLI.
//!
//! Only fatal errors live here. Problems with a single instance or resource
//! are reported as diagnostics by the renderer and never reach this type.

use crate::engine::LoadError;
use crate::exit_codes;
use thiserror::Error;

/// Fatal error type for cke operations.
///
/// Each variant maps to an exit code.
#[derive(Error, Debug)]
pub enum CkeError {
    /// The command line was invalid.
    #[error("{0}")]
    Usage(String),

    /// The configuration file could not be read, parsed or validated.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The source tree could not be walked.
    #[error("failed to discover source files: {0}")]
    Discovery(String),

    /// Source files could not be loaded or built into instances.
    #[error("failed to load configuration: {0}")]
    Load(#[from] LoadError),

    /// Rendered output could not be produced.
    #[error("{0}")]
    Output(String),
}

impl CkeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CkeError::Usage(_) | CkeError::Config(_) => exit_codes::USER_ERROR,
            CkeError::Discovery(_) | CkeError::Load(_) => exit_codes::EVALUATION_FAILURE,
            CkeError::Output(_) => exit_codes::OUTPUT_FAILURE,
        }
    }
}

/// Result type alias for cke operations.
pub type Result<T> = std::result::Result<T, CkeError>;
