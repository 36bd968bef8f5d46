//! Error types for the rackpower CLI.

use rackpower_core::CoreError;
use thiserror::Error;

/// Exit codes for the CLI.
///
/// Operational failures are reported on stdout and still exit 0; only
/// invalid argument combinations are process-fatal.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_ARGS: i32 = 1;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(_) => exit_codes::SUCCESS,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
