//! CLI-level errors (wraps export and terminal I/O errors)

use thiserror::Error;

use super::exitcode;
use crate::export::ExportError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exitcode::USAGE,
            CliError::Io(_) => exitcode::IOERR,
            CliError::Export(_) => exitcode::CANTCREAT,
        }
    }
}
