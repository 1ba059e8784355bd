//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::DecorateError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Decorate(#[from] DecorateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) => crate::exitcode::IOERR,
            CliError::Decorate(e) => match e {
                DecorateError::Parse(_) => crate::exitcode::USAGE,
                DecorateError::Config { .. } => crate::exitcode::CONFIG,
                DecorateError::AlreadyCommand { .. }
                | DecorateError::UnresolvedType { .. }
                | DecorateError::DuplicateParameter { .. }
                | DecorateError::Matches { .. } => crate::exitcode::SOFTWARE,
            },
        }
    }
}
