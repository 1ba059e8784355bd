//! Application-level errors

use thiserror::Error;

/// Errors raised while binding a function to the command line.
///
/// `AlreadyCommand` and `UnresolvedType` are configuration mistakes in the
/// calling code and are never retried.
#[derive(Error, Debug)]
pub enum DecorateError {
    #[error("'{name}' is already a full clap command; manual command construction cannot be auto-decorated")]
    AlreadyCommand { name: String },

    #[error("no suitable parameter type for base type '{base}' (annotation: {annotation}, metadata: {metadata})")]
    UnresolvedType {
        parameter: String,
        base: String,
        annotation: String,
        metadata: String,
    },

    #[error("parameter '{name}' is declared more than once")]
    DuplicateParameter { name: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Parse(#[from] clap::Error),

    #[error("cannot read argument '{name}': {source}")]
    Matches {
        name: String,
        #[source]
        source: clap::parser::MatchesError,
    },
}

/// Result type for application layer operations.
pub type DecorateResult<T> = Result<T, DecorateError>;
