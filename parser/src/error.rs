//! Parse error types.
//!
//! Raised by the matching engine for bad user input, as opposed to the
//! configuration errors raised by `argspec-core` for programming mistakes.
//! Every error aborts the parse immediately; no partial results are
//! returned.

use thiserror::Error;

/// Errors raised while matching an argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A valued argument appeared at the end of input with no value token.
    #[error("value missing for argument: {0}")]
    MissingValue(String),

    /// An inline `name=value` was supplied to a switch argument.
    #[error("value specified for switch argument: {0}")]
    UnexpectedValue(String),

    /// An argument exceeded its maximum occurrence count.
    #[error("argument specified too many times: {0}")]
    TooManyOccurrences(String),

    /// A positional token remained with no positional definition to absorb
    /// it.
    #[error("unexpected positional argument: {0}")]
    UnexpectedPositional(String),

    /// A required argument was never matched.
    #[error("required argument missing: {0}")]
    MissingRequiredArgument(String),

    /// A matched value is outside the argument's allowed-value enumeration.
    #[error("value {value:?} not allowed for argument {name}")]
    ValueNotAllowed { name: String, value: String },
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
