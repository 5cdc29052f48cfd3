//! Configuration error types.
//!
//! Everything here is raised while the repository is being configured, before
//! any input is parsed. A [`ConfigError`] therefore signals a programming
//! mistake in the caller, as opposed to the parse-time errors raised by the
//! matching engine for bad user input.

use thiserror::Error;

/// Errors raised while registering argument definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An `add_*` call received an empty name list.
    #[error("no argument names given")]
    NoNames,

    /// A name is the empty string.
    #[error("argument name must not be empty")]
    EmptyName,

    /// A name contains a whitespace character.
    #[error("argument name must not contain whitespace: {0:?}")]
    NameContainsWhitespace(String),

    /// A name contains a reserved separator character.
    #[error("argument name must not contain a reserved separator: {0:?}")]
    NameContainsSeparator(String),

    /// A name collides with an already-registered name, or repeats within
    /// the alias list of a single registration.
    #[error("argument name already registered: {0}")]
    DuplicateName(String),

    /// A subcommand dispatcher is already registered in this repository.
    #[error("subcommand dispatcher already registered")]
    SubparsersAlreadyRegistered,

    /// A subcommand dispatcher cannot be added once positional arguments
    /// exist.
    #[error("positional arguments already registered")]
    PositionalsAlreadyRegistered,

    /// No further positionals may follow an optional positional.
    #[error("optional positional argument already added")]
    OptionalPositionalAlreadyAdded,

    /// No further positionals may follow a multi-value positional.
    #[error("multi-value positional argument already added")]
    MultiValuePositionalAlreadyAdded,

    /// Requested occurrence bounds violate `min <= max` or `max >= 1`.
    #[error("invalid cardinality bounds: min {min}, max {max}")]
    InvalidCardinality { min: usize, max: usize },

    /// Two sibling subcommands share a name.
    #[error("subcommand already registered: {0}")]
    DuplicateSubcommand(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
