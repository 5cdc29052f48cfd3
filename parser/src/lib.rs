//! Matching engine and parse results for argspec repositories.
//!
//! This crate consumes a configured
//! [`ArgumentRepository`](argspec_core::ArgumentRepository) together with a
//! raw argument vector and produces a [`ParseResults`] record:
//!
//! - [`parse`] — parse an argument vector without storage bindings.
//! - [`parse_with_storage`] — parse and write matched values through to
//!   caller-owned state via the repository's bindings.
//! - [`TokenCursor`] — the forward-only view the engine walks.
//! - [`ParseError`] — fail-fast parse errors for bad user input.
//!
//! The engine runs a named-argument phase over a greedy prefix of the input,
//! then a positional phase over the rest. A matched subcommand delegates all
//! remaining tokens to the nested repository and nests its results.
//!
//! # Example
//!
//! ```
//! use argspec_core::ArgumentRepository;
//! use argspec_parser::parse;
//!
//! let mut repo: ArgumentRepository = ArgumentRepository::new();
//! repo.add_switch(&["--verbose"]).unwrap();
//! repo.add_valued(&["--out"]).unwrap();
//! repo.add_positional("input")
//!     .unwrap()
//!     .set_required()
//!     .set_max_count_unlimited();
//!
//! let argv: Vec<String> = ["--verbose", "--out=a.bin", "f1", "f2"]
//!     .iter()
//!     .map(|t| t.to_string())
//!     .collect();
//!
//! let results = parse(&repo, &argv).unwrap();
//! assert_eq!(results.count("--verbose"), 1);
//! assert_eq!(results.values("--out"), ["a.bin".to_string()]);
//! assert_eq!(results.values("input"), ["f1".to_string(), "f2".to_string()]);
//! ```

mod cursor;
mod engine;
mod error;
mod results;

pub use cursor::TokenCursor;
pub use engine::{parse, parse_with_storage};
pub use error::{ParseError, Result};
pub use results::ParseResults;
