//! Core types for declarative command-line argument parsing.
//!
//! This crate defines the configuration side of the argspec workspace:
//!
//! - [`ArgumentDef`] — one declared argument: kind, names, cardinality,
//!   defaults, allowed values.
//! - [`ArgumentRepository`] — owner of the declared argument set, the name
//!   registry, the optional subcommand dispatcher, and value-storage
//!   bindings.
//! - [`NameRegistry`] — name-to-definition mapping with global uniqueness
//!   per repository.
//! - [`Dictionary`] — reserved literals (`name=value` separator, switch
//!   sentinel) and name-equality rules, fixed per repository.
//!
//! Repositories are configured through builder-style `add_*` calls returning
//! an [`ArgumentHandle`] for chained setup, then handed to the matching
//! engine in `argspec-parser` together with the raw argument vector.
//!
//! # Example
//!
//! ```
//! use argspec_core::{ArgumentKind, ArgumentRepository};
//!
//! let mut repo: ArgumentRepository = ArgumentRepository::new();
//! repo.add_switch(&["--verbose", "-v"]).unwrap();
//! repo.add_valued(&["--out"])
//!     .unwrap()
//!     .set_default_value("a.out");
//! repo.add_positional("input")
//!     .unwrap()
//!     .set_required()
//!     .set_max_count_unlimited();
//!
//! assert_eq!(repo.lookup("--out").unwrap().kind(), ArgumentKind::Valued);
//! assert!(repo.has_positionals());
//! ```

mod dictionary;
mod error;
mod registry;
mod repository;
mod types;

pub use dictionary::Dictionary;
pub use error::{ConfigError, Result};
pub use registry::NameRegistry;
pub use repository::{ArgumentHandle, ArgumentRepository, SubparsersHandle};
pub use types::{ArgId, ArgumentDef, ArgumentKind, Cardinality};
