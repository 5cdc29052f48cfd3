//! Argument definition model.
//!
//! This module defines the data types describing one declared argument: its
//! kind, the names it answers to, how many times it may occur, and the
//! optional default and allowed value lists. Definitions are plain data and
//! round-trip through [`serde`]; runtime concerns such as value-storage
//! bindings live in the owning [`ArgumentRepository`](crate::ArgumentRepository).

use serde::{Deserialize, Serialize};

/// Identifier of an argument definition within one repository.
///
/// Ids are indices into the repository's definition arena. They are only
/// meaningful for the repository that created them and stay valid for the
/// repository's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArgId(pub(crate) usize);

impl ArgId {
    /// Returns the arena index backing this id.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kind of a declared argument.
///
/// The kind is fixed at construction and selects how the matching engine
/// treats tokens resolving to the definition.
///
/// # Examples
///
/// ```
/// use argspec_core::{ArgumentKind, ArgumentRepository};
///
/// let mut repo: ArgumentRepository = ArgumentRepository::new();
/// let verbose = repo.add_switch(&["--verbose"]).unwrap().id();
/// assert_eq!(repo.lookup("--verbose").unwrap().kind(), ArgumentKind::Switch);
/// assert_eq!(repo.lookup("--verbose").unwrap().id(), verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgumentKind {
    /// Named argument taking no value; presence records the switch-enabled
    /// literal.
    Switch,
    /// Named argument requiring exactly one value per occurrence.
    Valued,
    /// Argument matched by position in the remaining input.
    Positional,
    /// Named argument reserved for mutually-exclusive-group semantics.
    /// The matching engine does not consume it.
    Exclusive,
    /// Dispatcher whose matched value selects a nested repository.
    Subcommands,
}

/// Occurrence bounds for one argument within a single parse.
///
/// `max == None` means unbounded. The bounds satisfy `min <= max` whenever
/// `max` is bounded; the repository handles enforce this when the bounds are
/// changed.
///
/// # Examples
///
/// ```
/// use argspec_core::Cardinality;
///
/// let bounds = Cardinality::default();
/// assert_eq!(bounds.min(), 0);
/// assert_eq!(bounds.max(), Some(1));
/// assert!(bounds.allows(0));
/// assert!(!bounds.allows(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cardinality {
    pub(crate) min: usize,
    pub(crate) max: Option<usize>,
}

impl Default for Cardinality {
    fn default() -> Self {
        Self { min: 0, max: Some(1) }
    }
}

impl Cardinality {
    /// Minimum number of occurrences required for the parse to succeed.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Maximum number of occurrences, or `None` when unbounded.
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Whether at least one occurrence is required.
    pub fn is_required(&self) -> bool {
        self.min > 0
    }

    /// Whether another occurrence may be recorded on top of `count` existing
    /// ones.
    pub fn allows(&self, count: usize) -> bool {
        match self.max {
            Some(max) => count < max,
            None => true,
        }
    }

    /// Whether the upper bound is unbounded.
    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }
}

/// One declared argument.
///
/// Created through the repository's `add_*` methods and configured through
/// the returned [`ArgumentHandle`](crate::ArgumentHandle). All names are
/// aliases resolving to the same definition; the first name given is the
/// primary one used in error messages and result summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentDef {
    pub(crate) id: ArgId,
    pub(crate) kind: ArgumentKind,
    pub(crate) names: Vec<String>,
    pub(crate) cardinality: Cardinality,
    pub(crate) default_values: Vec<String>,
    pub(crate) allowed_values: Vec<String>,
}

impl ArgumentDef {
    pub(crate) fn new(id: ArgId, kind: ArgumentKind, names: Vec<String>) -> Self {
        Self {
            id,
            kind,
            names,
            cardinality: Cardinality::default(),
            default_values: Vec::new(),
            allowed_values: Vec::new(),
        }
    }

    /// Identifier of this definition within its repository.
    pub fn id(&self) -> ArgId {
        self.id
    }

    /// Kind tag, immutable after construction.
    pub fn kind(&self) -> ArgumentKind {
        self.kind
    }

    /// Primary name (the first one registered).
    pub fn name(&self) -> &str {
        &self.names[0]
    }

    /// All registered names, primary first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Occurrence bounds.
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Values substituted at read time when nothing was matched.
    pub fn default_values(&self) -> &[String] {
        &self.default_values
    }

    /// Closed value enumeration; empty means unrestricted.
    pub fn allowed_values(&self) -> &[String] {
        &self.allowed_values
    }

    /// Whether the definition is matched by name rather than by position.
    pub fn is_named(&self) -> bool {
        self.kind != ArgumentKind::Positional
    }

    /// Checks a raw value against the allowed-value enumeration.
    pub fn allows_value(&self, value: &str) -> bool {
        self.allowed_values.is_empty() || self.allowed_values.iter().any(|v| v == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_default_is_optional_single() {
        let bounds = Cardinality::default();
        assert_eq!(bounds.min(), 0);
        assert_eq!(bounds.max(), Some(1));
        assert!(!bounds.is_required());
        assert!(!bounds.is_unbounded());
    }

    #[test]
    fn test_cardinality_allows_respects_upper_bound() {
        let bounded = Cardinality { min: 0, max: Some(2) };
        assert!(bounded.allows(0));
        assert!(bounded.allows(1));
        assert!(!bounded.allows(2));

        let unbounded = Cardinality { min: 1, max: None };
        assert!(unbounded.allows(0));
        assert!(unbounded.allows(10_000));
        assert!(unbounded.is_required());
    }

    #[test]
    fn test_definition_allows_value() {
        let mut def = ArgumentDef::new(ArgId(0), ArgumentKind::Valued, vec!["--format".into()]);
        assert!(def.allows_value("anything"));

        def.allowed_values = vec!["json".into(), "yaml".into()];
        assert!(def.allows_value("json"));
        assert!(!def.allows_value("toml"));
    }

    #[test]
    fn test_definition_primary_name_is_first() {
        let def = ArgumentDef::new(
            ArgId(3),
            ArgumentKind::Switch,
            vec!["--verbose".into(), "-v".into()],
        );
        assert_eq!(def.name(), "--verbose");
        assert_eq!(def.names().len(), 2);
        assert!(def.is_named());
    }
}
