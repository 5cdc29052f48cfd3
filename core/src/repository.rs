//! Argument repository.
//!
//! The repository owns every argument definition declared by the caller,
//! the name registry resolving names to definitions, the optional subcommand
//! dispatcher with its nested repositories, and the value-storage bindings.
//! It is configured once, before the first parse, and treated as read-only
//! afterwards.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::dictionary::Dictionary;
use crate::error::{ConfigError, Result};
use crate::registry::{self, NameRegistry};
use crate::types::{ArgId, ArgumentDef, ArgumentKind};

/// Pass-through sink invoked for every matched value of a bound argument.
type StorageBinding<S> = Box<dyn Fn(&mut S, &str)>;

struct Subparsers<S> {
    id: ArgId,
    parsers: BTreeMap<String, ArgumentRepository<S>>,
}

/// Owner of the declared argument set for one command level.
///
/// `S` is the caller-owned storage type that bound arguments write through
/// to; it defaults to `()` for repositories without bindings.
///
/// # Examples
///
/// ```
/// use argspec_core::{ArgumentKind, ArgumentRepository};
///
/// let mut repo: ArgumentRepository = ArgumentRepository::new();
/// repo.add_switch(&["--verbose", "-v"]).unwrap();
/// repo.add_valued(&["--out"]).unwrap();
/// repo.add_positional("input").unwrap();
///
/// assert_eq!(repo.lookup("-v").unwrap().kind(), ArgumentKind::Switch);
/// assert_eq!(repo.lookup("input").unwrap().kind(), ArgumentKind::Positional);
/// assert!(repo.lookup("--missing").is_none());
/// ```
pub struct ArgumentRepository<S = ()> {
    dictionary: Dictionary,
    definitions: Vec<ArgumentDef>,
    registry: NameRegistry,
    positionals: Vec<ArgId>,
    subparsers: Option<Subparsers<S>>,
    bindings: HashMap<ArgId, StorageBinding<S>>,
}

impl<S> ArgumentRepository<S> {
    /// Creates an empty repository with the default [`Dictionary`].
    pub fn new() -> Self {
        Self::with_dictionary(Dictionary::default())
    }

    /// Creates an empty repository with a custom dictionary. The dictionary
    /// is fixed for the repository's lifetime and inherited by nested
    /// subcommand repositories.
    pub fn with_dictionary(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            definitions: Vec::new(),
            registry: NameRegistry::new(),
            positionals: Vec::new(),
            subparsers: None,
            bindings: HashMap::new(),
        }
    }

    /// Registers a switch argument (takes no value).
    pub fn add_switch(&mut self, names: &[&str]) -> Result<ArgumentHandle<'_, S>> {
        let id = self.add_named(ArgumentKind::Switch, names)?;
        Ok(self.handle(id))
    }

    /// Registers a valued argument (requires one value per occurrence).
    pub fn add_valued(&mut self, names: &[&str]) -> Result<ArgumentHandle<'_, S>> {
        let id = self.add_named(ArgumentKind::Valued, names)?;
        Ok(self.handle(id))
    }

    /// Registers an exclusive argument. The kind participates in name
    /// registration but is never consumed by the matching engine.
    pub fn add_exclusive(&mut self, names: &[&str]) -> Result<ArgumentHandle<'_, S>> {
        let id = self.add_named(ArgumentKind::Exclusive, names)?;
        Ok(self.handle(id))
    }

    /// Registers a positional argument.
    ///
    /// Positionals are matched strictly in declaration order. Once an
    /// optional or multi-value positional has been declared no further
    /// positional may be added; only the immediately preceding positional is
    /// inspected. Fails if a subcommand dispatcher is already registered.
    pub fn add_positional(&mut self, name: &str) -> Result<ArgumentHandle<'_, S>> {
        let names = vec![name.to_string()];
        let keys = self.registry.check(&names, &self.dictionary)?;

        if self.subparsers.is_some() {
            return Err(ConfigError::SubparsersAlreadyRegistered);
        }
        if let Some(&last) = self.positionals.last() {
            let bounds = self.definitions[last.index()].cardinality();
            if !bounds.is_required() {
                return Err(ConfigError::OptionalPositionalAlreadyAdded);
            }
            if bounds.max() != Some(1) {
                return Err(ConfigError::MultiValuePositionalAlreadyAdded);
            }
        }

        let id = ArgId(self.definitions.len());
        self.registry.insert(keys, id);
        self.definitions
            .push(ArgumentDef::new(id, ArgumentKind::Positional, names));
        self.positionals.push(id);
        Ok(self.handle(id))
    }

    /// Registers the subcommand dispatcher.
    ///
    /// At most one dispatcher may exist per repository and it is mutually
    /// exclusive with positional arguments. The returned handle registers
    /// the nested repositories, one per subcommand.
    pub fn add_subparsers(&mut self, name: &str) -> Result<SubparsersHandle<'_, S>> {
        let names = vec![name.to_string()];
        let keys = self.registry.check(&names, &self.dictionary)?;

        if self.subparsers.is_some() {
            return Err(ConfigError::SubparsersAlreadyRegistered);
        }
        if !self.positionals.is_empty() {
            return Err(ConfigError::PositionalsAlreadyRegistered);
        }

        let id = ArgId(self.definitions.len());
        self.registry.insert(keys, id);
        self.definitions
            .push(ArgumentDef::new(id, ArgumentKind::Subcommands, names));

        let sub = self.subparsers.insert(Subparsers {
            id,
            parsers: BTreeMap::new(),
        });
        Ok(SubparsersHandle {
            parsers: &mut sub.parsers,
            dictionary: &self.dictionary,
            id,
        })
    }

    /// The dictionary this repository was created with.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// All definitions in declaration order.
    pub fn definitions(&self) -> &[ArgumentDef] {
        &self.definitions
    }

    /// Definition by id.
    pub fn definition(&self, id: ArgId) -> Option<&ArgumentDef> {
        self.definitions.get(id.index())
    }

    /// Exact-match name lookup. Repeated calls without intervening
    /// configuration return the same definition.
    pub fn lookup(&self, name: &str) -> Option<&ArgumentDef> {
        let key = self.dictionary.normalize(name);
        self.registry
            .lookup(&key)
            .and_then(|id| self.definitions.get(id.index()))
    }

    /// Read-only view of the name registry.
    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    /// Positional definitions in declaration order.
    pub fn positionals(&self) -> impl Iterator<Item = &ArgumentDef> {
        self.positionals
            .iter()
            .filter_map(|id| self.definitions.get(id.index()))
    }

    /// Whether any positional argument is declared.
    pub fn has_positionals(&self) -> bool {
        !self.positionals.is_empty()
    }

    /// The subcommand dispatcher definition, if registered.
    pub fn subcommands(&self) -> Option<&ArgumentDef> {
        self.subparsers
            .as_ref()
            .and_then(|sub| self.definitions.get(sub.id.index()))
    }

    /// Resolves a raw token against the registered subcommand names,
    /// returning the dispatcher definition and the nested repository.
    pub fn subcommand_dispatch(&self, token: &str) -> Option<(&ArgumentDef, &ArgumentRepository<S>)> {
        let sub = self.subparsers.as_ref()?;
        let child = sub.parsers.get(&self.dictionary.normalize(token))?;
        let def = self.definitions.get(sub.id.index())?;
        Some((def, child))
    }

    /// Registered subcommand names and their repositories.
    pub fn subcommand_parsers(&self) -> impl Iterator<Item = (&str, &ArgumentRepository<S>)> {
        self.subparsers
            .iter()
            .flat_map(|sub| sub.parsers.iter().map(|(name, repo)| (name.as_str(), repo)))
    }

    /// Forwards a matched raw value to the argument's storage binding, if
    /// one was configured.
    pub fn store(&self, id: ArgId, storage: &mut S, value: &str) {
        if let Some(binding) = self.bindings.get(&id) {
            binding(storage, value);
        }
    }

    fn add_named(&mut self, kind: ArgumentKind, names: &[&str]) -> Result<ArgId> {
        let names: Vec<String> = names.iter().map(|name| name.to_string()).collect();
        let id = ArgId(self.definitions.len());
        self.registry.register(&names, id, &self.dictionary)?;
        self.definitions.push(ArgumentDef::new(id, kind, names));
        Ok(id)
    }

    fn handle(&mut self, id: ArgId) -> ArgumentHandle<'_, S> {
        ArgumentHandle {
            def: &mut self.definitions[id.index()],
            bindings: &mut self.bindings,
        }
    }
}

impl<S> Default for ArgumentRepository<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for ArgumentRepository<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentRepository")
            .field("dictionary", &self.dictionary)
            .field("definitions", &self.definitions)
            .field("positionals", &self.positionals)
            .field(
                "subcommands",
                &self
                    .subparsers
                    .as_ref()
                    .map(|sub| sub.parsers.keys().collect::<Vec<_>>()),
            )
            .finish_non_exhaustive()
    }
}

/// Mutable handle to one definition, returned by the repository's `add_*`
/// methods for chained configuration.
///
/// # Examples
///
/// ```
/// use argspec_core::ArgumentRepository;
///
/// let mut repo: ArgumentRepository = ArgumentRepository::new();
/// let out = repo
///     .add_valued(&["--format"])
///     .unwrap()
///     .set_default_value("plain")
///     .set_allowed_values(&["plain", "json"])
///     .id();
///
/// let def = repo.definition(out).unwrap();
/// assert_eq!(def.default_values(), ["plain".to_string()]);
/// assert!(!def.allows_value("xml"));
/// ```
pub struct ArgumentHandle<'r, S = ()> {
    def: &'r mut ArgumentDef,
    bindings: &'r mut HashMap<ArgId, StorageBinding<S>>,
}

impl<S> fmt::Debug for ArgumentHandle<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentHandle")
            .field("def", &self.def)
            .finish_non_exhaustive()
    }
}

impl<'r, S> ArgumentHandle<'r, S> {
    /// Identifier of the underlying definition.
    pub fn id(&self) -> ArgId {
        self.def.id
    }

    /// Sets the minimum occurrence count. Fails if it would exceed a bounded
    /// maximum.
    pub fn set_min_count(self, count: usize) -> Result<Self> {
        if let Some(max) = self.def.cardinality.max {
            if count > max {
                return Err(ConfigError::InvalidCardinality { min: count, max });
            }
        }
        self.def.cardinality.min = count;
        Ok(self)
    }

    /// Sets the maximum occurrence count. Fails for zero or a value below
    /// the configured minimum.
    pub fn set_max_count(self, count: usize) -> Result<Self> {
        if count == 0 || count < self.def.cardinality.min {
            return Err(ConfigError::InvalidCardinality {
                min: self.def.cardinality.min,
                max: count,
            });
        }
        self.def.cardinality.max = Some(count);
        Ok(self)
    }

    /// Removes the upper occurrence bound.
    pub fn set_max_count_unlimited(self) -> Self {
        self.def.cardinality.max = None;
        self
    }

    /// Requires at least one occurrence.
    pub fn set_required(self) -> Self {
        if self.def.cardinality.min == 0 {
            self.def.cardinality.min = 1;
        }
        self
    }

    /// Sets a single default value, replacing any previous defaults.
    pub fn set_default_value(self, value: impl Into<String>) -> Self {
        self.def.default_values = vec![value.into()];
        self
    }

    /// Sets the default value sequence, replacing any previous defaults.
    pub fn set_default_values(self, values: &[&str]) -> Self {
        self.def.default_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Restricts matched values to a closed enumeration. An empty list
    /// removes the restriction.
    pub fn set_allowed_values(self, values: &[&str]) -> Self {
        self.def.allowed_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Binds a storage sink receiving every matched raw value of this
    /// argument as a side effect.
    pub fn bind(self, sink: impl Fn(&mut S, &str) + 'static) -> Self {
        self.bindings.insert(self.def.id, Box::new(sink));
        self
    }
}

/// Handle registering nested repositories under the subcommand dispatcher.
pub struct SubparsersHandle<'r, S = ()> {
    parsers: &'r mut BTreeMap<String, ArgumentRepository<S>>,
    dictionary: &'r Dictionary,
    id: ArgId,
}

impl<S> fmt::Debug for SubparsersHandle<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubparsersHandle")
            .field("parsers", &self.parsers.keys().collect::<Vec<_>>())
            .field("dictionary", &self.dictionary)
            .field("id", &self.id)
            .finish()
    }
}

impl<'r, S> SubparsersHandle<'r, S> {
    /// Identifier of the dispatcher definition.
    pub fn id(&self) -> ArgId {
        self.id
    }

    /// Registers a subcommand and returns its repository for configuration.
    ///
    /// The name obeys the same character rules as argument names and must be
    /// unique among siblings. The child inherits the parent's dictionary.
    pub fn add_parser(&mut self, name: &str) -> Result<&mut ArgumentRepository<S>> {
        registry::validate_name(name, self.dictionary)?;

        match self.parsers.entry(self.dictionary.normalize(name)) {
            Entry::Occupied(_) => Err(ConfigError::DuplicateSubcommand(name.to_string())),
            Entry::Vacant(slot) => {
                Ok(slot.insert(ArgumentRepository::with_dictionary(self.dictionary.clone())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_leaves_first_definition_intact() {
        let mut repo: ArgumentRepository = ArgumentRepository::new();
        let first = repo.add_switch(&["--verbose"]).unwrap().id();

        let err = repo.add_valued(&["--verbose"]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateName("--verbose".to_string()));

        let def = repo.lookup("--verbose").unwrap();
        assert_eq!(def.id(), first);
        assert_eq!(def.kind(), ArgumentKind::Switch);
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let mut repo: ArgumentRepository = ArgumentRepository::new();
        repo.add_valued(&["--out", "-o"]).unwrap();

        let a = repo.lookup("--out").unwrap().id();
        let b = repo.lookup("--out").unwrap().id();
        let c = repo.lookup("-o").unwrap().id();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_positional_after_optional_positional_is_rejected() {
        let mut repo: ArgumentRepository = ArgumentRepository::new();
        repo.add_positional("maybe").unwrap();

        let err = repo.add_positional("next").unwrap_err();
        assert_eq!(err, ConfigError::OptionalPositionalAlreadyAdded);
    }

    #[test]
    fn test_positional_after_multi_value_positional_is_rejected() {
        let mut repo: ArgumentRepository = ArgumentRepository::new();
        repo.add_positional("files")
            .unwrap()
            .set_required()
            .set_max_count_unlimited();

        let err = repo.add_positional("next").unwrap_err();
        assert_eq!(err, ConfigError::MultiValuePositionalAlreadyAdded);
    }

    #[test]
    fn test_sole_multi_value_positional_is_accepted() {
        // The ordering rule only inspects the previously declared
        // positional, so a repository whose only positional is unbounded is
        // legal.
        let mut repo: ArgumentRepository = ArgumentRepository::new();
        assert!(
            repo.add_positional("files")
                .unwrap()
                .set_max_count_unlimited()
                .id()
                .index()
                == 0
        );
    }

    #[test]
    fn test_required_positionals_chain_in_declaration_order() {
        let mut repo: ArgumentRepository = ArgumentRepository::new();
        repo.add_positional("first").unwrap().set_required();
        repo.add_positional("second").unwrap().set_required();

        let names: Vec<&str> = repo.positionals().map(|def| def.name()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_subparsers_conflicts_with_positionals() {
        let mut repo: ArgumentRepository = ArgumentRepository::new();
        repo.add_positional("input").unwrap();
        let err = repo.add_subparsers("command").unwrap_err();
        assert_eq!(err, ConfigError::PositionalsAlreadyRegistered);

        let mut repo: ArgumentRepository = ArgumentRepository::new();
        repo.add_subparsers("command").unwrap();
        let err = repo.add_positional("input").unwrap_err();
        assert_eq!(err, ConfigError::SubparsersAlreadyRegistered);
    }

    #[test]
    fn test_second_subparsers_is_rejected() {
        let mut repo: ArgumentRepository = ArgumentRepository::new();
        repo.add_subparsers("command").unwrap();
        let err = repo.add_subparsers("other").unwrap_err();
        assert_eq!(err, ConfigError::SubparsersAlreadyRegistered);
    }

    #[test]
    fn test_duplicate_subcommand_is_rejected() {
        let mut repo: ArgumentRepository = ArgumentRepository::new();
        let mut sub = repo.add_subparsers("command").unwrap();
        sub.add_parser("build").unwrap();
        let err = sub.add_parser("build").unwrap_err();
        assert_eq!(err, ConfigError::DuplicateSubcommand("build".to_string()));
    }

    #[test]
    fn test_subcommand_dispatch_resolves_child() {
        let mut repo: ArgumentRepository = ArgumentRepository::new();
        let mut sub = repo.add_subparsers("command").unwrap();
        sub.add_parser("build").unwrap().add_switch(&["--release"]).unwrap();

        let (def, child) = repo.subcommand_dispatch("build").unwrap();
        assert_eq!(def.kind(), ArgumentKind::Subcommands);
        assert!(child.lookup("--release").is_some());
        assert!(repo.subcommand_dispatch("clean").is_none());
    }

    #[test]
    fn test_cardinality_setters_enforce_bounds() {
        let mut repo: ArgumentRepository = ArgumentRepository::new();

        let err = repo
            .add_valued(&["--out"])
            .unwrap()
            .set_min_count(2)
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidCardinality { min: 2, max: 1 });

        let err = repo
            .add_valued(&["--in"])
            .unwrap()
            .set_max_count(0)
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidCardinality { min: 0, max: 0 });

        repo.add_valued(&["--tag"])
            .unwrap()
            .set_max_count(3)
            .unwrap()
            .set_min_count(2)
            .unwrap();
        let bounds = repo.lookup("--tag").unwrap().cardinality();
        assert_eq!((bounds.min(), bounds.max()), (2, Some(3)));
    }

    #[test]
    fn test_storage_binding_receives_values() {
        let mut repo: ArgumentRepository<Vec<String>> = ArgumentRepository::new();
        let out = repo
            .add_valued(&["--out"])
            .unwrap()
            .bind(|store: &mut Vec<String>, value| store.push(value.to_string()))
            .id();

        let mut storage = Vec::new();
        repo.store(out, &mut storage, "build");
        repo.store(out, &mut storage, "dist");
        assert_eq!(storage, ["build", "dist"]);
    }

    #[test]
    fn test_case_insensitive_repository_lookup() {
        let dict = Dictionary::new().case_insensitive();
        let mut repo: ArgumentRepository = ArgumentRepository::with_dictionary(dict);
        repo.add_switch(&["--Verbose"]).unwrap();

        assert!(repo.lookup("--verbose").is_some());
        assert!(repo.lookup("--VERBOSE").is_some());

        let err = repo.add_switch(&["--verbose"]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateName("--verbose".to_string()));
    }
}
