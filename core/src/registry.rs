//! Name registry.
//!
//! Maps every registered argument name to the owning definition. Uniqueness
//! is global within one repository; nested subcommand repositories each have
//! their own registry. Registration is all-or-nothing: the whole alias list
//! is validated before any name is inserted.

use std::collections::BTreeMap;

use crate::dictionary::Dictionary;
use crate::error::{ConfigError, Result};
use crate::types::ArgId;

/// Mapping from normalized argument name to definition id.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: BTreeMap<String, ArgId>,
}

impl NameRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers all `names` as aliases of `id`.
    ///
    /// Fails without mutating the registry if any name is empty, contains
    /// whitespace or a reserved separator, repeats within `names`, or is
    /// already registered.
    pub(crate) fn register(&mut self, names: &[String], id: ArgId, dict: &Dictionary) -> Result<()> {
        let keys = self.check(names, dict)?;
        self.insert(keys, id);
        Ok(())
    }

    /// Validates an alias list without mutating the registry and returns the
    /// normalized lookup keys.
    pub(crate) fn check(&self, names: &[String], dict: &Dictionary) -> Result<Vec<String>> {
        if names.is_empty() {
            return Err(ConfigError::NoNames);
        }

        let mut keys = Vec::with_capacity(names.len());
        for name in names {
            validate_name(name, dict)?;

            let key = dict.normalize(name);
            if keys.contains(&key) || self.names.contains_key(&key) {
                return Err(ConfigError::DuplicateName(name.clone()));
            }
            keys.push(key);
        }
        Ok(keys)
    }

    /// Inserts pre-validated keys. Callers must have obtained `keys` from
    /// [`check`](Self::check) with no intervening mutation.
    pub(crate) fn insert(&mut self, keys: Vec<String>, id: ArgId) {
        for key in keys {
            self.names.insert(key, id);
        }
    }

    /// Exact-match lookup of a normalized name. No prefix or fuzzy matching.
    pub fn lookup(&self, key: &str) -> Option<ArgId> {
        self.names.get(key).copied()
    }

    /// Whether a normalized name is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.names.contains_key(key)
    }

    /// Number of registered names (aliases counted individually).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Checks a single name against the character rules.
pub(crate) fn validate_name(name: &str, dict: &Dictionary) -> Result<()> {
    if name.is_empty() {
        return Err(ConfigError::EmptyName);
    }
    for c in name.chars() {
        if c.is_whitespace() {
            return Err(ConfigError::NameContainsWhitespace(name.to_string()));
        }
        if dict.is_reserved(c) {
            return Err(ConfigError::NameContainsSeparator(name.to_string()));
        }
    }
    Ok(())
}
