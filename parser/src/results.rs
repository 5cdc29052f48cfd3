//! Parse results.
//!
//! A [`ParseResults`] is created fresh by each parse call, filled by the
//! matching engine, and immutable once returned to the caller. It borrows
//! the repository it was parsed against so queries can resolve names and
//! substitute configured defaults at read time.

use std::collections::HashMap;
use std::fmt;

use argspec_core::{ArgId, ArgumentDef, ArgumentRepository};
use serde_json::{Value, json};

/// Matched values per argument definition for one parse call.
///
/// # Examples
///
/// ```
/// use argspec_core::ArgumentRepository;
/// use argspec_parser::parse;
///
/// let mut repo: ArgumentRepository = ArgumentRepository::new();
/// repo.add_valued(&["--out"]).unwrap();
///
/// let argv = vec!["--out=build".to_string()];
/// let results = parse(&repo, &argv).unwrap();
/// assert_eq!(results.values("--out"), ["build".to_string()]);
/// assert_eq!(results.count("--out"), 1);
/// ```
pub struct ParseResults<'p, S = ()> {
    repo: &'p ArgumentRepository<S>,
    values: HashMap<ArgId, Vec<String>>,
    subcommand: Option<(String, Box<ParseResults<'p, S>>)>,
}

impl<'p, S> ParseResults<'p, S> {
    pub(crate) fn new(repo: &'p ArgumentRepository<S>) -> Self {
        Self {
            repo,
            values: HashMap::new(),
            subcommand: None,
        }
    }

    pub(crate) fn append(&mut self, id: ArgId, value: String) {
        self.values.entry(id).or_default().push(value);
    }

    pub(crate) fn set_subcommand(&mut self, name: String, nested: ParseResults<'p, S>) {
        self.subcommand = Some((name, Box::new(nested)));
    }

    /// Number of matched occurrences for a definition id. Defaults do not
    /// count as matches.
    pub fn count_id(&self, id: ArgId) -> usize {
        self.values.get(&id).map_or(0, Vec::len)
    }

    /// Number of matched occurrences for a definition.
    pub fn count_of(&self, def: &ArgumentDef) -> usize {
        self.count_id(def.id())
    }

    /// Number of matched occurrences for a name; zero for unknown names.
    pub fn count(&self, name: &str) -> usize {
        self.repo.lookup(name).map_or(0, |def| self.count_of(def))
    }

    /// Matched raw values in match order. When nothing matched, the
    /// definition's configured defaults are substituted at read time.
    pub fn values_of<'a>(&'a self, def: &'a ArgumentDef) -> &'a [String] {
        match self.values.get(&def.id()) {
            Some(values) if !values.is_empty() => values,
            _ => def.default_values(),
        }
    }

    /// Matched values for a name; empty for unknown names.
    pub fn values(&self, name: &str) -> &[String] {
        match self.repo.lookup(name) {
            Some(def) => self.values_of(def),
            None => &[],
        }
    }

    /// First matched (or default) value for a name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    /// Whether a name was matched at least once.
    pub fn has(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    /// Nested results for the subcommand branch that was taken, if it was
    /// the one named here.
    pub fn subcommand(&self, name: &str) -> Option<&ParseResults<'p, S>> {
        match &self.subcommand {
            Some((taken, nested)) if taken == name => Some(nested),
            _ => None,
        }
    }

    /// Name of the subcommand branch that was taken, if any.
    pub fn subcommand_name(&self) -> Option<&str> {
        self.subcommand.as_ref().map(|(name, _)| name.as_str())
    }

    /// JSON summary of the matched values, keyed by primary argument name,
    /// with the taken subcommand branch nested.
    pub fn to_json(&self) -> Value {
        let mut values = serde_json::Map::new();
        for def in self.repo.definitions() {
            let matched = self.values_of(def);
            if matched.is_empty() {
                continue;
            }
            values.insert(def.name().to_string(), json!(matched));
        }

        let mut summary = serde_json::Map::new();
        summary.insert("values".to_string(), Value::Object(values));
        if let Some((name, nested)) = &self.subcommand {
            summary.insert(
                "subcommand".to_string(),
                json!({ "name": name, "results": nested.to_json() }),
            );
        }
        Value::Object(summary)
    }
}

impl<S> fmt::Debug for ParseResults<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseResults")
            .field("values", &self.values)
            .field("subcommand", &self.subcommand)
            .finish()
    }
}
