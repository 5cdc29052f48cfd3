//! Reserved literals and name-equality rules.
//!
//! A [`Dictionary`] is fixed for the lifetime of the repository that uses it.
//! It defines the separator splitting `--name=value` tokens, the sentinel
//! recorded for a matched switch, and whether name lookup is case sensitive.

use serde::{Deserialize, Serialize};

/// Per-repository reserved literals and name-equality configuration.
///
/// # Examples
///
/// ```
/// use argspec_core::Dictionary;
///
/// let dict = Dictionary::default();
/// assert_eq!(dict.value_separator(), '=');
/// assert_eq!(dict.switch_enabled(), "true");
/// assert_eq!(dict.split_value("--out=build"), Some(("--out", "build")));
/// assert_eq!(dict.split_value("--verbose"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    value_separator: char,
    subcommand_separator: char,
    switch_enabled: String,
    case_sensitive: bool,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self {
            value_separator: '=',
            subcommand_separator: ' ',
            switch_enabled: "true".to_string(),
            case_sensitive: true,
        }
    }
}

impl Dictionary {
    /// Creates the default dictionary (`=` separator, case-sensitive names).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the `name=value` separator character.
    pub fn with_value_separator(mut self, separator: char) -> Self {
        self.value_separator = separator;
        self
    }

    /// Replaces the subcommand separator character.
    pub fn with_subcommand_separator(mut self, separator: char) -> Self {
        self.subcommand_separator = separator;
        self
    }

    /// Replaces the sentinel recorded when a switch is matched.
    pub fn with_switch_enabled(mut self, literal: impl Into<String>) -> Self {
        self.switch_enabled = literal.into();
        self
    }

    /// Makes name registration and lookup case-insensitive.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// The character splitting `name=value` tokens.
    pub fn value_separator(&self) -> char {
        self.value_separator
    }

    /// The literal reserved for subcommand syntax; argument names must not
    /// contain it.
    pub fn subcommand_separator(&self) -> char {
        self.subcommand_separator
    }

    /// The value recorded for each matched switch occurrence.
    pub fn switch_enabled(&self) -> &str {
        &self.switch_enabled
    }

    /// Whether name equality is case-sensitive.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Normalizes a name into its lookup key.
    pub fn normalize(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }

    /// Splits a token at the first value separator, if present.
    pub fn split_value<'t>(&self, token: &'t str) -> Option<(&'t str, &'t str)> {
        token.split_once(self.value_separator)
    }

    /// Whether a character is reserved and therefore invalid in names.
    pub fn is_reserved(&self, c: char) -> bool {
        c == self.value_separator || c == self.subcommand_separator
    }
}
