//! Matching engine.
//!
//! Consumes an input token cursor against an argument repository in two
//! phases. The named phase greedily matches a prefix of the input against
//! registered names, handling `name=value` splitting, switch/valued
//! semantics, and subcommand dispatch. The positional phase absorbs every
//! remaining token into the positional definitions in declaration order.
//! A matched subcommand delegates all remaining tokens to the nested
//! repository's engine and short-circuits the positional phase entirely.

use argspec_core::{ArgumentDef, ArgumentKind, ArgumentRepository};
use tracing::debug;

use crate::cursor::TokenCursor;
use crate::error::{ParseError, Result};
use crate::results::ParseResults;

/// Parses an argument vector against a repository without storage bindings.
///
/// # Examples
///
/// ```
/// use argspec_core::ArgumentRepository;
/// use argspec_parser::parse;
///
/// let mut repo: ArgumentRepository = ArgumentRepository::new();
/// repo.add_switch(&["--verbose"]).unwrap();
/// repo.add_positional("input").unwrap().set_required();
///
/// let argv = vec!["--verbose".to_string(), "in.txt".to_string()];
/// let results = parse(&repo, &argv).unwrap();
/// assert!(results.has("--verbose"));
/// assert_eq!(results.values("input"), ["in.txt".to_string()]);
/// ```
pub fn parse<'p>(repo: &'p ArgumentRepository, argv: &[String]) -> Result<ParseResults<'p>> {
    parse_with_storage(repo, argv, &mut ())
}

/// Parses an argument vector, forwarding every matched value of a bound
/// argument into `storage` as a side effect.
pub fn parse_with_storage<'p, S>(
    repo: &'p ArgumentRepository<S>,
    argv: &[String],
    storage: &mut S,
) -> Result<ParseResults<'p, S>> {
    let engine = MatchingEngine {
        repo,
        cursor: TokenCursor::new(argv),
    };
    engine.run(storage)
}

struct MatchingEngine<'p, 'v, S> {
    repo: &'p ArgumentRepository<S>,
    cursor: TokenCursor<'v>,
}

impl<'p, S> MatchingEngine<'p, '_, S> {
    fn run(mut self, storage: &mut S) -> Result<ParseResults<'p, S>> {
        let mut results = ParseResults::new(self.repo);

        let delegated = self.match_named_arguments(&mut results, storage)?;
        if !delegated {
            debug!(remaining = self.cursor.remaining(), "named phase complete");
            self.match_positional_arguments(&mut results, storage)?;
            self.check_required_named(&results)?;
        }

        Ok(results)
    }

    /// Greedy named-argument prefix. Returns `true` when a subcommand was
    /// matched and the remaining input was delegated.
    fn match_named_arguments(
        &mut self,
        results: &mut ParseResults<'p, S>,
        storage: &mut S,
    ) -> Result<bool> {
        let repo = self.repo;

        while let Some(token) = self.cursor.peek() {
            if let Some((name, inline)) = repo.dictionary().split_value(token) {
                let Some(def) = repo.lookup(name) else { break };
                match def.kind() {
                    ArgumentKind::Valued => {
                        self.cursor.next();
                        debug!(name, value = inline, "matched valued argument");
                        record_value(repo, results, storage, def, inline.to_string())?;
                    }
                    ArgumentKind::Switch => {
                        self.cursor.next();
                        return Err(ParseError::UnexpectedValue(name.to_string()));
                    }
                    _ => break,
                }
            } else if let Some(def) = repo.lookup(token) {
                match def.kind() {
                    ArgumentKind::Valued => {
                        self.cursor.next();
                        let Some(value) = self.cursor.next() else {
                            return Err(ParseError::MissingValue(token.to_string()));
                        };
                        debug!(name = token, value, "matched valued argument");
                        record_value(repo, results, storage, def, value.to_string())?;
                    }
                    ArgumentKind::Switch => {
                        self.cursor.next();
                        debug!(name = token, "matched switch argument");
                        let enabled = repo.dictionary().switch_enabled().to_string();
                        record_value(repo, results, storage, def, enabled)?;
                    }
                    _ => break,
                }
            } else if let Some((dispatcher, child)) = repo.subcommand_dispatch(token) {
                self.cursor.next();
                record_value(repo, results, storage, dispatcher, token.to_string())?;

                debug!(
                    subcommand = token,
                    remaining = self.cursor.remaining(),
                    "delegating to subcommand parser"
                );
                let nested = parse_with_storage(child, self.cursor.rest(), storage)?;
                results.set_subcommand(token.to_string(), nested);
                return Ok(true);
            } else {
                break;
            }
        }

        Ok(false)
    }

    /// Consumes every remaining token against the positional definitions in
    /// declaration order, then verifies required positionals were matched.
    fn match_positional_arguments(
        &mut self,
        results: &mut ParseResults<'p, S>,
        storage: &mut S,
    ) -> Result<()> {
        let repo = self.repo;
        let positionals: Vec<&ArgumentDef> = repo.positionals().collect();
        let mut index = 0;

        while let Some(token) = self.cursor.peek() {
            let Some(def) = positionals.get(index) else {
                return Err(ParseError::UnexpectedPositional(token.to_string()));
            };
            self.cursor.next();
            record_value(repo, results, storage, def, token.to_string())?;

            // Single-value positionals advance immediately; multi-value
            // positionals keep absorbing tokens until input is exhausted.
            if def.cardinality().max() == Some(1) {
                index += 1;
            }
        }

        for def in &positionals[index..] {
            if def.cardinality().is_required() && results.count_of(def) == 0 {
                return Err(ParseError::MissingRequiredArgument(def.name().to_string()));
            }
        }
        Ok(())
    }

    fn check_required_named(&self, results: &ParseResults<'p, S>) -> Result<()> {
        for def in self.repo.definitions() {
            if !def.is_named() {
                continue;
            }
            if def.cardinality().is_required() && results.count_of(def) == 0 {
                return Err(ParseError::MissingRequiredArgument(def.name().to_string()));
            }
        }
        Ok(())
    }
}

fn record_value<'p, S>(
    repo: &'p ArgumentRepository<S>,
    results: &mut ParseResults<'p, S>,
    storage: &mut S,
    def: &ArgumentDef,
    value: String,
) -> Result<()> {
    if !def.cardinality().allows(results.count_of(def)) {
        return Err(ParseError::TooManyOccurrences(def.name().to_string()));
    }
    if !def.allows_value(&value) {
        return Err(ParseError::ValueNotAllowed {
            name: def.name().to_string(),
            value,
        });
    }

    repo.store(def.id(), storage, &value);
    results.append(def.id(), value);
    Ok(())
}
