//! The registry of declared options shared by both parsers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Reason, Result};
use crate::OptionLeaf;

/// Options declared for a program, each with its default value.
///
/// Both the usage-pattern parser and the argv parser resolve option tokens
/// against the same registry: long forms by exact name first and then by
/// unambiguous prefix, short forms by exact single character.
///
/// # Examples
///
/// ```
/// use docmatch_core::{ErrorKind, OptionLeaf, OptionRegistry};
///
/// let registry = OptionRegistry::new(vec![
///     OptionLeaf::flag(Some("-v"), Some("--verbose")),
///     OptionLeaf::with_value(Some("-o"), Some("--output"), None),
/// ]);
///
/// let opt = registry.resolve_long("--verb", ErrorKind::User).unwrap();
/// assert_eq!(opt.name(), "--verbose");
/// assert!(registry.resolve_short("-x", ErrorKind::User).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionRegistry {
    options: Vec<OptionLeaf>,
}

impl OptionRegistry {
    pub fn new(options: Vec<OptionLeaf>) -> Self {
        Self { options }
    }

    pub fn push(&mut self, option: OptionLeaf) {
        self.options.push(option);
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionLeaf> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Finds an option by its exact short or long form.
    pub fn find(&self, name: &str) -> Option<&OptionLeaf> {
        self.options
            .iter()
            .find(|o| o.short.as_deref() == Some(name) || o.long.as_deref() == Some(name))
    }

    /// Resolves a long form (`--name`, without any `=value`).
    ///
    /// An exact match wins; otherwise exactly one declared long form must
    /// start with `long`.
    ///
    /// # Errors
    ///
    /// [`Reason::UnknownOption`] when nothing matches and
    /// [`Reason::AmbiguousPrefix`] when several entries do, raised with the
    /// given `kind`.
    pub fn resolve_long(&self, long: &str, kind: ErrorKind) -> Result<&OptionLeaf> {
        let exact = self
            .options
            .iter()
            .filter(|o| o.long.as_deref() == Some(long))
            .collect::<Vec<_>>();
        let similar = if exact.is_empty() {
            self.options
                .iter()
                .filter(|o| o.long.as_deref().is_some_and(|l| l.starts_with(long)))
                .collect::<Vec<_>>()
        } else {
            exact
        };

        match similar.as_slice() {
            [] => Err(Error::new(kind, Reason::UnknownOption(long.to_string()))),
            [only] => Ok(*only),
            many => Err(Error::new(
                kind,
                Reason::AmbiguousPrefix {
                    prefix: long.to_string(),
                    candidates: many
                        .iter()
                        .filter_map(|o| o.long.clone())
                        .collect(),
                },
            )),
        }
    }

    /// Resolves a single short form (`-x`).
    ///
    /// # Errors
    ///
    /// [`Reason::UnknownOption`] when undeclared and
    /// [`Reason::AmbiguousShort`] when declared more than once.
    pub fn resolve_short(&self, short: &str, kind: ErrorKind) -> Result<&OptionLeaf> {
        let similar = self
            .options
            .iter()
            .filter(|o| o.short.as_deref() == Some(short))
            .collect::<Vec<_>>();

        match similar.as_slice() {
            [] => Err(Error::new(kind, Reason::UnknownOption(short.to_string()))),
            [only] => Ok(*only),
            many => Err(Error::new(
                kind,
                Reason::AmbiguousShort {
                    short: short.to_string(),
                    count: many.len(),
                },
            )),
        }
    }
}

impl FromIterator<OptionLeaf> for OptionRegistry {
    fn from_iter<I: IntoIterator<Item = OptionLeaf>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
