//! Values bound to pattern leaves.

use serde::{Deserialize, Serialize};

/// A value bound to an option, argument, or command.
///
/// Serializes untagged, so bindings render as plain JSON/YAML scalars and
/// arrays.
///
/// # Examples
///
/// ```
/// use docmatch_core::Value;
///
/// assert!(Value::Bool(true).is_truthy());
/// assert!(!Value::Null.is_truthy());
/// assert!(!Value::Count(0).is_truthy());
/// assert_eq!(Value::from("x"), Value::String("x".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// No value (an argument or value-taking option that never matched).
    #[default]
    Null,
    /// Flag or command presence.
    Bool(bool),
    /// Scalar argument or option value.
    String(String),
    /// Occurrence count of a repeated flag or command.
    Count(u64),
    /// Accumulated values of a repeated argument or value-taking option.
    List(Vec<String>),
}

impl Value {
    /// Returns `true` for `true`, non-empty strings, non-zero counts and
    /// non-empty lists.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::String(s) => !s.is_empty(),
            Self::Count(n) => *n > 0,
            Self::List(items) => !items.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u64> {
        match self {
            Self::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether matches against this value accumulate rather than overwrite.
    pub(crate) fn accumulates(&self) -> bool {
        matches!(self, Self::Count(_) | Self::List(_))
    }

    /// Folds one more occurrence into an accumulating value.
    ///
    /// Counts increment by one; lists absorb the occurrence's string (or
    /// list) payload. Scalars are replaced.
    pub(crate) fn absorb(&mut self, occurrence: Value) {
        match self {
            Self::Count(n) => *n += 1,
            Self::List(items) => match occurrence {
                Self::String(s) => items.push(s),
                Self::List(more) => items.extend(more),
                _ => {}
            },
            _ => *self = occurrence,
        }
    }

    /// The value an accumulating leaf binds on its first occurrence.
    pub(crate) fn first_occurrence(&self, occurrence: Value) -> Value {
        match self {
            Self::Count(_) => Self::Count(1),
            Self::List(_) => match occurrence {
                Self::String(s) => Self::List(vec![s]),
                Self::List(items) => Self::List(items),
                _ => Self::List(Vec::new()),
            },
            _ => occurrence,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Count(n)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}
