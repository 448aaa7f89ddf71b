//! Final name-to-value mapping produced by a successful match.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::matcher::State;
use crate::normalize::CompiledPattern;
use crate::Value;

/// Values bound to every option, argument and command of a pattern, keyed
/// by canonical option name, metavariable or command literal.
///
/// Leaves that did not take part in the match keep their defaults, so every
/// name the pattern mentions is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bindings {
    values: BTreeMap<String, Value>,
}

impl Bindings {
    /// Defaults of every leaf, overridden by the values collected in `state`.
    pub(crate) fn from_match(compiled: &CompiledPattern, state: State) -> Self {
        let mut values = compiled
            .leaves()
            .iter()
            .map(|leaf| (leaf.name().to_string(), leaf.value().clone()))
            .collect::<BTreeMap<_, _>>();
        for binding in state.collected {
            values.insert(compiled.leaf(binding.id).name().to_string(), binding.value);
        }
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// `true` when `name` is bound to `true` or a non-zero count.
    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| match v {
            Value::Bool(b) => *b,
            Value::Count(n) => *n > 0,
            _ => false,
        })
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_count(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_count)
    }

    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Value::as_list)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.values
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromIterator<(String, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
