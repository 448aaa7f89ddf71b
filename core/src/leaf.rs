//! Leaf patterns: options, positional arguments and literal commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Value;

/// A declared option, or one occurrence of it in a pattern or invocation.
///
/// Identity is the `(short, long)` pair; the bound value is payload.
///
/// # Examples
///
/// ```
/// use docmatch_core::{OptionLeaf, Value};
///
/// let verbose = OptionLeaf::flag(Some("-v"), Some("--verbose"));
/// assert_eq!(verbose.name(), "--verbose");
/// assert_eq!(verbose.value, Value::Bool(false));
///
/// let output = OptionLeaf::with_value(Some("-o"), None, Some("out.txt"));
/// assert_eq!(output.name(), "-o");
/// assert!(output.takes_value);
/// assert_eq!(output.value, Value::from("out.txt"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionLeaf {
    /// Short form (e.g. "-v")
    pub short: Option<String>,
    /// Long form (e.g. "--verbose")
    pub long: Option<String>,
    /// Whether the option consumes an argument
    pub takes_value: bool,
    /// Default in the registry, bound value elsewhere
    pub value: Value,
}

impl OptionLeaf {
    /// Creates a flag (no argument) defaulting to `false`.
    pub fn flag(short: Option<&str>, long: Option<&str>) -> Self {
        Self {
            short: short.map(String::from),
            long: long.map(String::from),
            takes_value: false,
            value: Value::Bool(false),
        }
    }

    /// Creates a value-taking option with an optional default.
    pub fn with_value(short: Option<&str>, long: Option<&str>, default: Option<&str>) -> Self {
        Self {
            short: short.map(String::from),
            long: long.map(String::from),
            takes_value: true,
            value: default.map_or(Value::Null, Value::from),
        }
    }

    /// Returns the canonical name (long form preferred, falls back to short).
    pub fn name(&self) -> &str {
        self.long
            .as_deref()
            .or(self.short.as_deref())
            .unwrap_or_default()
    }

    /// Checks identity against another option, ignoring bound values.
    pub fn same_identity(&self, other: &OptionLeaf) -> bool {
        self.short == other.short && self.long == other.long
    }

    /// Copies this option with a different bound value.
    pub(crate) fn bound(&self, value: Value) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }
}

/// A positional argument.
///
/// Pattern arguments carry a metavariable name; arguments produced from an
/// invocation carry only the raw token as their value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Metavariable (e.g. "<path>" or "PATH"); `None` for invocation tokens
    pub name: Option<String>,
    pub value: Value,
}

impl Argument {
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            value: Value::Null,
        }
    }

    /// An unnamed argument leaf holding a raw invocation token.
    pub fn positional(token: &str) -> Self {
        Self {
            name: None,
            value: Value::from(token),
        }
    }
}

/// A literal command word (e.g. `add` in `prog add <x>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    pub value: Value,
}

impl Command {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Value::Bool(false),
        }
    }
}

/// Any atomic matchable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    Option(OptionLeaf),
    Argument(Argument),
    Command(Command),
}

/// Identity of a leaf, used to share one binding site per distinct leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum LeafKey {
    Option(Option<String>, Option<String>),
    Argument(Option<String>),
    Command(String),
}

impl Leaf {
    /// Key under which the leaf appears in the bindings.
    pub fn name(&self) -> &str {
        match self {
            Self::Option(opt) => opt.name(),
            Self::Argument(arg) => arg.name.as_deref().unwrap_or_default(),
            Self::Command(cmd) => &cmd.name,
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            Self::Option(opt) => &opt.value,
            Self::Argument(arg) => &arg.value,
            Self::Command(cmd) => &cmd.value,
        }
    }

    pub(crate) fn value_mut(&mut self) -> &mut Value {
        match self {
            Self::Option(opt) => &mut opt.value,
            Self::Argument(arg) => &mut arg.value,
            Self::Command(cmd) => &mut cmd.value,
        }
    }

    pub(crate) fn key(&self) -> LeafKey {
        match self {
            Self::Option(opt) => LeafKey::Option(opt.short.clone(), opt.long.clone()),
            Self::Argument(arg) => LeafKey::Argument(arg.name.clone()),
            Self::Command(cmd) => LeafKey::Command(cmd.name.clone()),
        }
    }

    pub fn as_option(&self) -> Option<&OptionLeaf> {
        match self {
            Self::Option(opt) => Some(opt),
            _ => None,
        }
    }
}

impl From<OptionLeaf> for Leaf {
    fn from(opt: OptionLeaf) -> Self {
        Self::Option(opt)
    }
}

impl From<Argument> for Leaf {
    fn from(arg: Argument) -> Self {
        Self::Argument(arg)
    }
}

impl From<Command> for Leaf {
    fn from(cmd: Command) -> Self {
        Self::Command(cmd)
    }
}

/// Renders the leaf as it would be written in a usage pattern; unnamed
/// invocation arguments render as their raw token.
impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Option(opt) if opt.takes_value => write!(f, "{} ARG", opt.name()),
            Self::Option(opt) => f.write_str(opt.name()),
            Self::Argument(Argument { name: Some(name), .. }) => f.write_str(name),
            Self::Argument(Argument { value, .. }) => match value {
                Value::String(token) => f.write_str(token),
                other => write!(f, "{other:?}"),
            },
            Self::Command(cmd) => f.write_str(&cmd.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ignores_value() {
        let declared = OptionLeaf::flag(Some("-v"), Some("--verbose"));
        let seen = declared.bound(Value::Bool(true));
        assert!(declared.same_identity(&seen));
        assert_ne!(declared, seen);
        assert_eq!(Leaf::from(declared).key(), Leaf::from(seen).key());
    }

    #[test]
    fn test_short_only_option_name() {
        let opt = OptionLeaf::flag(Some("-q"), None);
        assert_eq!(opt.name(), "-q");
    }

    #[test]
    fn test_display_positional_token() {
        assert_eq!(Leaf::from(Argument::positional("file.py")).to_string(), "file.py");
        assert_eq!(Leaf::from(Argument::new("<path>")).to_string(), "<path>");
        assert_eq!(
            Leaf::from(OptionLeaf::with_value(None, Some("--file"), None)).to_string(),
            "--file ARG"
        );
    }
}
