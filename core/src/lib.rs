//! Usage-pattern grammar and backtracking matcher.
//!
//! A usage pattern such as `(add | rm) [-v] <file>...` is parsed into a tree
//! of [`Node`]s over [`Leaf`] patterns, normalized into a
//! [`CompiledPattern`], and matched against invocation arguments to produce
//! [`Bindings`]:
//!
//! - [`parse_pattern`]: recursive-descent parser for formal usage text.
//! - [`parse_argv`]: tokenizes an invocation into option and positional
//!   leaves.
//! - [`CompiledPattern`]: the normalized tree; [`CompiledPattern::apply`]
//!   runs the matcher.
//!
//! Options are declared up front in an [`OptionRegistry`]. Both parsers
//! resolve option tokens against it; failures in the usage text are
//! [`Error::Specification`], failures in the invocation are [`Error::User`].
//!
//! # Example
//!
//! ```
//! use docmatch_core::{compile, OptionLeaf, OptionRegistry, Value};
//!
//! let registry = OptionRegistry::new(vec![
//!     OptionLeaf::flag(Some("-v"), Some("--verbose")),
//!     OptionLeaf::with_value(Some("-o"), Some("--output"), Some("out.txt")),
//! ]);
//! let pattern = compile("(add | rm) [options] <file>...", registry).unwrap();
//!
//! let bindings = pattern.apply(["add", "--verb", "a.c", "b.c"], false).unwrap();
//! assert!(bindings.get_bool("add"));
//! assert!(!bindings.get_bool("rm"));
//! assert!(bindings.get_bool("--verbose"));
//! assert_eq!(bindings.get_str("--output"), Some("out.txt"));
//! assert_eq!(
//!     bindings.get("<file>"),
//!     Some(&Value::List(vec!["a.c".into(), "b.c".into()]))
//! );
//!
//! assert!(pattern.apply(["mv", "a.c"], false).is_err());
//! ```

mod argv;
mod bindings;
mod error;
mod leaf;
mod matcher;
mod normalize;
mod options;
mod pattern;
mod registry;
mod tokens;
mod usage;
mod value;

pub use argv::{ArgvMode, parse_argv};
pub use bindings::Bindings;
pub use error::{Error, ErrorKind, Reason, Result};
pub use leaf::{Argument, Command, Leaf, OptionLeaf};
pub use matcher::{Binding, State};
pub use normalize::{CompiledPattern, LeafId};
pub use pattern::{Node, Pattern};
pub use registry::OptionRegistry;
pub use tokens::Tokens;
pub use usage::parse_pattern;
pub use value::Value;

use tracing::debug;

/// Parses `usage`, fills `[options]` shortcuts from `registry`, and
/// normalizes the result.
///
/// # Errors
///
/// Returns [`Error::Specification`] when the usage text is malformed or
/// refers to options the registry does not declare as written.
pub fn compile(usage: &str, registry: OptionRegistry) -> Result<CompiledPattern> {
    let mut pattern = parse_pattern(usage, &registry)?;
    pattern.expand_options_shortcut(&registry);
    let compiled = CompiledPattern::new(pattern, registry);
    debug!(
        pattern = %compiled,
        leaves = compiled.leaves().len(),
        "compiled usage pattern"
    );
    Ok(compiled)
}
