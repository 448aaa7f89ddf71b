//! Tokenizes an invocation into a flat sequence of leaves.

use tracing::trace;

use crate::error::Result;
use crate::options::{parse_long, parse_shorts};
use crate::{Argument, Leaf, OptionRegistry, Tokens};

/// How the argv parser treats positional tokens and `--`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArgvMode {
    /// The first positional ends option parsing.
    pub options_first: bool,
    /// Keep `--` itself as a positional leaf (the pattern names it).
    pub keep_double_dash: bool,
}

/// Parses invocation tokens against the registry.
///
/// Options come back carrying the value found in the input (`true` for
/// flags); every other token becomes an unnamed [`Argument`].
///
/// # Errors
///
/// Returns [`Error::User`](crate::Error::User) for unknown options,
/// ambiguous long prefixes and missing or unexpected option values.
///
/// # Examples
///
/// ```
/// use docmatch_core::{parse_argv, ArgvMode, OptionLeaf, OptionRegistry, Tokens};
///
/// let registry = OptionRegistry::new(vec![
///     OptionLeaf::flag(Some("-v"), Some("--verbose")),
///     OptionLeaf::with_value(Some("-o"), None, None),
/// ]);
/// let leaves = parse_argv(
///     Tokens::from_argv(["-vo", "out", "in.txt"]),
///     &registry,
///     ArgvMode::default(),
/// )
/// .unwrap();
/// let rendered = leaves.iter().map(|l| l.to_string()).collect::<Vec<_>>();
/// assert_eq!(rendered, ["--verbose", "-o ARG", "in.txt"]);
/// ```
pub fn parse_argv(
    mut tokens: Tokens,
    registry: &OptionRegistry,
    mode: ArgvMode,
) -> Result<Vec<Leaf>> {
    let mut parsed = Vec::new();

    while let Some(current) = tokens.current() {
        if current == "--" {
            tokens.advance();
            if mode.keep_double_dash {
                parsed.push(Leaf::from(Argument::positional("--")));
            }
            parsed.extend(positionals(tokens.drain()));
            break;
        }

        if current.starts_with("--") {
            let raw = tokens.advance().unwrap_or_default();
            parsed.push(Leaf::from(parse_long(&raw, &mut tokens, registry)?));
        } else if current.starts_with('-') && current != "-" {
            let raw = tokens.advance().unwrap_or_default();
            parsed.extend(
                parse_shorts(&raw, &mut tokens, registry)?
                    .into_iter()
                    .map(Leaf::from),
            );
        } else if mode.options_first {
            parsed.extend(positionals(tokens.drain()));
            break;
        } else {
            let raw = tokens.advance().unwrap_or_default();
            parsed.push(Leaf::from(Argument::positional(&raw)));
        }
    }

    trace!(count = parsed.len(), "parsed invocation");
    Ok(parsed)
}

fn positionals(tokens: Vec<String>) -> impl Iterator<Item = Leaf> {
    tokens
        .into_iter()
        .map(|token| Leaf::from(Argument::positional(&token)))
}
