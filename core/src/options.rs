//! Option-token resolution shared by the usage-pattern and argv parsers.
//!
//! Both parsers resolve `--long[=value]` and `-abc` clusters against the
//! same registry; the token stream's [`ErrorKind`] decides whether a failure
//! is a specification error or a user error, and whether the resolved option
//! carries the value found in the input.

use crate::error::{ErrorKind, Reason, Result};
use crate::{OptionLeaf, OptionRegistry, Tokens, Value};

/// Resolves one long-option token that has already been taken off `tokens`.
///
/// A value-taking option reads its value from `=value` or from the next
/// token; the next token is not eligible when it is `--` or absent.
pub(crate) fn parse_long(
    raw: &str,
    tokens: &mut Tokens,
    registry: &OptionRegistry,
) -> Result<OptionLeaf> {
    let (long, inline) = match raw.split_once('=') {
        Some((long, value)) => (long, Some(value.to_string())),
        None => (raw, None),
    };

    let declared = registry.resolve_long(long, tokens.kind())?;
    let name = declared.name().to_string();

    let value = if declared.takes_value {
        match inline {
            Some(value) => Some(value),
            None => Some(take_value(tokens, &name)?),
        }
    } else {
        if inline.is_some() {
            return Err(tokens.error(Reason::UnexpectedArgument(name)));
        }
        None
    };

    Ok(bind(declared, value, tokens.kind()))
}

/// Resolves a short-option cluster (`-abc`, `-ofile`) that has already been
/// taken off `tokens`.
///
/// Splitting stops at the first value-taking option: the cluster remainder,
/// or else the next token, is its value.
pub(crate) fn parse_shorts(
    raw: &str,
    tokens: &mut Tokens,
    registry: &OptionRegistry,
) -> Result<Vec<OptionLeaf>> {
    let mut rest = raw.strip_prefix('-').unwrap_or(raw);
    let mut parsed = Vec::new();

    while let Some(ch) = rest.chars().next() {
        rest = &rest[ch.len_utf8()..];
        let short = format!("-{ch}");
        let declared = registry.resolve_short(&short, tokens.kind())?;

        let mut value = None;
        if declared.takes_value {
            if rest.is_empty() {
                value = Some(take_value(tokens, &short)?);
            } else {
                value = Some(rest.to_string());
                rest = "";
            }
        }

        parsed.push(bind(declared, value, tokens.kind()));
    }

    Ok(parsed)
}

/// Takes the next token as an option value. In a usage pattern, grammar
/// punctuation is never a placeholder.
fn take_value(tokens: &mut Tokens, name: &str) -> Result<String> {
    let unavailable = match tokens.current() {
        None | Some("--") => true,
        Some(next) => {
            tokens.kind() == ErrorKind::Specification
                && matches!(next, "(" | ")" | "[" | "]" | "|" | "...")
        }
    };
    if unavailable {
        return Err(tokens.error(Reason::MissingArgument(name.to_string())));
    }
    tokens
        .advance()
        .ok_or_else(|| tokens.error(Reason::MissingArgument(name.to_string())))
}

/// Invocation options carry what was typed; pattern options keep the
/// registry default.
fn bind(declared: &OptionLeaf, value: Option<String>, kind: ErrorKind) -> OptionLeaf {
    match kind {
        ErrorKind::User => declared.bound(value.map_or(Value::Bool(true), Value::String)),
        ErrorKind::Specification => declared.clone(),
    }
}
