//! Recursive-descent parser for formal usage patterns.
//!
//! ```text
//! EXPR ::= SEQ ('|' SEQ)*
//! SEQ  ::= (ATOM ['...'])*
//! ATOM ::= '(' EXPR ')' | '[' EXPR ']' | 'options'
//!        | LONG | SHORTS | ARGUMENT | COMMAND
//! ```
//!
//! Every option written in the pattern must resolve against the registry;
//! failures are specification errors.

use tracing::trace;

use crate::error::{Reason, Result};
use crate::options::{parse_long, parse_shorts};
use crate::{Argument, Command, Node, OptionRegistry, Pattern, Tokens};

/// Parses a formal usage pattern into a tree rooted at `Required`.
///
/// # Errors
///
/// Returns [`Error::Specification`](crate::Error::Specification) for
/// unbalanced brackets, trailing tokens, and options that are undeclared,
/// ambiguous, or written with the wrong arity.
///
/// # Examples
///
/// ```
/// use docmatch_core::{parse_pattern, OptionLeaf, OptionRegistry};
///
/// let registry = OptionRegistry::new(vec![OptionLeaf::flag(Some("-v"), None)]);
/// let pattern = parse_pattern("( add | rm ) [-v] <x>...", &registry).unwrap();
/// assert_eq!(pattern.to_string(), "(((add | rm)) [-v] <x>...)");
///
/// assert!(parse_pattern("( add", &registry).is_err());
/// ```
pub fn parse_pattern(source: &str, registry: &OptionRegistry) -> Result<Pattern> {
    let mut tokens = Tokens::from_pattern(source);
    let result = parse_expr(&mut tokens, registry)?;
    if tokens.current().is_some() {
        return Err(tokens.error(Reason::UnexpectedEnding(tokens.rest().join(" "))));
    }
    trace!(source, "parsed usage pattern");
    Ok(Node::Required(result))
}

fn parse_expr(tokens: &mut Tokens, registry: &OptionRegistry) -> Result<Vec<Pattern>> {
    let seq = parse_seq(tokens, registry)?;
    if tokens.current() != Some("|") {
        return Ok(seq);
    }

    let mut alternatives = vec![group(seq)];
    while tokens.current() == Some("|") {
        tokens.advance();
        alternatives.push(group(parse_seq(tokens, registry)?));
    }
    Ok(vec![Node::Either(alternatives)])
}

/// One alternative of an `Either`: a lone atom stands as itself.
fn group(mut seq: Vec<Pattern>) -> Pattern {
    if seq.len() == 1 {
        if let Some(only) = seq.pop() {
            return only;
        }
    }
    Node::Required(seq)
}

fn parse_seq(tokens: &mut Tokens, registry: &OptionRegistry) -> Result<Vec<Pattern>> {
    let mut result = Vec::new();
    while !matches!(tokens.current(), None | Some("]" | ")" | "|")) {
        let mut atom = parse_atom(tokens, registry)?;
        if tokens.current() == Some("...") {
            tokens.advance();
            atom = vec![Node::one_or_more(group(atom))];
        }
        result.extend(atom);
    }
    Ok(result)
}

fn parse_atom(tokens: &mut Tokens, registry: &OptionRegistry) -> Result<Vec<Pattern>> {
    let Some(token) = tokens.advance() else {
        return Ok(Vec::new());
    };

    match token.as_str() {
        "(" | "[" => {
            let inner = parse_expr(tokens, registry)?;
            let (closing, node) = if token == "(" {
                (")", Node::Required(inner))
            } else {
                ("]", Node::Optional(inner))
            };
            if tokens.advance().as_deref() != Some(closing) {
                let opening = if token == "(" { '(' } else { '[' };
                return Err(tokens.error(Reason::UnmatchedDelimiter(opening)));
            }
            Ok(vec![node])
        }
        "options" => Ok(vec![Node::OptionsShortcut(Vec::new())]),
        long if long.starts_with("--") && long != "--" => {
            Ok(vec![Node::leaf(parse_long(long, tokens, registry)?)])
        }
        shorts if shorts.starts_with('-') && shorts != "-" && shorts != "--" => Ok(parse_shorts(
            shorts, tokens, registry,
        )?
        .into_iter()
        .map(Node::leaf)
        .collect()),
        name if is_argument_name(name) => Ok(vec![Node::leaf(Argument::new(name))]),
        name => Ok(vec![Node::leaf(Command::new(name))]),
    }
}

/// `<name>` or an all-upper-case word (digits and punctuation allowed).
fn is_argument_name(token: &str) -> bool {
    (token.starts_with('<') && token.ends_with('>'))
        || (token.chars().any(char::is_uppercase) && !token.chars().any(char::is_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, OptionLeaf};

    fn registry() -> OptionRegistry {
        OptionRegistry::new(vec![
            OptionLeaf::flag(Some("-h"), None),
            OptionLeaf::flag(Some("-v"), Some("--verbose")),
            OptionLeaf::with_value(Some("-f"), Some("--file"), None),
        ])
    }

    fn opt(short: Option<&str>, long: Option<&str>) -> Pattern {
        Node::leaf(OptionLeaf::flag(short, long))
    }

    fn file() -> Pattern {
        Node::leaf(OptionLeaf::with_value(Some("-f"), Some("--file"), None))
    }

    fn arg(name: &str) -> Pattern {
        Node::leaf(Argument::new(name))
    }

    #[test]
    fn test_optional_flag() {
        assert_eq!(
            parse_pattern("[ -h ]", &registry()).unwrap(),
            Node::Required(vec![Node::Optional(vec![opt(Some("-h"), None)])])
        );
    }

    #[test]
    fn test_optional_repeated_argument() {
        assert_eq!(
            parse_pattern("[ ARG ... ]", &registry()).unwrap(),
            Node::Required(vec![Node::Optional(vec![Node::one_or_more(arg("ARG"))])])
        );
    }

    #[test]
    fn test_either_inside_optional() {
        assert_eq!(
            parse_pattern("[ -h | -v ]", &registry()).unwrap(),
            Node::Required(vec![Node::Optional(vec![Node::Either(vec![
                opt(Some("-h"), None),
                opt(Some("-v"), Some("--verbose")),
            ])])])
        );
    }

    #[test]
    fn test_nested_groups_with_option_argument() {
        assert_eq!(
            parse_pattern("(-h|-v[--file=f.txt]N...)", &registry()).unwrap(),
            Node::Required(vec![Node::Required(vec![Node::Either(vec![
                opt(Some("-h"), None),
                Node::Required(vec![
                    opt(Some("-v"), Some("--verbose")),
                    Node::Optional(vec![file()]),
                    Node::one_or_more(arg("N")),
                ]),
            ])])])
        );
    }

    #[test]
    fn test_arguments_only_alternatives() {
        assert_eq!(
            parse_pattern("(N [M | (K | L)] | O P)", &OptionRegistry::default()).unwrap(),
            Node::Required(vec![Node::Required(vec![Node::Either(vec![
                Node::Required(vec![
                    arg("N"),
                    Node::Optional(vec![Node::Either(vec![
                        arg("M"),
                        Node::Required(vec![Node::Either(vec![arg("K"), arg("L")])]),
                    ])]),
                ]),
                Node::Required(vec![arg("O"), arg("P")]),
            ])])])
        );
    }

    #[test]
    fn test_options_shortcut_keyword() {
        assert_eq!(
            parse_pattern("-v [options]", &registry()).unwrap(),
            Node::Required(vec![
                opt(Some("-v"), Some("--verbose")),
                Node::Optional(vec![Node::OptionsShortcut(Vec::new())]),
            ])
        );
    }

    #[test]
    fn test_commands_and_metavariables() {
        assert_eq!(
            parse_pattern("add <to do> FILE_2 -- -", &OptionRegistry::default()).unwrap(),
            Node::Required(vec![
                Node::leaf(Command::new("add")),
                arg("<to do>"),
                arg("FILE_2"),
                Node::leaf(Command::new("--")),
                Node::leaf(Command::new("-")),
            ])
        );
    }

    #[test]
    fn test_option_cluster_repeated_as_group() {
        assert_eq!(
            parse_pattern("-hv...", &registry()).unwrap(),
            Node::Required(vec![Node::one_or_more(Node::Required(vec![
                opt(Some("-h"), None),
                opt(Some("-v"), Some("--verbose")),
            ]))])
        );
    }

    #[test]
    fn test_unmatched_brackets() {
        let registry = registry();
        assert_eq!(
            parse_pattern("( -h", &registry).unwrap_err(),
            Error::Specification(Reason::UnmatchedDelimiter('('))
        );
        assert_eq!(
            parse_pattern("[a [b]", &registry).unwrap_err(),
            Error::Specification(Reason::UnmatchedDelimiter('['))
        );
        assert_eq!(
            parse_pattern("a ) b", &registry).unwrap_err(),
            Error::Specification(Reason::UnexpectedEnding(") b".into()))
        );
    }

    #[test]
    fn test_undeclared_option_is_rejected() {
        assert_eq!(
            parse_pattern("--quiet", &registry()).unwrap_err(),
            Error::Specification(Reason::UnknownOption("--quiet".into()))
        );
    }

    #[test]
    fn test_arity_mismatch_is_rejected() {
        let registry = OptionRegistry::new(vec![
            OptionLeaf::with_value(None, Some("--long"), None),
            OptionLeaf::flag(None, Some("--flag")),
        ]);
        assert_eq!(
            parse_pattern("( --long )", &registry).unwrap_err(),
            Error::Specification(Reason::MissingArgument("--long".into()))
        );
        assert_eq!(
            parse_pattern("--flag=X", &registry).unwrap_err(),
            Error::Specification(Reason::UnexpectedArgument("--flag".into()))
        );
    }
}
