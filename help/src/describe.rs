//! Option descriptions: `-o FILE, --output=FILE  Write here [default: a.out]`.

use std::sync::LazyLock;

use docmatch_core::{OptionLeaf, OptionRegistry};
use regex::Regex;
use tracing::{debug, trace};

use crate::sections::{Section, parse_section};

/// Start of an option entry: a line that begins (after indentation) with
/// `-` and one more non-space character.
static ENTRY_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*(-\S)").expect("static regex must compile"));

static DEFAULT_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[default: (.*?)\]").expect("static regex must compile")
});

/// Parses one option description.
///
/// The forms come before the first double space, separated by spaces,
/// commas or `=`; any word that is not an option form marks the option as
/// taking a value. Only value-taking options read a `[default: ...]`.
///
/// # Examples
///
/// ```
/// use docmatch_core::Value;
/// use docmatch_help::parse_option_description;
///
/// let opt = parse_option_description("-o FILE, --output=FILE  Output [default: a.out]");
/// assert_eq!(opt.short.as_deref(), Some("-o"));
/// assert_eq!(opt.long.as_deref(), Some("--output"));
/// assert!(opt.takes_value);
/// assert_eq!(opt.value, Value::from("a.out"));
///
/// let flag = parse_option_description("-q, --quiet  Say less [default: yes]");
/// assert_eq!(flag.value, Value::Bool(false));
/// ```
pub fn parse_option_description(description: &str) -> OptionLeaf {
    let trimmed = description.trim();
    let (forms, text) = trimmed.split_once("  ").unwrap_or((trimmed, ""));
    let forms = forms.replace([',', '='], " ");

    let mut short = None;
    let mut long = None;
    let mut takes_value = false;
    for word in forms.split_whitespace() {
        if word.starts_with("--") {
            long = Some(word);
        } else if word.starts_with('-') {
            short = Some(word);
        } else {
            takes_value = true;
        }
    }

    if !takes_value {
        return OptionLeaf::flag(short, long);
    }
    let default = DEFAULT_VALUE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());
    OptionLeaf::with_value(short, long, default)
}

/// Builds the option registry from every `options:` section of `doc`.
///
/// # Examples
///
/// ```
/// use docmatch_help::parse_defaults;
///
/// let doc = "Usage: prog [options]\n\nOptions:\n  -h --help  Show help\n  --speed=<kn>  Speed [default: 10]\n";
/// let registry = parse_defaults(doc);
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.find("--speed").unwrap().value.as_str(), Some("10"));
/// ```
pub fn parse_defaults(doc: &str) -> OptionRegistry {
    let mut registry = OptionRegistry::default();

    for section in parse_section(Section::Options, doc) {
        let body = section
            .split_once(':')
            .map_or(section.as_str(), |(_, body)| body);
        let body = format!("\n{body}");

        let starts = ENTRY_START
            .captures_iter(&body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.start())
            .collect::<Vec<_>>();
        for (idx, start) in starts.iter().enumerate() {
            let end = starts.get(idx + 1).map_or(body.len(), |next| {
                body[..*next].rfind('\n').unwrap_or(*next)
            });
            let entry = &body[*start..end];
            let option = parse_option_description(entry);
            trace!(entry, option = option.name(), "parsed option description");
            registry.push(option);
        }
    }

    debug!(options = registry.len(), "built option registry");
    registry
}
