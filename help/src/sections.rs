//! Section extraction and usage-line normalization.
//!
//! A section starts on any line containing its heading (case-insensitive)
//! and continues over the following lines that begin with a space or a tab.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{HelpError, Result};

static USAGE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^([^\n]*usage:[^\n]*\n?(?:[ \t].*?(?:\n|$))*)")
        .expect("static regex must compile")
});

static OPTIONS_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^([^\n]*options:[^\n]*\n?(?:[ \t].*?(?:\n|$))*)")
        .expect("static regex must compile")
});

/// Section headings understood by [`parse_section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Usage,
    Options,
}

/// Returns every section of `doc` with the given heading, trimmed.
///
/// # Examples
///
/// ```
/// use docmatch_help::{parse_section, Section};
///
/// let doc = "\nUsage: prog\n\nOptions:\n -h";
/// assert_eq!(parse_section(Section::Usage, doc), ["Usage: prog"]);
/// assert_eq!(parse_section(Section::Options, doc), ["Options:\n -h"]);
/// ```
pub fn parse_section(section: Section, doc: &str) -> Vec<String> {
    let pattern = match section {
        Section::Usage => &*USAGE_SECTION,
        Section::Options => &*OPTIONS_SECTION,
    };
    pattern
        .find_iter(doc)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Returns the single usage section of `doc`.
///
/// # Errors
///
/// [`HelpError::NoUsageSection`] or [`HelpError::MultipleUsageSections`].
pub fn usage_section(doc: &str) -> Result<String> {
    let mut sections = parse_section(Section::Usage, doc);
    match sections.len() {
        0 => Err(HelpError::NoUsageSection),
        1 => Ok(sections.remove(0)),
        _ => Err(HelpError::MultipleUsageSections),
    }
}

/// Converts a usage section into one formal pattern: every line that
/// starts with the program name becomes a parenthesized alternative.
///
/// # Examples
///
/// ```
/// use docmatch_help::formal_usage;
///
/// let usage = "Usage: prog add <x>\n       prog rm [-f] <x>";
/// assert_eq!(formal_usage(usage), "( add <x> ) | ( rm [-f] <x> )");
/// ```
pub fn formal_usage(section: &str) -> String {
    let body = section
        .split_once(':')
        .map_or(section, |(_, body)| body);
    let mut words = body.split_whitespace();
    let Some(prog) = words.next() else {
        return "( )".to_string();
    };

    let alternatives = words
        .map(|word| if word == prog { ") | (" } else { word })
        .collect::<Vec<_>>();
    if alternatives.is_empty() {
        return "( )".to_string();
    }
    format!("( {} )", alternatives.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_is_case_insensitive() {
        let doc = "Naval Fate.\n\nUSAGE: prog go\n  prog stop\n\nother text";
        assert_eq!(
            parse_section(Section::Usage, doc),
            ["USAGE: prog go\n  prog stop"]
        );
    }

    #[test]
    fn test_several_option_sections() {
        let doc = "usage: prog\n\nGlobal options:\n  -a  All\n\nLocal options:\n  -b  Brief\n";
        assert_eq!(
            parse_section(Section::Options, doc),
            ["Global options:\n  -a  All", "Local options:\n  -b  Brief"]
        );
    }

    #[test]
    fn test_usage_section_count_rules() {
        assert!(matches!(
            usage_section("no heading here"),
            Err(HelpError::NoUsageSection)
        ));
        assert!(matches!(
            usage_section("Usage: prog\n\nusage: prog"),
            Err(HelpError::MultipleUsageSections)
        ));
        assert_eq!(usage_section("Usage: prog a\n\nend").unwrap(), "Usage: prog a");
    }

    #[test]
    fn test_formal_usage_edge_cases() {
        assert_eq!(formal_usage("usage: prog"), "( )");
        assert_eq!(formal_usage("usage:"), "( )");
        assert_eq!(formal_usage("Usage: prog -v | -q"), "( -v | -q )");
        assert_eq!(
            formal_usage("Usage: prog a\n  prog\n  prog b"),
            "( a ) | ( ) | ( b )"
        );
    }
}
