//! Command-line parsers built from help documents.
//!
//! A help document names its invocations in a `Usage:` section and declares
//! options, with defaults, in `Options:` sections. This crate extracts both,
//! compiles them with [`docmatch_core`], and matches invocations against the
//! result:
//!
//! - [`Document::parse`]: extracts sections, builds the option registry and
//!   compiles the usage pattern.
//! - [`Document::run`]: answers help and version requests or matches an
//!   invocation, returning an [`Outcome`].
//! - [`run`]: both steps at once.
//!
//! # Example
//!
//! ```
//! use docmatch_help::{run, Outcome, Settings};
//!
//! let doc = "\
//! Naval Fate.
//!
//! Usage:
//!   naval_fate ship new <name>...
//!   naval_fate ship <name> move <x> <y> [--speed=<kn>]
//!   naval_fate -h | --help
//!
//! Options:
//!   -h --help     Show this screen.
//!   --speed=<kn>  Speed in knots [default: 10].
//! ";
//!
//! let outcome = run(doc, ["ship", "Guardian", "move", "10", "50"], &Settings::default()).unwrap();
//! let Outcome::Matched(bindings) = outcome else { panic!("expected a match") };
//! assert!(bindings.get_bool("move"));
//! assert_eq!(bindings.get_str("--speed"), Some("10"));
//!
//! let outcome = run(doc, ["--help"], &Settings::default()).unwrap();
//! assert!(matches!(outcome, Outcome::Help(text) if text.starts_with("Naval Fate.")));
//! ```

mod describe;
mod error;
pub mod output;
mod sections;
mod settings;

pub use describe::{parse_defaults, parse_option_description};
pub use error::{HelpError, Result};
pub use sections::{Section, formal_usage, parse_section, usage_section};
pub use settings::Settings;

use docmatch_core::{Bindings, CompiledPattern, Leaf, OptionRegistry, compile};
use tracing::debug;

/// What a help document made of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The invocation matched; every name the pattern mentions is bound.
    Matched(Bindings),
    /// `-h`/`--help` was given; the document text to print.
    Help(String),
    /// `--version` was given; the configured version text.
    Version(String),
}

/// A parsed help document, ready to match invocations.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    usage: String,
    pattern: CompiledPattern,
}

impl Document {
    /// Extracts the usage and options sections of `doc` and compiles them.
    ///
    /// # Errors
    ///
    /// [`HelpError::NoUsageSection`], [`HelpError::MultipleUsageSections`],
    /// or [`HelpError::Specification`] when the usage pattern is malformed.
    pub fn parse(doc: &str) -> Result<Self> {
        let usage = usage_section(doc)?;
        let registry = parse_defaults(doc);
        let formal = formal_usage(&usage);
        debug!(formal = %formal, options = registry.len(), "parsing help document");

        let pattern = compile(&formal, registry).map_err(|e| HelpError::from_core(e, &usage))?;
        Ok(Self {
            text: doc.to_string(),
            usage,
            pattern,
        })
    }

    /// The document as given.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The usage section, as shown to users alongside errors.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn registry(&self) -> &OptionRegistry {
        self.pattern.registry()
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Matches one invocation.
    ///
    /// Help and version requests are answered before matching, as soon as
    /// the invocation tokenizes.
    ///
    /// # Errors
    ///
    /// [`HelpError::User`] when the invocation does not tokenize or does not
    /// match; it carries the usage section.
    pub fn run<I, S>(&self, argv: I, settings: &Settings) -> Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let leaves = self
            .pattern
            .tokenize(argv, settings.options_first)
            .map_err(|e| HelpError::from_core(e, &self.usage))?;

        if settings.help && requested(&leaves, &["-h", "--help"]) {
            debug!("help requested");
            return Ok(Outcome::Help(self.text.trim_matches('\n').to_string()));
        }
        if let Some(version) = &settings.version {
            if requested(&leaves, &["--version"]) {
                debug!("version requested");
                return Ok(Outcome::Version(version.clone()));
            }
        }

        self.pattern
            .match_leaves(leaves)
            .map(Outcome::Matched)
            .map_err(|e| HelpError::from_core(e, &self.usage))
    }
}

/// Whether any option leaf with one of `names` was given.
fn requested(leaves: &[Leaf], names: &[&str]) -> bool {
    leaves.iter().any(|leaf| {
        leaf.as_option()
            .is_some_and(|opt| names.contains(&opt.name()) && opt.value.is_truthy())
    })
}

/// Parses `doc` and matches `argv` against it.
///
/// # Errors
///
/// See [`Document::parse`] and [`Document::run`].
pub fn run<I, S>(doc: &str, argv: I, settings: &Settings) -> Result<Outcome>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Document::parse(doc)?.run(argv, settings)
}
