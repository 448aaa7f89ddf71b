//! Token cursor shared by the usage-pattern parser and the argv parser.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, ErrorKind, Reason};

/// Grammar punctuation that gets whitespace inserted around it.
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: compile-time constant pattern.
    Regex::new(r"([\[\]\(\)\|]|\.\.\.)").expect("static regex must compile")
});

/// A pattern token: a `<...>` metavariable (spaces allowed inside) with any
/// prefix glued to it, or a run of non-whitespace.
static PATTERN_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S*<.*?>|\S+").expect("static regex must compile"));

/// A cursor over string tokens plus the error kind raised on malformed input.
#[derive(Debug, Clone)]
pub struct Tokens {
    tokens: Vec<String>,
    pos: usize,
    kind: ErrorKind,
}

impl Tokens {
    /// Tokens of a formal usage pattern; errors are specification errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use docmatch_core::Tokens;
    ///
    /// let tokens = Tokens::from_pattern("[-v|<input file>]...");
    /// assert_eq!(tokens.rest(), ["[", "-v", "|", "<input file>", "]", "..."]);
    /// ```
    pub fn from_pattern(source: &str) -> Self {
        let spaced = SEPARATORS.replace_all(source, " $1 ");
        let tokens = PATTERN_TOKEN
            .find_iter(&spaced)
            .map(|m| m.as_str().to_string())
            .collect();
        Self {
            tokens,
            pos: 0,
            kind: ErrorKind::Specification,
        }
    }

    /// Tokens of an invocation; errors are user errors.
    pub fn from_argv<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: argv.into_iter().map(Into::into).collect(),
            pos: 0,
            kind: ErrorKind::User,
        }
    }

    /// The token under the cursor.
    pub fn current(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    /// Consumes and returns the token under the cursor.
    pub fn advance(&mut self) -> Option<String> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Unconsumed tokens.
    pub fn rest(&self) -> &[String] {
        &self.tokens[self.pos..]
    }

    /// Consumes every remaining token.
    pub fn drain(&mut self) -> Vec<String> {
        let rest = self.rest().to_vec();
        self.pos = self.tokens.len();
        rest
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Builds an error of this stream's kind.
    pub fn error(&self, reason: Reason) -> Error {
        Error::new(self.kind, reason)
    }
}
