//! Error types for usage-pattern parsing and argv matching.
//!
//! Every failure is one [`Reason`] raised under one of two kinds: a
//! specification error (the usage text itself is malformed) or a user error
//! (the invocation does not satisfy a well-formed usage text). The token
//! stream carries the [`ErrorKind`] so the same lexical failure, such as an
//! option missing its argument, lands in the right channel depending on which
//! parser hit it.

use thiserror::Error;

/// Which failure channel a [`Reason`] is reported through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Developer mistake in the usage text.
    Specification,
    /// Invocation does not satisfy the usage text.
    User,
}

/// What went wrong, independent of who is to blame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Reason {
    /// An opening `(` or `[` without its partner.
    #[error("unmatched '{0}'")]
    UnmatchedDelimiter(char),
    /// Tokens left after a complete expression (e.g. a stray `)`).
    #[error("unexpected ending: '{0}'")]
    UnexpectedEnding(String),
    /// Option not present in the registry.
    #[error("{0} is not recognized")]
    UnknownOption(String),
    /// Long-option prefix shared by several registry entries.
    #[error("{prefix} is not a unique prefix: {}?", .candidates.join(", "))]
    AmbiguousPrefix {
        prefix: String,
        candidates: Vec<String>,
    },
    /// Short form declared by more than one registry entry.
    #[error("{short} is specified ambiguously {count} times")]
    AmbiguousShort { short: String, count: usize },
    /// Value-taking option without a value.
    #[error("{0} requires argument")]
    MissingArgument(String),
    /// Flag given an inline `=value`.
    #[error("{0} must not have an argument")]
    UnexpectedArgument(String),
    /// The pattern tree rejected the invocation.
    #[error("arguments did not match usage")]
    NoMatch {
        /// Tokens that no pattern leaf consumed, in input order.
        unconsumed: Vec<String>,
    },
}

/// Errors produced by the pattern engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed usage text, detected before any input is examined.
    #[error("invalid usage pattern: {0}")]
    Specification(Reason),
    /// Well-formed usage text not satisfied by the invocation.
    #[error("{0}")]
    User(Reason),
}

impl Error {
    /// Builds an error of the given kind.
    pub fn new(kind: ErrorKind, reason: Reason) -> Self {
        match kind {
            ErrorKind::Specification => Self::Specification(reason),
            ErrorKind::User => Self::User(reason),
        }
    }

    /// Returns the failure channel of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Specification(_) => ErrorKind::Specification,
            Self::User(_) => ErrorKind::User,
        }
    }

    /// Returns the underlying reason.
    pub fn reason(&self) -> &Reason {
        match self {
            Self::Specification(reason) | Self::User(reason) => reason,
        }
    }
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_prefix_lists_candidates() {
        let reason = Reason::AmbiguousPrefix {
            prefix: "--ver".to_string(),
            candidates: vec!["--verbose".to_string(), "--version".to_string()],
        };
        assert_eq!(
            reason.to_string(),
            "--ver is not a unique prefix: --verbose, --version?"
        );
    }

    #[test]
    fn test_kind_round_trips_through_constructor() {
        let err = Error::new(ErrorKind::User, Reason::MissingArgument("-o".into()));
        assert_eq!(err.kind(), ErrorKind::User);
        assert_eq!(err.to_string(), "-o requires argument");

        let err = Error::new(ErrorKind::Specification, Reason::UnmatchedDelimiter('('));
        assert_eq!(err.kind(), ErrorKind::Specification);
        assert_eq!(err.to_string(), "invalid usage pattern: unmatched '('");
    }
}
