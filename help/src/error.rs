//! Error types for help-document processing.

use docmatch_core::{Error, Reason};
use thiserror::Error;

/// Errors that can occur while turning a help document into a parser or
/// running it.
#[derive(Debug, Error)]
pub enum HelpError {
    /// The document has no `usage:` section.
    #[error("\"usage:\" (case-insensitive) not found")]
    NoUsageSection,

    /// The document has more than one `usage:` section.
    #[error("more than one \"usage:\" (case-insensitive) section")]
    MultipleUsageSections,

    /// The usage section or option descriptions are malformed.
    #[error("invalid usage pattern: {0}")]
    Specification(Reason),

    /// The invocation does not satisfy the document; `usage` is the section
    /// to show alongside the message.
    #[error("{reason}")]
    User { reason: Reason, usage: String },

    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl HelpError {
    /// Lifts an engine error, attaching `usage` to user errors.
    pub fn from_core(err: Error, usage: &str) -> Self {
        match err {
            Error::Specification(reason) => Self::Specification(reason),
            Error::User(reason) => Self::User {
                reason,
                usage: usage.to_string(),
            },
        }
    }

    /// Whether the end user, rather than the document author, is at fault.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::User { .. })
    }

    /// The usage section carried by a user error.
    pub fn usage(&self) -> Option<&str> {
        match self {
            Self::User { usage, .. } => Some(usage),
            _ => None,
        }
    }
}

/// Convenience alias for results with [`HelpError`].
pub type Result<T> = std::result::Result<T, HelpError>;
