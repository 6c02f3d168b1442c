//! Error types produced by every stage of the streaming pipeline.
//!
//! The pipeline recognizes exactly two kinds of failure (spec.md §7):
//! [`ParserError::IncompleteInput`] for input that ended mid-token or
//! mid-structure, and [`ParserError::InvalidJson`] for any other syntactic or
//! lexical violation. Callers that stream over a socket can match on
//! [`ParserError::IncompleteInput`] to decide whether to wait for more bytes
//! rather than give up.
use alloc::string::String;

/// An error raised while lexing, parsing, tagging, or materializing JSON.
///
/// Once an error is raised at some point in an iterator, the iterator is
/// exhausted: every subsequent call to `next` yields `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    /// Input ended while a token or a container was still open.
    ///
    /// Reserved for true end-of-stream conditions: an unterminated string, a
    /// number cut off before its first non-digit, or an unbalanced container.
    #[error("incomplete input at byte {position}: {message}")]
    IncompleteInput {
        /// Byte offset at which the input ran out.
        position: usize,
        /// Human-readable description of what was left open.
        message: String,
    },

    /// A syntactic or lexical violation that is not simply a truncated
    /// stream: an unrecognized lexeme, an invalid escape, invalid UTF-8 at a
    /// real character boundary, an unbalanced closer, trailing data, or an
    /// invalid surrogate pair.
    #[error("invalid JSON at byte {position}: {message}")]
    InvalidJson {
        /// Byte offset at which the violation was detected.
        position: usize,
        /// Human-readable description of the violation.
        message: String,
    },
}

impl ParserError {
    pub(crate) fn incomplete(position: usize, message: impl Into<String>) -> Self {
        Self::IncompleteInput {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn invalid(position: usize, message: impl Into<String>) -> Self {
        Self::InvalidJson {
            position,
            message: message.into(),
        }
    }

    /// Returns `true` if this error is [`ParserError::IncompleteInput`].
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::IncompleteInput { .. })
    }

    /// The byte offset at which the error was detected.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::IncompleteInput { position, .. } | Self::InvalidJson { position, .. } => {
                *position
            }
        }
    }
}
