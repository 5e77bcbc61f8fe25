//! Parse errors, with source ranges.

use text_size::TextRange;
use thiserror::Error;

/// An error from the Prolog parser or its input source.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Malformed source, with the byte range of the offending token.
    #[error("syntax error at {range:?}: {message}")]
    Syntax { message: String, range: TextRange },

    /// A clause parsed but the engine rejected it (e.g. a body shape
    /// resolution cannot evaluate).
    #[error("bad clause: {0}")]
    Clause(#[from] crate::error::EngineError),

    /// Reading the input source failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, range: TextRange) -> ParseError {
        ParseError::Syntax {
            message: message.into(),
            range,
        }
    }

    /// The source range, when this is a syntax error.
    pub fn range(&self) -> Option<TextRange> {
        match self {
            ParseError::Syntax { range, .. } => Some(*range),
            ParseError::Clause(_) | ParseError::Io(_) => None,
        }
    }
}
