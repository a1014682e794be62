use thiserror::Error;

/// Policy compilation and loading errors
#[derive(Error, Debug)]
pub enum PolicyError {
    /// A selector has no content, contains characters outside the DNS-safe
    /// alphabet, or collapses to nothing after normalization.
    #[error("Malformed selector #{index} ({selector:?}): {reason}")]
    MalformedSelector {
        index: usize,
        selector: String,
        reason: String,
    },

    /// The composed alternation could not be turned into an automaton.
    #[error("Pattern compile failure: {0}")]
    PatternCompileFailure(#[from] regex::Error),

    #[error("Parse error at line {line}: {message}")]
    ParseErrorAtLine { line: usize, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PolicyError {
    pub(crate) fn malformed(index: usize, selector: &str, reason: impl Into<String>) -> Self {
        PolicyError::MalformedSelector {
            index,
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the rule set itself rather than by I/O.
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            PolicyError::MalformedSelector { .. } | PolicyError::PatternCompileFailure(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PolicyError>;
