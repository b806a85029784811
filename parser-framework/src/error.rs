use thiserror::Error;

/// The single failure a parse run can end with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An error-typed token reached the parser. `message` is the token's text.
    #[error("{message} at pos {offset}")]
    Lexical { message: String, offset: usize },

    /// A rule expected one of `expected` but found a token of type `found`.
    #[error(
        "syntax error, expected one of [{}] but got '{found}' at pos {offset}",
        quoted(.expected)
    )]
    UnexpectedToken {
        expected: Vec<&'static str>,
        found: &'static str,
        offset: usize,
    },

    /// A rule expected one of `expected` but the token buffer was exhausted.
    #[error("syntax error, expected one of [{}] but no more tokens", quoted(.expected))]
    UnexpectedEnd { expected: Vec<&'static str> },

    /// Raised by a rule through `ParseContext::error`.
    #[error("{0}")]
    Custom(String),

    /// `parse` was called on a parser that has already run.
    #[error("parser has already run")]
    AlreadyRun,

    /// A rule panicked before signalling an error.
    #[error("rule execution panicked")]
    RulePanicked,

    /// The rule thread could not be started.
    #[error("failed to spawn rule thread: {0}")]
    Spawn(String),
}

impl ParseError {
    /// Byte offset in the input the error refers to, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Lexical { offset, .. } | ParseError::UnexpectedToken { offset, .. } => {
                Some(*offset)
            }
            _ => None,
        }
    }
}

fn quoted(names: &[&'static str]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
