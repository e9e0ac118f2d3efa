//! Error types for the calculator engine.

use thiserror::Error;

/// Everything that can go wrong while handling a key press.
///
/// All variants collapse to the same `"Error"` display at the keypad
/// boundary; the distinction only shows up in logs and in the `eval`
/// subcommand.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Malformed numeric text or expression syntax.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Mathematically undefined operation.
    #[error("Domain error: {0}")]
    Domain(String),

    /// A name the evaluator does not know.
    #[error("Unsupported token: {0}")]
    UnsupportedToken(String),
}

impl CalcError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub fn unsupported(token: impl Into<String>) -> Self {
        Self::UnsupportedToken(token.into())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
