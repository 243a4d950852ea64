use thiserror::Error;

/// A fault raised while tokenizing or executing a script chunk.
///
/// A fault stops the rest of the chunk. Values that were already popped by
/// the faulting operator are gone; nothing is pushed in their place.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Fault {
    /// No literal or word matches the text at the current position.
    #[error("syntax error at {snippet:?}")]
    Syntax { snippet: String },

    #[error("stack underflow")]
    StackUnderflow,

    /// Integer division or remainder by zero. Float division by zero is not
    /// a fault.
    #[error("integer divide by zero")]
    IntegerDivideByZero,

    /// The text looked like a literal but does not fit its radix or width.
    #[error("invalid literal {literal:?}: {reason}")]
    InvalidLiteral { literal: String, reason: String },
}

pub type Result<T> = core::result::Result<T, Fault>;

const SNIPPET_CHARS: usize = 20;

impl Fault {
    /// Builds a syntax fault that quotes at most the first few characters of
    /// `rest`.
    pub fn syntax(rest: &str) -> Self {
        let mut chars = rest.chars();
        let mut snippet: String = chars.by_ref().take(SNIPPET_CHARS).collect();
        if chars.next().is_some() {
            snippet.push_str("...");
        }
        Fault::Syntax { snippet }
    }

    pub fn invalid_literal(literal: &str, reason: impl ToString) -> Self {
        Fault::InvalidLiteral {
            literal: literal.to_string(),
            reason: reason.to_string(),
        }
    }
}
