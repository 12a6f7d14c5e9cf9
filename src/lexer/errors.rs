use thiserror::Error;

/// Lexer error types
///
/// Offsets are character offsets into the source text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("Unexpected character '{0}' at offset {1}")]
    UnexpectedChar(char, usize),
}

impl LexerError {
    /// Character offset of the offending input
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            LexerError::UnexpectedChar(_, offset) => *offset,
        }
    }
}
