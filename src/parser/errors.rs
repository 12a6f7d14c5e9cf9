use thiserror::Error;

/// Error classes reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LexicalError,
    SyntaxError,
    SemanticError,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            ErrorKind::LexicalError => "lexical error",
            ErrorKind::SyntaxError => "syntax error",
            ErrorKind::SemanticError => "semantic error",
        };
        write!(f, "{}", s)
    }
}

/// Parser error types
///
/// `offset` is a character offset into the source, `index` the position of
/// the offending token in the token sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("Expected {expected} but found {found} at offset {offset}")]
    ExpectedToken {
        expected: String,
        found: String,
        offset: usize,
        index: usize,
    },

    #[error("Duplicate label '{name}' at offset {offset} (first defined at offset {first_offset})")]
    DuplicateLabel {
        name: String,
        offset: usize,
        index: usize,
        first_offset: usize,
    },

    #[error("Jump index {numeral} out of range 1..={count} at offset {offset}")]
    IndexOutOfRange {
        numeral: String,
        count: usize,
        offset: usize,
        index: usize,
    },

    #[error("Nesting deeper than {limit} levels at offset {offset}")]
    NestingTooDeep {
        limit: usize,
        offset: usize,
        index: usize,
    },

    #[error("Lexer error: {0}")]
    LexerError(#[from] crate::lexer::LexerError),
}

impl ParserError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParserError::ExpectedToken { .. } | ParserError::NestingTooDeep { .. } => {
                ErrorKind::SyntaxError
            }
            ParserError::DuplicateLabel { .. } | ParserError::IndexOutOfRange { .. } => {
                ErrorKind::SemanticError
            }
            ParserError::LexerError(_) => ErrorKind::LexicalError,
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            ParserError::ExpectedToken { offset, .. }
            | ParserError::DuplicateLabel { offset, .. }
            | ParserError::IndexOutOfRange { offset, .. }
            | ParserError::NestingTooDeep { offset, .. } => *offset,
            ParserError::LexerError(err) => err.offset(),
        }
    }

    /// Token index of the error; lexical errors have none
    #[must_use]
    pub fn token_index(&self) -> Option<usize> {
        match self {
            ParserError::ExpectedToken { index, .. }
            | ParserError::DuplicateLabel { index, .. }
            | ParserError::IndexOutOfRange { index, .. }
            | ParserError::NestingTooDeep { index, .. } => Some(*index),
            ParserError::LexerError(_) => None,
        }
    }

    /// Description of the error without its position
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ParserError::ExpectedToken { expected, found, .. } => {
                format!("expected {expected}, found {found}")
            }
            ParserError::DuplicateLabel { name, .. } => format!("duplicate label '{name}'"),
            ParserError::IndexOutOfRange { numeral, count, .. } => {
                format!("index out of range: {numeral} is not between 1 and {count}")
            }
            ParserError::NestingTooDeep { limit, .. } => {
                format!("nesting too deep: more than {limit} levels")
            }
            ParserError::LexerError(crate::lexer::LexerError::UnexpectedChar(ch, _)) => {
                format!("unexpected character '{ch}'")
            }
        }
    }
}
