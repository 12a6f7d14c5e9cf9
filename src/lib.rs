//! GO TO language front end
//!
//! Lexer, recursive-descent parser and label checks for a small language with
//! assignment, `IF ... THEN ... ELSE`, `READ`/`PRINT`, and direct and computed
//! `GO TO` jumps. A program is accepted or rejected with its first error.

pub mod diagnostics;
pub mod labels;
pub mod lexer;
pub mod parser;

pub use diagnostics::{check, parse_source, Failure, ParseOutcome};
pub use labels::{resolve_computed_index, Label, LabelRegistry};
pub use lexer::{tokenize, Category, Keyword, LexerError, Scanner, Token, TokenKind};
pub use parser::{
    BinaryOp, Command, ErrorKind, Expression, Factor, GotoTarget, LabeledCommand, Parser,
    ParserError, Program, RelationalOp, TokenCursor, MAX_NESTING_DEPTH,
};
