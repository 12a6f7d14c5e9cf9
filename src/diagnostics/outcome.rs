use std::fmt;

use tracing::debug;

use crate::lexer::tokenize;
use crate::parser::{ErrorKind, Parser, ParserError, Program};

/// The first error of a rejected program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
    /// Character offset into the source
    pub offset: usize,
    /// Index of the offending token; `None` for lexical errors
    pub token_index: Option<usize>,
}

impl From<&ParserError> for Failure {
    fn from(err: &ParserError) -> Self {
        Self {
            kind: err.kind(),
            message: err.message(),
            offset: err.offset(),
            token_index: err.token_index(),
        }
    }
}

impl From<ParserError> for Failure {
    fn from(err: ParserError) -> Self {
        Self::from(&err)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.token_index {
            Some(index) => write!(
                f,
                "{} at offset {} (token {}): {}",
                self.kind, self.offset, index, self.message
            ),
            None => write!(f, "{} at offset {}: {}", self.kind, self.offset, self.message),
        }
    }
}

/// Result of checking one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Success(Program),
    Failure(Failure),
}

impl ParseOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success(_))
    }

    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ParseOutcome::Success(_) => None,
            ParseOutcome::Failure(failure) => Some(failure),
        }
    }

    #[must_use]
    pub fn program(&self) -> Option<&Program> {
        match self {
            ParseOutcome::Success(program) => Some(program),
            ParseOutcome::Failure(_) => None,
        }
    }

    /// One-line, human-readable summary
    #[must_use]
    pub fn report(&self) -> String {
        match self {
            ParseOutcome::Success(_) => "ok".to_string(),
            ParseOutcome::Failure(failure) => failure.to_string(),
        }
    }
}

impl From<Result<Program, ParserError>> for ParseOutcome {
    fn from(result: Result<Program, ParserError>) -> Self {
        match result {
            Ok(program) => ParseOutcome::Success(program),
            Err(err) => ParseOutcome::Failure(err.into()),
        }
    }
}

/// Tokenize and parse `source` with a fresh parser.
///
/// # Errors
/// The first lexical, syntax or semantic error.
pub fn parse_source(source: &str) -> Result<Program, ParserError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

/// Check a source text and report the outcome.
///
/// Every call starts from a clean parser, so checking the same text twice
/// gives the same outcome.
#[must_use]
pub fn check(source: &str) -> ParseOutcome {
    let outcome = ParseOutcome::from(parse_source(source));
    if let ParseOutcome::Failure(failure) = &outcome {
        debug!(kind = ?failure.kind, offset = failure.offset, "program rejected");
    }
    outcome
}
