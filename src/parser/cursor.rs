use crate::lexer::Token;

/// Read-only view over a token sequence with one forward-moving position.
///
/// The position never decreases and never passes the end of the sequence.
#[derive(Debug)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    #[must_use]
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Consume the current token
    pub fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Character offset of the current token, or of the end of input
    #[must_use]
    pub fn current_offset(&self) -> usize {
        match self.peek() {
            Some(token) => token.offset,
            None => self.tokens.last().map_or(0, Token::end_offset),
        }
    }
}
