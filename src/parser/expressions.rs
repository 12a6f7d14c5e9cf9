use crate::labels::LabelRegistry;
use crate::lexer::{Keyword, Token, TokenKind};
use crate::parser::{BinaryOp, Expression, Factor, ParserError, RelationalOp, TokenCursor};

/// Deepest allowed nesting of parenthesized factors and IF commands, counted
/// together. Deeper input is rejected instead of exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Recursive-descent parser.
///
/// Holds everything one parse needs: the token cursor, the labels seen so
/// far and the current nesting depth. Build a new `Parser` for every source
/// text.
pub struct Parser {
    cursor: TokenCursor,
    labels: LabelRegistry,
    depth: usize,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            labels: LabelRegistry::new(),
            depth: 0,
        }
    }

    /// Labels defined by the parse so far
    #[must_use]
    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    pub(crate) fn labels_mut(&mut self) -> &mut LabelRegistry {
        &mut self.labels
    }

    /// Index of the next unconsumed token
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    #[must_use]
    pub fn token_count(&self) -> usize {
        self.cursor.len()
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.cursor.peek()
    }

    pub(crate) fn peek_kind(&self) -> Option<&TokenKind> {
        self.cursor.peek().map(|token| &token.kind)
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.cursor.peek_ahead(n)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    pub(crate) fn current_offset(&self) -> usize {
        self.cursor.current_offset()
    }

    /// Consume the current token and return a copy of it
    pub(crate) fn advance(&mut self) -> Option<Token> {
        self.cursor.advance().cloned()
    }

    /// Check if current token matches a kind, ignoring any payload
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        match self.peek_kind() {
            Some(current) => std::mem::discriminant(current) == std::mem::discriminant(kind),
            None => false,
        }
    }

    /// Consume the current token if it matches `kind`
    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Build a syntax error at the current token
    pub(crate) fn error_expected(&self, expected: &str) -> ParserError {
        let found = match self.peek() {
            Some(Token {
                kind: TokenKind::Keyword(keyword),
                ..
            }) => format!("'{keyword}'"),
            Some(token) => format!("'{}'", token.lexeme),
            None => "end of input".to_string(),
        };
        ParserError::ExpectedToken {
            expected: expected.to_string(),
            found,
            offset: self.current_offset(),
            index: self.position(),
        }
    }

    /// Expect a specific token kind and consume it
    pub(crate) fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Token, ParserError> {
        match self.advance_if(|current| {
            std::mem::discriminant(current) == std::mem::discriminant(kind)
        }) {
            Some(token) => Ok(token),
            None => Err(self.error_expected(expected)),
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, ParserError> {
        match self.advance_if(|current| matches!(current, TokenKind::Keyword(k) if *k == keyword)) {
            Some(token) => Ok(token),
            None => Err(self.error_expected(&format!("'{keyword}'"))),
        }
    }

    pub(crate) fn expect_identifier(&mut self, expected: &str) -> Result<String, ParserError> {
        match self.peek_kind() {
            Some(TokenKind::Identifier(name)) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error_expected(expected)),
        }
    }

    /// Enter one nesting level at the current token.
    ///
    /// # Errors
    /// Fails once the depth would pass `MAX_NESTING_DEPTH`.
    pub(crate) fn enter_nesting(&mut self) -> Result<(), ParserError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParserError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                offset: self.current_offset(),
                index: self.position(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn advance_if<F>(&mut self, predicate: F) -> Option<Token>
    where
        F: Fn(&TokenKind) -> bool,
    {
        if self.peek_kind().is_some_and(predicate) {
            self.advance()
        } else {
            None
        }
    }

    /// Parse an expression: `Factor (op Factor)*`, evaluated left to right
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        let offset = self.current_offset();
        let first = self.parse_factor()?;

        let mut rest = Vec::new();
        while let Some(op) = self.match_binary_op() {
            let factor = self.parse_factor()?;
            rest.push((op, factor));
        }

        Ok(Expression::new(first, rest, offset))
    }

    fn match_binary_op(&mut self) -> Option<BinaryOp> {
        let op = match self.peek_kind()? {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Asterisk => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    /// Parse a factor: identifier, number or parenthesized expression
    fn parse_factor(&mut self) -> Result<Factor, ParserError> {
        match self.peek_kind() {
            Some(TokenKind::Identifier(name)) => {
                let factor = Factor::Identifier(name.clone());
                self.advance();
                Ok(factor)
            }
            Some(TokenKind::Number(digits)) => {
                let factor = Factor::Number(digits.clone());
                self.advance();
                Ok(factor)
            }
            Some(TokenKind::OpenParen) => {
                self.enter_nesting()?;
                self.advance(); // consume '('
                let inner = self.parse_expression();
                self.exit_nesting();

                let inner = inner?;
                self.expect(&TokenKind::CloseParen, "')'")?;
                Ok(Factor::Paren(Box::new(inner)))
            }
            _ => Err(self.error_expected("identifier, number or '('")),
        }
    }

    /// Parse one or more comma-separated expressions
    pub(crate) fn parse_expression_list(&mut self) -> Result<Vec<Expression>, ParserError> {
        let mut exprs = vec![self.parse_expression()?];

        while self.match_token(&TokenKind::Comma) {
            exprs.push(self.parse_expression()?);
        }

        Ok(exprs)
    }

    /// Parse a relational operator (=, >, >=, <, <=)
    pub(crate) fn parse_relational_op(&mut self) -> Result<RelationalOp, ParserError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Equal) => RelationalOp::Equal,
            Some(TokenKind::Greater) => RelationalOp::Greater,
            Some(TokenKind::GreaterEqual) => RelationalOp::GreaterEqual,
            Some(TokenKind::Less) => RelationalOp::Less,
            Some(TokenKind::LessEqual) => RelationalOp::LessEqual,
            _ => return Err(self.error_expected("relational operator ('=', '>', '>=', '<', '<=')")),
        };
        self.advance();
        Ok(op)
    }
}
