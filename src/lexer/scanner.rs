use crate::lexer::{Keyword, LexerError, Token, TokenKind};
use tracing::trace;

/// Character-level scanner.
///
/// Works over a `Vec<char>` so that every offset it reports is a character
/// offset, independent of the UTF-8 width of earlier input.
pub struct Scanner {
    input: Vec<char>,
    current: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            current: 0,
            tokens: Vec::new(),
        }
    }

    /// Scan the whole input.
    ///
    /// # Errors
    /// Stops at the first character that starts no token. Tokens scanned
    /// before it are discarded.
    pub fn scan_all(mut self) -> Result<Vec<Token>, LexerError> {
        loop {
            self.skip_whitespace();
            let start = self.current;
            let Some(ch) = self.advance() else {
                break;
            };

            let token = self.scan_token(ch, start)?;
            trace!(offset = token.offset, kind = ?token.kind, "scanned token");
            self.tokens.push(token);
        }

        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.current).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += 1;
        Some(ch)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    fn lexeme_from(&self, start: usize) -> String {
        self.input[start..self.current].iter().collect()
    }

    fn scan_token(&mut self, ch: char, start: usize) -> Result<Token, LexerError> {
        let kind = match ch {
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Equal,

            // Two-character operators win over their one-character prefixes
            ':' => {
                if self.match_char('=') {
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                }
            }
            '<' => {
                if self.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }

            ch if ch.is_ascii_digit() => return Ok(self.scan_number(start)),

            ch if ch.is_alphabetic() => return Ok(self.scan_identifier_or_keyword(start)),

            _ => return Err(LexerError::UnexpectedChar(ch, start)),
        };

        Ok(Token::new(kind, self.lexeme_from(start), start))
    }

    fn scan_number(&mut self, start: usize) -> Token {
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.advance();
        }

        let digits = self.lexeme_from(start);
        Token::new(TokenKind::Number(digits.clone()), digits, start)
    }

    fn scan_identifier_or_keyword(&mut self, start: usize) -> Token {
        while matches!(self.peek(), Some(ch) if ch.is_alphanumeric()) {
            self.advance();
        }

        let text = self.lexeme_from(start);

        if let Some(keyword) = Keyword::from_str(&text) {
            return Token::new(TokenKind::Keyword(keyword), text, start);
        }

        Token::new(TokenKind::Identifier(text.clone()), text, start)
    }
}

/// Tokenize a complete source text.
///
/// # Errors
/// Returns the first unexpected character; no partial token list is produced.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexerError> {
    Scanner::new(input).scan_all()
}
