use std::fmt;

/// Language keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    End,
    Let,
    Go,
    To,
    Of,
    Read,
    Print,
    If,
    Then,
    Else,
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Keyword::End => "END",
            Keyword::Let => "LET",
            Keyword::Go => "GO",
            Keyword::To => "TO",
            Keyword::Of => "OF",
            Keyword::Read => "READ",
            Keyword::Print => "PRINT",
            Keyword::If => "IF",
            Keyword::Then => "THEN",
            Keyword::Else => "ELSE",
        };
        write!(f, "{}", s)
    }
}

impl Keyword {
    /// Look up a keyword by spelling. Matching ignores case, including
    /// non-ASCII letters that upper-case into a keyword.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "END" => Some(Keyword::End),
            "LET" => Some(Keyword::Let),
            "GO" => Some(Keyword::Go),
            "TO" => Some(Keyword::To),
            "OF" => Some(Keyword::Of),
            "READ" => Some(Keyword::Read),
            "PRINT" => Some(Keyword::Print),
            "IF" => Some(Keyword::If),
            "THEN" => Some(Keyword::Then),
            "ELSE" => Some(Keyword::Else),
            _ => None,
        }
    }
}

/// Coarse token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Keyword,
    Identifier,
    Number,
    Operator,
    Punctuation,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Category::Keyword => "keyword",
            Category::Identifier => "identifier",
            Category::Number => "number",
            Category::Operator => "operator",
            Category::Punctuation => "punctuation",
        };
        write!(f, "{}", s)
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Punctuation
    OpenParen,          // (
    CloseParen,         // )
    Semicolon,          // ;
    Colon,              // :
    Comma,              // ,

    // Arithmetic operators
    Plus,               // +
    Minus,              // -
    Asterisk,           // *
    Slash,              // /

    // Relational operators
    Equal,              // =
    Less,               // <
    Greater,            // >
    LessEqual,          // <=
    GreaterEqual,       // >=

    Assign,             // :=

    // Digits are kept as written; range checks happen where the value is used.
    Number(String),
    Identifier(String),
    Keyword(Keyword),
}

impl TokenKind {
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            TokenKind::OpenParen
            | TokenKind::CloseParen
            | TokenKind::Semicolon
            | TokenKind::Colon
            | TokenKind::Comma => Category::Punctuation,
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Equal
            | TokenKind::Less
            | TokenKind::Greater
            | TokenKind::LessEqual
            | TokenKind::GreaterEqual
            | TokenKind::Assign => Category::Operator,
            TokenKind::Number(_) => Category::Number,
            TokenKind::Identifier(_) => Category::Identifier,
            TokenKind::Keyword(_) => Category::Keyword,
        }
    }
}

/// A token with its character offset in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: String, offset: usize) -> Self {
        Self { kind, lexeme, offset }
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Offset one past the last character of the lexeme
    #[must_use]
    pub fn end_offset(&self) -> usize {
        self.offset + self.lexeme.chars().count()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::OpenParen => write!(f, "("),
            TokenKind::CloseParen => write!(f, ")"),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Asterisk => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Equal => write!(f, "="),
            TokenKind::Less => write!(f, "<"),
            TokenKind::Greater => write!(f, ">"),
            TokenKind::LessEqual => write!(f, "<="),
            TokenKind::GreaterEqual => write!(f, ">="),
            TokenKind::Assign => write!(f, ":="),
            TokenKind::Number(digits) => write!(f, "{}", digits),
            TokenKind::Identifier(s) => write!(f, "{}", s),
            TokenKind::Keyword(kw) => write!(f, "{}", kw),
        }
    }
}
