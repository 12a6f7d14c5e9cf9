use std::fmt;

/// Arithmetic operators
///
/// All four share one precedence level and chain left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        };
        write!(f, "{}", s)
    }
}

/// Relational operators allowed in an `IF` condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOp {
    Equal,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl fmt::Display for RelationalOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            RelationalOp::Equal => "=",
            RelationalOp::Greater => ">",
            RelationalOp::GreaterEqual => ">=",
            RelationalOp::Less => "<",
            RelationalOp::LessEqual => "<=",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Factor {
    Identifier(String),
    /// Digits as written in the source
    Number(String),
    Paren(Box<Expression>),
}

/// A flat operator chain: `first (op factor)*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub first: Factor,
    pub rest: Vec<(BinaryOp, Factor)>,
    pub offset: usize,
}

impl Expression {
    pub fn new(first: Factor, rest: Vec<(BinaryOp, Factor)>, offset: usize) -> Self {
        Self { first, rest, offset }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Factor::Identifier(name) => write!(f, "{}", name),
            Factor::Number(digits) => write!(f, "{}", digits),
            Factor::Paren(expr) => write!(f, "({})", expr),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.first)?;
        for (op, factor) in &self.rest {
            write!(f, " {} {}", op, factor)?;
        }
        Ok(())
    }
}

/// Target of a `GO TO`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GotoTarget {
    /// `GO TO L`
    Label(String),
    /// `GO TO n OF L1, ..., Lk`, with `1 <= index <= labels.len()`
    Computed { index: u64, labels: Vec<String> },
}

/// Command variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing between two separators, or before `ELSE`/`END`
    Empty,
    Let {
        target: String,
        value: Expression,
    },
    Goto(GotoTarget),
    Read(Vec<String>),
    Print(Vec<Expression>),
    If {
        left: Expression,
        op: RelationalOp,
        right: Expression,
        then_branch: Box<LabeledCommand>,
        else_branch: Box<LabeledCommand>,
    },
}

/// A command with its optional `label:` prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledCommand {
    pub label: Option<String>,
    pub command: Command,
    pub offset: usize,
}

impl LabeledCommand {
    pub fn new(label: Option<String>, command: Command, offset: usize) -> Self {
        Self {
            label,
            command,
            offset,
        }
    }
}

/// Complete program: the command sequence before `END`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub commands: Vec<LabeledCommand>,
}
