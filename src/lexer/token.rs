use std::fmt;

/// A point in the source buffer. `cursor` is a byte offset; `row` is 0-based;
/// `line_start` is the cursor value where the current line began, so that
/// `cursor - line_start` gives the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub cursor: usize,
    pub row: usize,
    pub line_start: usize,
}

impl Position {
    pub fn start() -> Self {
        Position {
            cursor: 0,
            row: 0,
            line_start: 0,
        }
    }

    pub fn column(&self) -> usize {
        self.cursor - self.line_start
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.column() + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),

    Let,
    Fn,
    If,
    Else,
    For,
    Return,

    // reserved, no grammar attached (SPEC_FULL §4.1)
    Struct,
    Switch,
    Case,
    Break,
    Continue,

    Plus,
    Minus,
    Slash,
    Star,
    Percent,
    Caret,
    Tilde,
    Bang,

    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,

    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    And,
    Or,
    Amp,
    Pipe,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,

    Eof,
    Error(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        match self {
            Identifier(s) => write!(f, "identifier `{s}`"),
            Int(n) => write!(f, "integer `{n}`"),
            Float(n) => write!(f, "float `{n}`"),
            Str(s) => write!(f, "string {s:?}"),
            Bool(b) => write!(f, "bool `{b}`"),
            Eof => write!(f, "end of input"),
            Error(msg) => write!(f, "{msg}"),
            other => write!(f, "`{other:?}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Token { kind, position }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
