mod token;

pub use token::{Position, Token, TokenKind};

use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("malformed numeric literal '{0}'")]
    BadNumber(String),
}

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;
    HashMap::from([
        ("let", Let),
        ("fn", Fn),
        ("if", If),
        ("else", Else),
        ("for", For),
        ("return", Return),
        ("struct", Struct),
        ("switch", Switch),
        ("case", Case),
        ("break", Break),
        ("continue", Continue),
        ("true", Bool(true)),
        ("false", Bool(false)),
    ])
});

/// Hand-written scanner with one-token lookahead. Mirrors the reference
/// implementation's `_get_token` loop: skip whitespace/comments, pin the
/// start position, then dispatch on the current character.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    filename: String,
    data: &'a str,
    bytes: &'a [u8],
    position: Position,
    last_position: Position,
    last_token: Option<Token>,
    peeked: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(filename: impl Into<String>, data: &'a str) -> Self {
        Lexer {
            filename: filename.into(),
            data,
            bytes: data.as_bytes(),
            position: Position::start(),
            last_position: Position::start(),
            last_token: None,
            peeked: None,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn source(&self) -> &'a str {
        self.data
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn last_position(&self) -> Position {
        self.last_position
    }

    pub fn last_token(&self) -> Option<&Token> {
        self.last_token.as_ref()
    }

    pub fn set_position(&mut self, pos: Position) {
        self.position = pos;
        self.last_position = pos;
        self.peeked = None;
    }

    /// The full text of the source line containing `pos`.
    pub fn line_text(&self, pos: Position) -> &'a str {
        let start = pos.line_start;
        let end = self.bytes[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|i| start + i)
            .unwrap_or(self.data.len());
        &self.data[start..end]
    }

    fn is_end(&self) -> bool {
        self.position.cursor >= self.bytes.len()
    }

    fn curr(&self) -> u8 {
        if self.is_end() {
            0
        } else {
            self.bytes[self.position.cursor]
        }
    }

    fn peek_byte(&self) -> u8 {
        let next = self.position.cursor + 1;
        if next >= self.bytes.len() {
            0
        } else {
            self.bytes[next]
        }
    }

    fn forward(&mut self) {
        if !self.is_end() {
            self.position.cursor += 1;
            if !self.is_end() && self.curr() == b'\n' {
                self.position.row += 1;
                self.position.line_start = self.position.cursor + 1;
            }
        }
    }

    fn trim(&mut self) {
        loop {
            while !self.is_end() && (self.curr() as char).is_whitespace() {
                self.forward();
            }
            if !self.is_end() && self.curr() == b'#' {
                while !self.is_end() && self.curr() != b'\n' {
                    self.forward();
                }
                continue;
            }
            break;
        }
    }

    pub fn next_token(&mut self) -> Token {
        if let Some(tok) = self.peeked.take() {
            self.last_token = Some(tok.clone());
            return tok;
        }
        let tok = self.scan();
        self.last_token = Some(tok.clone());
        tok
    }

    pub fn peek_token(&mut self) -> Token {
        if self.peeked.is_none() {
            let saved_last = self.last_token.clone();
            let tok = self.scan();
            self.last_token = saved_last;
            self.peeked = Some(tok);
        }
        self.peeked.clone().unwrap()
    }

    fn scan(&mut self) -> Token {
        self.trim();
        self.last_position = self.position;

        if self.is_end() {
            return Token::new(TokenKind::Eof, self.last_position);
        }

        let c = self.curr() as char;

        if c.is_alphabetic() || c == '_' {
            return self.scan_identifier();
        }
        if c.is_ascii_digit() {
            return self.scan_number();
        }
        if c == '\'' || c == '"' {
            return self.scan_string(c);
        }
        self.scan_operator()
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.position.cursor;
        while !self.is_end() {
            let c = self.curr() as char;
            if c.is_alphanumeric() || c == '_' {
                self.forward();
            } else {
                break;
            }
        }
        let text = &self.data[start..self.position.cursor];
        log::trace!("lexer: identifier '{text}' at {}", self.last_position);
        let kind = KEYWORDS.get(text).cloned().unwrap_or_else(|| TokenKind::Identifier(text.to_string()));
        Token::new(kind, self.last_position)
    }

    fn scan_number(&mut self) -> Token {
        let start = self.position.cursor;
        let mut is_float = false;
        while !self.is_end() {
            let c = self.curr() as char;
            if c.is_ascii_digit() {
                self.forward();
            } else if c == '.' && !is_float {
                is_float = true;
                self.forward();
            } else {
                break;
            }
        }
        let text = &self.data[start..self.position.cursor];
        if is_float {
            match text.parse::<f64>() {
                Ok(v) => Token::new(TokenKind::Float(v), self.last_position),
                Err(_) => Token::new(
                    TokenKind::Error(LexError::BadNumber(text.to_string()).to_string()),
                    self.last_position,
                ),
            }
        } else {
            match text.parse::<i64>() {
                Ok(v) => Token::new(TokenKind::Int(v), self.last_position),
                Err(_) => Token::new(
                    TokenKind::Error(LexError::BadNumber(text.to_string()).to_string()),
                    self.last_position,
                ),
            }
        }
    }

    fn scan_string(&mut self, quote: char) -> Token {
        let q = quote as u8;
        self.forward();
        let mut value = String::new();
        while !self.is_end() && self.curr() != q {
            if self.curr() == b'\\' && (self.peek_byte() == q || self.peek_byte() == b'\\') {
                self.forward();
            }
            value.push(self.curr() as char);
            self.forward();
        }
        if self.is_end() || self.curr() != q {
            return Token::new(
                TokenKind::Error(LexError::UnterminatedString.to_string()),
                self.last_position,
            );
        }
        self.forward();
        Token::new(TokenKind::Str(value), self.last_position)
    }

    fn scan_operator(&mut self) -> Token {
        use TokenKind::*;
        let c = self.curr() as char;
        self.forward();
        let next = self.curr() as char;

        macro_rules! combine {
            ($two:expr, $one:expr) => {{
                if next == '=' {
                    self.forward();
                    $two
                } else {
                    $one
                }
            }};
        }

        let kind = match c {
            '(' => LParen,
            ')' => RParen,
            '{' => LBrace,
            '}' => RBrace,
            '[' => LBracket,
            ']' => RBracket,
            ',' => Comma,
            ';' => Semicolon,
            ':' => Colon,
            '.' => Dot,
            '^' => Caret,
            '%' => Percent,
            '~' => Tilde,
            '=' => combine!(Eq, Assign),
            '!' => combine!(NotEq, Bang),
            '>' => combine!(GtEq, Gt),
            '<' => combine!(LtEq, Lt),
            '+' => combine!(PlusAssign, Plus),
            '-' => combine!(MinusAssign, Minus),
            '*' => combine!(StarAssign, Star),
            '/' => combine!(SlashAssign, Slash),
            '&' => {
                if next == '&' {
                    self.forward();
                    And
                } else {
                    Amp
                }
            }
            '|' => {
                if next == '|' {
                    self.forward();
                    Or
                } else {
                    Pipe
                }
            }
            other => Error(LexError::UnexpectedChar(other).to_string()),
        };
        Token::new(kind, self.last_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new("test.eta", src);
        let mut out = vec![];
        loop {
            let tok = lexer.next_token();
            let eof = tok.is_eof();
            out.push(tok.kind);
            if eof {
                break;
            }
        }
        out
    }

    #[test]
    fn lexes_let_binding() {
        assert_eq!(
            kinds("let x = 42;"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier("x".into()),
                TokenKind::Assign,
                TokenKind::Int(42),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_float() {
        assert_eq!(
            kinds("3.14"),
            vec![TokenKind::Float(3.14), TokenKind::Eof]
        );
    }

    #[test]
    fn lexes_two_char_operators() {
        assert_eq!(
            kinds("== != <= >= += -= *= /= && ||"),
            vec![
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::PlusAssign,
                TokenKind::MinusAssign,
                TokenKind::StarAssign,
                TokenKind::SlashAssign,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn skips_comments() {
        assert_eq!(
            kinds("# this is a comment\nlet x = 1;"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier("x".into()),
                TokenKind::Assign,
                TokenKind::Int(1),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn decodes_string_escapes() {
        assert_eq!(
            kinds(r#""he said \"hi\"""#),
            vec![TokenKind::Str("he said \"hi\"".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn reports_unterminated_string() {
        let kinds = kinds("\"abc");
        assert!(matches!(kinds[0], TokenKind::Error(_)));
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = Lexer::new("test.eta", "let x");
        let peeked = lexer.peek_token();
        assert_eq!(peeked.kind, TokenKind::Let);
        let next = lexer.next_token();
        assert_eq!(next.kind, TokenKind::Let);
    }

    #[test]
    fn keywords_true_false_are_bool_tokens() {
        assert_eq!(
            kinds("true false"),
            vec![TokenKind::Bool(true), TokenKind::Bool(false), TokenKind::Eof]
        );
    }

    #[test]
    fn reserved_keywords_still_lex() {
        assert_eq!(
            kinds("struct switch case break continue"),
            vec![
                TokenKind::Struct,
                TokenKind::Switch,
                TokenKind::Case,
                TokenKind::Break,
                TokenKind::Continue,
                TokenKind::Eof,
            ]
        );
    }
}
