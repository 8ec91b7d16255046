//! Pratt (precedence-climbing) parser. Pulls tokens lazily from a [`Lexer`]
//! with one token of lookahead (`cur`/`peek`) and dispatches prefix/infix
//! parselets via a `match` on the token kind rather than a table of boxed
//! closures, per SPEC_FULL §4.2.

use crate::ast::{Block, Expression, InfixOp, PrefixOp, Program, Statement};
use crate::diagnostics;
use crate::lexer::{Lexer, Position, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Assignment,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

fn precedence_of(kind: &TokenKind) -> Precedence {
    use TokenKind::*;
    match kind {
        Assign | PlusAssign | MinusAssign | StarAssign | SlashAssign => Precedence::Assignment,
        Eq | NotEq => Precedence::Equals,
        Lt | LtEq | Gt | GtEq => Precedence::LessGreater,
        Plus | Minus => Precedence::Sum,
        Star | Slash => Precedence::Product,
        LParen => Precedence::Call,
        LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

fn infix_op_of(kind: &TokenKind) -> InfixOp {
    match kind {
        TokenKind::Plus => InfixOp::Add,
        TokenKind::Minus => InfixOp::Sub,
        TokenKind::Star => InfixOp::Mul,
        TokenKind::Slash => InfixOp::Div,
        TokenKind::Lt => InfixOp::Lt,
        TokenKind::LtEq => InfixOp::LtEq,
        TokenKind::Gt => InfixOp::Gt,
        TokenKind::GtEq => InfixOp::GtEq,
        TokenKind::Eq => InfixOp::Eq,
        TokenKind::NotEq => InfixOp::NotEq,
        other => unreachable!("{other:?} has no infix operator mapping"),
    }
}

fn opassign_op_of(kind: &TokenKind) -> InfixOp {
    match kind {
        TokenKind::PlusAssign => InfixOp::Add,
        TokenKind::MinusAssign => InfixOp::Sub,
        TokenKind::StarAssign => InfixOp::Mul,
        TokenKind::SlashAssign => InfixOp::Div,
        other => unreachable!("{other:?} is not a compound-assignment operator"),
    }
}

/// Consumes a [`Lexer`] and produces a [`Program`], accumulating diagnostics
/// rather than stopping at the first syntax error.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    peek: Token,
    errors: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Parser {
            lexer,
            cur,
            peek,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn parse(&mut self) -> Program {
        log::debug!("parser: starting parse");
        let mut statements = Vec::new();
        while !self.cur.is_eof() {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.advance();
        }
        log::debug!("parser: parsed {} top-level statement(s)", statements.len());
        Program { statements }
    }

    fn advance(&mut self) {
        std::mem::swap(&mut self.cur, &mut self.peek);
        self.peek = self.lexer.next_token();
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(&self.peek.kind)
    }

    fn cur_precedence(&self) -> Precedence {
        precedence_of(&self.cur.kind)
    }

    fn push_error(&mut self, pos: Position, message: impl Into<String>) {
        let message = message.into();
        log::warn!("parser: {message} at {pos}");
        let line = self.lexer.line_text(pos).to_string();
        self.errors
            .push(diagnostics::render_banner(self.lexer.filename(), pos, pos, &line, &message));
    }

    /// Advances past `self.peek` if it satisfies `pred`; otherwise records
    /// `message` at the peek token's position and leaves the cursor in place.
    fn expect_peek(&mut self, pred: impl Fn(&TokenKind) -> bool, message: &str) -> bool {
        if pred(&self.peek.kind) {
            self.advance();
            true
        } else {
            let pos = self.peek.position;
            self.push_error(pos, message);
            false
        }
    }

    // ---- statements -----------------------------------------------------

    fn parse_statement(&mut self) -> Option<Statement> {
        match &self.cur.kind {
            TokenKind::Semicolon => None,
            TokenKind::Error(msg) => {
                let msg = msg.clone();
                let pos = self.cur.position;
                self.push_error(pos, msg);
                None
            }
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::LBrace => Some(Statement::Block(self.parse_block())),
            _ => self.parse_expression_statement(),
        }
    }

    /// Assumes `self.cur.kind == TokenKind::Let`. Shared between top-level
    /// `let` statements and a `for` loop's init clause.
    fn parse_let_statement(&mut self) -> Option<Statement> {
        let position = self.cur.position;
        if !self.expect_peek(|k| matches!(k, TokenKind::Identifier(_)), "expected an identifier") {
            return None;
        }
        let name = match &self.cur.kind {
            TokenKind::Identifier(name) => name.clone(),
            _ => unreachable!(),
        };
        if !self.expect_peek(
            |k| matches!(k, TokenKind::Assign),
            "a variable must be initialized with a value",
        ) {
            return None;
        }
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        if matches!(self.peek.kind, TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Let { name, value, position })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let position = self.cur.position;
        if matches!(self.peek.kind, TokenKind::Semicolon) {
            self.advance();
            return Some(Statement::Return { value: None, position });
        }
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        if matches!(self.peek.kind, TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Return {
            value: Some(value),
            position,
        })
    }

    /// Assumes `self.cur.kind == TokenKind::LBrace`.
    fn parse_block(&mut self) -> Block {
        let position = self.cur.position;
        self.advance();
        let mut statements = Vec::new();
        while !matches!(self.cur.kind, TokenKind::RBrace | TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.advance();
        }
        Block { statements, position }
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        if matches!(self.peek.kind, TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Expression(expr))
    }

    // ---- expressions ------------------------------------------------------

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;
        while !matches!(self.peek.kind, TokenKind::Semicolon) && precedence < self.peek_precedence() {
            self.advance();
            left = self.parse_infix(left)?;
        }
        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        match self.cur.kind.clone() {
            TokenKind::Identifier(name) => Some(Expression::Identifier { name, position }),
            TokenKind::Int(value) => Some(Expression::IntegerLit { value, position }),
            TokenKind::Float(value) => Some(Expression::FloatLit { value, position }),
            TokenKind::Bool(value) => Some(Expression::BoolLit { value, position }),
            TokenKind::Str(value) => Some(Expression::StringLit { value, position }),
            TokenKind::Bang => self.parse_prefix_expression(PrefixOp::Not),
            TokenKind::Minus => self.parse_prefix_expression(PrefixOp::Neg),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::For => self.parse_for_expression(),
            TokenKind::Fn => self.parse_function_literal(),
            other => {
                self.push_error(position, format!("no prefix parse function for {other}"));
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        match self.cur.kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq => self.parse_infix_expression(left),
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_index_expression(left),
            TokenKind::Assign => self.parse_assign_expression(left),
            TokenKind::PlusAssign | TokenKind::MinusAssign | TokenKind::StarAssign | TokenKind::SlashAssign => {
                self.parse_opassign_expression(left)
            }
            ref other => unreachable!("{other:?} has no infix parselet"),
        }
    }

    fn parse_prefix_expression(&mut self, op: PrefixOp) -> Option<Expression> {
        let position = self.cur.position;
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix {
            op,
            right: Box::new(right),
            position,
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let position = self.cur.position;
        let op = infix_op_of(&self.cur.kind);
        let precedence = self.cur_precedence();
        self.advance();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix {
            op,
            left: Box::new(left),
            right: Box::new(right),
            position,
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(|k| matches!(k, TokenKind::RParen), "expected ')'") {
            return None;
        }
        Some(expr)
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        let elements = self.parse_expression_list(|k| matches!(k, TokenKind::RBracket))?;
        Some(Expression::ArrayLit { elements, position })
    }

    /// Assumes `self.cur` is the opening delimiter (`(` or `[`). Consumes up
    /// to and including the token satisfying `is_end`.
    fn parse_expression_list(&mut self, is_end: impl Fn(&TokenKind) -> bool) -> Option<Vec<Expression>> {
        let mut args = Vec::new();
        if is_end(&self.peek.kind) {
            self.advance();
            return Some(args);
        }
        self.advance();
        loop {
            args.push(self.parse_expression(Precedence::Lowest)?);
            self.advance();
            if is_end(&self.cur.kind) {
                break;
            }
            if !matches!(self.cur.kind, TokenKind::Comma) {
                let pos = self.cur.position;
                self.push_error(pos, "expected ','");
                return None;
            }
            self.advance();
        }
        Some(args)
    }

    fn parse_call_expression(&mut self, callee: Expression) -> Option<Expression> {
        let position = self.cur.position;
        let args = self.parse_expression_list(|k| matches!(k, TokenKind::RParen))?;
        Some(Expression::Call {
            callee: Box::new(callee),
            args,
            position,
        })
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let position = self.cur.position;
        self.advance();
        let index = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(|k| matches!(k, TokenKind::RBracket), "expected ']'") {
            return None;
        }
        Some(Expression::Index {
            left: Box::new(left),
            index: Box::new(index),
            position,
        })
    }

    fn parse_assign_expression(&mut self, target: Expression) -> Option<Expression> {
        let position = self.cur.position;
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        Some(Expression::Assign {
            target: Box::new(target),
            value: Box::new(value),
            position,
        })
    }

    fn parse_opassign_expression(&mut self, target: Expression) -> Option<Expression> {
        let position = self.cur.position;
        let op = opassign_op_of(&self.cur.kind);
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        Some(Expression::OpAssign {
            op,
            target: Box::new(target),
            value: Box::new(value),
            position,
        })
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        if !self.expect_peek(|k| matches!(k, TokenKind::LParen), "expected '('") {
            return None;
        }
        self.advance();
        let cond = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(|k| matches!(k, TokenKind::RParen), "expected ')'") {
            return None;
        }
        if !self.expect_peek(|k| matches!(k, TokenKind::LBrace), "expected '{'") {
            return None;
        }
        let then_branch = self.parse_block();

        let else_branch = if matches!(self.peek.kind, TokenKind::Else) {
            self.advance();
            if !self.expect_peek(|k| matches!(k, TokenKind::LBrace), "expected '{'") {
                return None;
            }
            Some(self.parse_block())
        } else {
            None
        };

        Some(Expression::If {
            cond: Box::new(cond),
            then_branch,
            else_branch,
            position,
        })
    }

    fn parse_for_expression(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        if !self.expect_peek(|k| matches!(k, TokenKind::LParen), "expected '('") {
            return None;
        }

        let init = if matches!(self.peek.kind, TokenKind::Semicolon) {
            self.advance();
            None
        } else {
            self.advance();
            Some(Box::new(self.parse_let_statement()?))
        };
        if !matches!(self.cur.kind, TokenKind::Semicolon) {
            let pos = self.cur.position;
            self.push_error(pos, "expected ';'");
            return None;
        }

        let cond = if matches!(self.peek.kind, TokenKind::Semicolon) {
            self.advance();
            None
        } else {
            self.advance();
            let expr = self.parse_expression(Precedence::Lowest)?;
            if !self.expect_peek(|k| matches!(k, TokenKind::Semicolon), "expected ';'") {
                return None;
            }
            Some(Box::new(expr))
        };

        let update = if matches!(self.peek.kind, TokenKind::RParen) {
            None
        } else {
            self.advance();
            Some(Box::new(self.parse_expression(Precedence::Lowest)?))
        };

        if !self.expect_peek(|k| matches!(k, TokenKind::RParen), "expected ')'") {
            return None;
        }
        if !self.expect_peek(|k| matches!(k, TokenKind::LBrace), "expected '{'") {
            return None;
        }
        let body = self.parse_block();

        Some(Expression::For {
            init,
            cond,
            update,
            body,
            position,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        if !self.expect_peek(|k| matches!(k, TokenKind::LParen), "expected '('") {
            return None;
        }
        let params = self.parse_function_params()?;
        if !self.expect_peek(|k| matches!(k, TokenKind::LBrace), "expected '{'") {
            return None;
        }
        let body = self.parse_block();
        Some(Expression::FunctionLit { params, body, position })
    }

    /// Assumes `self.cur.kind == TokenKind::LParen`.
    fn parse_function_params(&mut self) -> Option<Vec<String>> {
        let mut params = Vec::new();
        if matches!(self.peek.kind, TokenKind::RParen) {
            self.advance();
            return Some(params);
        }
        self.advance();
        loop {
            match &self.cur.kind {
                TokenKind::Identifier(name) => params.push(name.clone()),
                _ => {
                    let pos = self.cur.position;
                    self.push_error(pos, "expected an identifier");
                    return None;
                }
            }
            self.advance();
            match self.cur.kind {
                TokenKind::RParen => break,
                TokenKind::Comma => self.advance(),
                _ => {
                    let pos = self.cur.position;
                    self.push_error(pos, "expected ','");
                    return None;
                }
            }
        }
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, InfixOp, Statement};

    fn parse(src: &str) -> (Program, Vec<String>) {
        let lexer = Lexer::new("test.eta", src);
        let mut parser = Parser::new(lexer);
        let program = parser.parse();
        (program, parser.errors().to_vec())
    }

    #[test]
    fn parses_let_statement() {
        let (program, errors) = parse("let x = 5;");
        assert!(errors.is_empty());
        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Statement::Let { name, value, .. } => {
                assert_eq!(name, "x");
                assert!(matches!(value, Expression::IntegerLit { value: 5, .. }));
            }
            other => panic!("expected Let, got {other:?}"),
        }
    }

    #[test]
    fn let_without_initializer_is_an_error() {
        let (_, errors) = parse("let x;");
        assert!(!errors.is_empty());
    }

    #[test]
    fn respects_operator_precedence() {
        let (program, errors) = parse("1 + 2 * 3;");
        assert!(errors.is_empty());
        match &program.statements[0] {
            Statement::Expression(Expression::Infix { op: InfixOp::Add, right, .. }) => {
                assert!(matches!(**right, Expression::Infix { op: InfixOp::Mul, .. }));
            }
            other => panic!("unexpected tree: {other:?}"),
        }
    }

    #[test]
    fn parses_function_literal_and_call() {
        let (program, errors) = parse("let add = fn(a, b) { return a + b; }; add(1, 2);");
        assert!(errors.is_empty());
        assert_eq!(program.statements.len(), 2);
        match &program.statements[1] {
            Statement::Expression(Expression::Call { args, .. }) => assert_eq!(args.len(), 2),
            other => panic!("expected a call expression, got {other:?}"),
        }
    }

    #[test]
    fn parses_if_else() {
        let (program, errors) = parse("if (x < 10) { x } else { 10 };");
        assert!(errors.is_empty());
        assert!(matches!(
            program.statements[0],
            Statement::Expression(Expression::If { else_branch: Some(_), .. })
        ));
    }

    #[test]
    fn parses_for_with_omitted_clauses() {
        let (program, errors) = parse("for (;;) { break; }");
        // `break` lexes fine but has no prefix parselet as a statement-leading
        // token; it falls through to an expression statement attempt and
        // errors, matching the reference implementation (SPEC_FULL §9).
        assert!(!errors.is_empty());
        assert!(matches!(
            program.statements[0],
            Statement::Expression(Expression::For { .. })
        ));
    }

    #[test]
    fn parses_array_literal_and_index() {
        let (program, errors) = parse("[1, 2, 3][0];");
        assert!(errors.is_empty());
        assert!(matches!(
            program.statements[0],
            Statement::Expression(Expression::Index { .. })
        ));
    }

    #[test]
    fn parses_compound_assignment() {
        let (program, errors) = parse("x += 1;");
        assert!(errors.is_empty());
        match &program.statements[0] {
            Statement::Expression(Expression::OpAssign { op: InfixOp::Add, .. }) => {}
            other => panic!("expected OpAssign, got {other:?}"),
        }
    }

    #[test]
    fn missing_closing_paren_is_an_error() {
        let (_, errors) = parse("(1 + 2;");
        assert!(!errors.is_empty());
    }
}
