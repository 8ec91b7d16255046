//! Polymorphic abstract syntax tree for the eta language.
//!
//! Every node is a variant of [`Statement`] or [`Expression`] and carries the
//! [`Position`] of its leading token, so the evaluator can decorate errors
//! with source context without maintaining a separate span table.

use crate::lexer::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// A brace-delimited statement sequence: `if`/`for`/function bodies and
/// standalone block statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let {
        name: String,
        value: Expression,
        position: Position,
    },
    Return {
        value: Option<Expression>,
        position: Position,
    },
    Expression(Expression),
    Block(Block),
}

impl Statement {
    pub fn position(&self) -> Position {
        match self {
            Statement::Let { position, .. } => *position,
            Statement::Return { position, .. } => *position,
            Statement::Expression(expr) => expr.position(),
            Statement::Block(block) => block.position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Not,
    Neg,
}

/// Expression nodes. `Assign`/`OpAssign` targets are themselves expressions
/// (usually `Identifier` or `Index`); the evaluator validates the target
/// shape at evaluation time rather than the parser restricting it, mirroring
/// how the reference implementation treats an assignment's left side as an
/// ordinary expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier {
        name: String,
        position: Position,
    },
    IntegerLit {
        value: i64,
        position: Position,
    },
    FloatLit {
        value: f64,
        position: Position,
    },
    BoolLit {
        value: bool,
        position: Position,
    },
    StringLit {
        value: String,
        position: Position,
    },
    ArrayLit {
        elements: Vec<Expression>,
        position: Position,
    },
    Prefix {
        op: PrefixOp,
        right: Box<Expression>,
        position: Position,
    },
    Infix {
        op: InfixOp,
        left: Box<Expression>,
        right: Box<Expression>,
        position: Position,
    },
    If {
        cond: Box<Expression>,
        then_branch: Block,
        else_branch: Option<Block>,
        position: Position,
    },
    For {
        init: Option<Box<Statement>>,
        cond: Option<Box<Expression>>,
        update: Option<Box<Expression>>,
        body: Block,
        position: Position,
    },
    Assign {
        target: Box<Expression>,
        value: Box<Expression>,
        position: Position,
    },
    OpAssign {
        op: InfixOp,
        target: Box<Expression>,
        value: Box<Expression>,
        position: Position,
    },
    Call {
        callee: Box<Expression>,
        args: Vec<Expression>,
        position: Position,
    },
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
        position: Position,
    },
    FunctionLit {
        params: Vec<String>,
        body: Block,
        position: Position,
    },
    /// Placeholder left behind by a parselet that hit a syntax error. Never
    /// reaches the evaluator: the driver checks `Parser::errors()` before
    /// evaluating, so a tree containing one of these is never executed.
    Error(Position),
}

impl Expression {
    pub fn position(&self) -> Position {
        match self {
            Expression::Identifier { position, .. }
            | Expression::IntegerLit { position, .. }
            | Expression::FloatLit { position, .. }
            | Expression::BoolLit { position, .. }
            | Expression::StringLit { position, .. }
            | Expression::ArrayLit { position, .. }
            | Expression::Prefix { position, .. }
            | Expression::Infix { position, .. }
            | Expression::If { position, .. }
            | Expression::For { position, .. }
            | Expression::Assign { position, .. }
            | Expression::OpAssign { position, .. }
            | Expression::Call { position, .. }
            | Expression::Index { position, .. }
            | Expression::FunctionLit { position, .. } => *position,
            Expression::Error(position) => *position,
        }
    }
}
