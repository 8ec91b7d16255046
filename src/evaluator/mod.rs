mod builtins;
mod environment;
mod value;

pub use environment::Environment;
pub use value::{FunctionValue, Value};

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{Block, Expression, InfixOp, PrefixOp, Program, Statement};
use crate::diagnostics;
use crate::lexer::{Lexer, Position};

pub fn is_error(value: &Value) -> bool {
    value.is_error()
}

/// Tree-walking evaluator. Holds a `RefCell<Lexer>` purely to re-drive it at
/// diagnostic time: an error carries the position of the innermost
/// expression the evaluator was working on, and recovering the source line
/// for that position means resetting the lexer and rescanning one token.
pub struct Evaluator<'a> {
    lexer: RefCell<Lexer<'a>>,
    builtins: HashMap<&'static str, Value>,
}

impl<'a> Evaluator<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Evaluator {
            lexer: RefCell::new(lexer),
            builtins: builtins::table(),
        }
    }

    pub fn eval_program(&self, program: &Program, env: &Environment) -> Value {
        log::trace!("evaluator: program ({} statements)", program.statements.len());
        match self.eval_statements(&program.statements, env) {
            Value::ReturnValue(inner) => *inner,
            other => other,
        }
    }

    fn eval_statements(&self, statements: &[Statement], env: &Environment) -> Value {
        let mut result = Value::Null;
        for stmt in statements {
            result = self.eval_statement(stmt, env);
            if matches!(result, Value::ReturnValue(_)) || result.is_error() {
                return result;
            }
        }
        result
    }

    fn eval_block(&self, block: &Block, env: &Environment) -> Value {
        self.eval_statements(&block.statements, env)
    }

    fn decorate(&self, pos: Position, value: Value) -> Value {
        match value {
            Value::SimpleError(msg) => Value::DetailedError(self.format_error(pos, &msg)),
            other => other,
        }
    }

    fn format_error(&self, pos: Position, msg: &str) -> String {
        let mut lexer = self.lexer.borrow_mut();
        lexer.set_position(pos);
        lexer.next_token();
        let last = lexer.last_position();
        let after = lexer.position();
        let line = lexer.line_text(last).to_string();
        diagnostics::render_banner(lexer.filename(), last, after, &line, msg)
    }

    fn eval_statement(&self, stmt: &Statement, env: &Environment) -> Value {
        log::trace!("evaluator: statement at {}", stmt.position());
        match stmt {
            Statement::Let { name, value, position } => self.eval_let(name, value, *position, env),
            Statement::Return { value, position } => self.eval_return(value.as_ref(), *position, env),
            Statement::Expression(expr) => {
                let pos = expr.position();
                let value = self.eval_expression(expr, env);
                self.decorate(pos, value)
            }
            Statement::Block(block) => self.eval_block(block, env),
        }
    }

    fn eval_let(&self, name: &str, value_expr: &Expression, position: Position, env: &Environment) -> Value {
        if env.exists(name) {
            return self.decorate(position, Value::SimpleError("redeclaration of same variable".into()));
        }
        if self.builtins.contains_key(name) {
            return self.decorate(
                position,
                Value::SimpleError("a function with same name already exists".into()),
            );
        }
        let value_pos = value_expr.position();
        let value = self.eval_expression(value_expr, env);
        let value = self.decorate(value_pos, value);
        if value.is_error() {
            return value;
        }
        env.set(name, value.clone());
        value
    }

    fn eval_return(&self, value_expr: Option<&Expression>, _position: Position, env: &Environment) -> Value {
        let value = match value_expr {
            Some(expr) => {
                let pos = expr.position();
                let v = self.eval_expression(expr, env);
                let v = self.decorate(pos, v);
                if v.is_error() {
                    return v;
                }
                v
            }
            None => Value::Null,
        };
        Value::ReturnValue(Box::new(value))
    }

    fn eval_expression(&self, expr: &Expression, env: &Environment) -> Value {
        log::trace!("evaluator: expression at {}", expr.position());
        match expr {
            Expression::IntegerLit { value, .. } => Value::Int(*value),
            Expression::FloatLit { value, .. } => Value::Float(*value),
            Expression::BoolLit { value, .. } => Value::Bool(*value),
            Expression::StringLit { value, .. } => Value::new_string(value.clone()),
            Expression::Identifier { name, position } => self.eval_identifier(name, *position, env),
            Expression::ArrayLit { elements, position } => self.eval_array_lit(elements, *position, env),
            Expression::Prefix { op, right, position } => self.eval_prefix(*op, right, *position, env),
            Expression::Infix { op, left, right, position } => self.eval_infix(*op, left, right, *position, env),
            Expression::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                let child = Environment::child(env);
                self.eval_if(cond, then_branch, else_branch.as_ref(), &child)
            }
            Expression::For {
                init,
                cond,
                update,
                body,
                ..
            } => {
                let child = Environment::child(env);
                self.eval_for(init.as_deref(), cond.as_deref(), update.as_deref(), body, &child)
            }
            Expression::Assign { target, value, position } => self.eval_assign(target, value, *position, env),
            Expression::OpAssign { op, target, value, position } => {
                self.eval_opassign(*op, target, value, *position, env)
            }
            Expression::Call { callee, args, position } => self.eval_call(callee, args, *position, env),
            Expression::Index { left, index, position } => self.eval_index_expr(left, index, *position, env),
            Expression::FunctionLit { params, body, .. } => Value::Function(Rc::new(FunctionValue {
                params: params.clone(),
                body: body.clone(),
                env: env.clone(),
            })),
            Expression::Error(_) => unreachable!(
                "a tree containing a parse-error placeholder is never evaluated; the driver checks Parser::errors() first"
            ),
        }
    }

    fn eval_identifier(&self, name: &str, position: Position, env: &Environment) -> Value {
        if let Some(value) = env.get(name) {
            return value;
        }
        if let Some(value) = self.builtins.get(name) {
            return value.clone();
        }
        self.decorate(position, Value::SimpleError("undefined identifier".into()))
    }

    fn eval_array_lit(&self, elements: &[Expression], position: Position, env: &Environment) -> Value {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            let pos = element.position();
            let value = self.eval_expression(element, env);
            let value = self.decorate(pos, value);
            if value.is_error() {
                return value;
            }
            values.push(value);
        }
        Value::new_array(values)
    }

    fn eval_prefix(&self, op: PrefixOp, right_expr: &Expression, position: Position, env: &Environment) -> Value {
        let right_pos = right_expr.position();
        let right = self.eval_expression(right_expr, env);
        let right = self.decorate(right_pos, right);
        if right.is_error() {
            return right;
        }
        let result = match op {
            PrefixOp::Not => Value::Bool(!right.truthy()),
            PrefixOp::Neg => match right {
                Value::Int(n) => Value::Int(-n),
                Value::Float(f) => Value::Float(-f),
                _ => Value::SimpleError("type is not supported".into()),
            },
        };
        self.decorate(position, result)
    }

    fn eval_infix(
        &self,
        op: InfixOp,
        left_expr: &Expression,
        right_expr: &Expression,
        position: Position,
        env: &Environment,
    ) -> Value {
        // Right is evaluated before left, preserving the reference
        // implementation's observable side-effect ordering.
        let right_pos = right_expr.position();
        let right = self.eval_expression(right_expr, env);
        let right = self.decorate(right_pos, right);
        if right.is_error() {
            return right;
        }

        let left_pos = left_expr.position();
        let left = self.eval_expression(left_expr, env);
        let left = self.decorate(left_pos, left);
        if left.is_error() {
            return left;
        }

        let result = apply_infix(op, &left, &right);
        self.decorate(position, result)
    }

    fn eval_if(
        &self,
        cond: &Expression,
        then_branch: &Block,
        else_branch: Option<&Block>,
        env: &Environment,
    ) -> Value {
        let cond_pos = cond.position();
        let cond_value = self.eval_expression(cond, env);
        let cond_value = self.decorate(cond_pos, cond_value);
        if cond_value.is_error() {
            return cond_value;
        }
        if cond_value.truthy() {
            self.eval_block(then_branch, env)
        } else if let Some(else_branch) = else_branch {
            self.eval_block(else_branch, env)
        } else {
            Value::Null
        }
    }

    fn eval_for(
        &self,
        init: Option<&Statement>,
        cond: Option<&Expression>,
        update: Option<&Expression>,
        body: &Block,
        env: &Environment,
    ) -> Value {
        if let Some(init_stmt) = init {
            let pos = init_stmt.position();
            let value = self.eval_statement(init_stmt, env);
            let value = self.decorate(pos, value);
            if value.is_error() {
                return value;
            }
        }

        let mut result = Value::Null;
        loop {
            if let Some(cond_expr) = cond {
                let pos = cond_expr.position();
                let value = self.eval_expression(cond_expr, env);
                let value = self.decorate(pos, value);
                if value.is_error() {
                    return value;
                }
                if !value.truthy() {
                    return result;
                }
            }

            result = self.decorate(body.position, self.eval_block(body, env));
            if result.is_error() || matches!(result, Value::ReturnValue(_)) {
                return result;
            }

            if let Some(update_expr) = update {
                let pos = update_expr.position();
                let value = self.eval_expression(update_expr, env);
                let value = self.decorate(pos, value);
                if value.is_error() {
                    return value;
                }
            }
        }
    }

    fn eval_call(&self, callee_expr: &Expression, arg_exprs: &[Expression], position: Position, env: &Environment) -> Value {
        let callee_pos = callee_expr.position();
        let callee = self.eval_expression(callee_expr, env);
        let callee = self.decorate(callee_pos, callee);
        if callee.is_error() {
            return callee;
        }

        let mut args = Vec::with_capacity(arg_exprs.len());
        for arg_expr in arg_exprs {
            let pos = arg_expr.position();
            let value = self.eval_expression(arg_expr, env);
            let value = self.decorate(pos, value);
            if value.is_error() {
                return self.decorate(position, value);
            }
            args.push(value);
        }

        let result = self.apply_function(&callee, &args);
        self.decorate(position, result)
    }

    fn apply_function(&self, callee: &Value, args: &[Value]) -> Value {
        match callee {
            Value::Function(f) => {
                if f.params.len() != args.len() {
                    return Value::SimpleError(format!(
                        "expected {} arguments but got {}",
                        f.params.len(),
                        args.len()
                    ));
                }
                log::debug!("evaluator: calling function with {} argument(s)", args.len());
                let call_env = Environment::child(&f.env);
                for (param, arg) in f.params.iter().zip(args.iter()) {
                    call_env.set(param, arg.clone());
                }
                match self.eval_block(&f.body, &call_env) {
                    Value::ReturnValue(inner) => *inner,
                    other => other,
                }
            }
            Value::Builtin(b) => (b.func)(args),
            _ => Value::SimpleError("undefined or not a function".into()),
        }
    }

    fn eval_index_expr(&self, left_expr: &Expression, index_expr: &Expression, position: Position, env: &Environment) -> Value {
        let left_pos = left_expr.position();
        let left = self.eval_expression(left_expr, env);
        let left = self.decorate(left_pos, left);
        if left.is_error() {
            return left;
        }

        let idx_pos = index_expr.position();
        let idx = self.eval_expression(index_expr, env);
        let idx = self.decorate(idx_pos, idx);
        if idx.is_error() {
            return idx;
        }

        let result = apply_index(&left, &idx);
        self.decorate(position, result)
    }

    fn eval_assign(&self, target: &Expression, value_expr: &Expression, position: Position, env: &Environment) -> Value {
        match target {
            Expression::Identifier { name, position: name_pos } => {
                self.assign_identifier(name, *name_pos, value_expr, env)
            }
            Expression::Index { left, index, .. } => match left.as_ref() {
                Expression::Identifier { name, position: ident_pos } => match env.get(name) {
                    None => self.decorate(*ident_pos, Value::SimpleError("undefined identifier".into())),
                    Some(Value::Array(arr)) => self.assign_array_index(&arr, index, value_expr, env),
                    Some(Value::String(s)) => self.assign_string_index(&s, index, value_expr, env),
                    Some(_) => self.decorate(*ident_pos, Value::SimpleError("expected an array or string type".into())),
                },
                _ => self.decorate(position, Value::SimpleError("invalid assignment target".into())),
            },
            _ => self.decorate(position, Value::SimpleError("invalid assignment target".into())),
        }
    }

    fn assign_identifier(&self, name: &str, name_pos: Position, value_expr: &Expression, env: &Environment) -> Value {
        let current = match env.get(name) {
            Some(v) => v,
            None => return self.decorate(name_pos, Value::SimpleError("undefined variable".into())),
        };
        if matches!(current, Value::Function(_)) {
            return self.decorate(
                name_pos,
                Value::SimpleError("a function type variable can not be reassigned".into()),
            );
        }

        let value_pos = value_expr.position();
        let new_value = self.eval_expression(value_expr, env);
        let new_value = self.decorate(value_pos, new_value);
        if new_value.is_error() {
            return new_value;
        }

        if !matches!(current, Value::Null) && std::mem::discriminant(&current) != std::mem::discriminant(&new_value) {
            return self.decorate(
                name_pos,
                Value::SimpleError("a variable cannot be reassigned with a new type".into()),
            );
        }

        env.update(name, new_value.clone());
        new_value
    }

    fn assign_array_index(
        &self,
        arr: &Rc<RefCell<Vec<Value>>>,
        index_expr: &Expression,
        value_expr: &Expression,
        env: &Environment,
    ) -> Value {
        let idx_pos = index_expr.position();
        let idx = self.eval_expression(index_expr, env);
        let idx = self.decorate(idx_pos, idx);
        if idx.is_error() {
            return idx;
        }
        let index = match idx {
            Value::Int(n) => n,
            _ => return self.decorate(idx_pos, Value::SimpleError("expected an int type for index".into())),
        };
        let len = arr.borrow().len();
        if index < 0 || index as usize >= len {
            return self.decorate(idx_pos, Value::SimpleError("index out of range".into()));
        }

        let value_pos = value_expr.position();
        let value = self.eval_expression(value_expr, env);
        let value = self.decorate(value_pos, value);
        if value.is_error() {
            return value;
        }
        arr.borrow_mut()[index as usize] = value;
        Value::Array(arr.clone())
    }

    fn assign_string_index(
        &self,
        s: &Rc<RefCell<String>>,
        index_expr: &Expression,
        value_expr: &Expression,
        env: &Environment,
    ) -> Value {
        let idx_pos = index_expr.position();
        let idx = self.eval_expression(index_expr, env);
        let idx = self.decorate(idx_pos, idx);
        if idx.is_error() {
            return idx;
        }
        let index = match idx {
            Value::Int(n) => n,
            _ => return self.decorate(idx_pos, Value::SimpleError("expected an int type for index".into())),
        };
        let len = s.borrow().len();
        if index < 0 || index as usize >= len {
            return self.decorate(idx_pos, Value::SimpleError("index out of range".into()));
        }

        let value_pos = value_expr.position();
        let value = self.eval_expression(value_expr, env);
        let value = self.decorate(value_pos, value);
        if value.is_error() {
            return value;
        }
        let replacement = match &value {
            Value::String(rhs) => rhs.borrow().clone(),
            _ => return self.decorate(value_pos, Value::SimpleError("expected a string type".into())),
        };
        if replacement.chars().count() != 1 {
            return self.decorate(value_pos, Value::SimpleError("expected a single-character string".into()));
        }

        let mut bytes = s.borrow().clone().into_bytes();
        bytes[index as usize] = replacement.as_bytes()[0];
        *s.borrow_mut() = String::from_utf8(bytes).unwrap_or_default();
        Value::String(s.clone())
    }

    fn eval_opassign(
        &self,
        op: InfixOp,
        target: &Expression,
        value_expr: &Expression,
        position: Position,
        env: &Environment,
    ) -> Value {
        let name = match target {
            Expression::Identifier { name, .. } => name,
            _ => return self.decorate(position, Value::SimpleError("expected a variable".into())),
        };
        let current = match env.get(name) {
            Some(v) => v,
            None => return self.decorate(position, Value::SimpleError("undefined variable".into())),
        };

        let value_pos = value_expr.position();
        let value = self.eval_expression(value_expr, env);
        let value = self.decorate(value_pos, value);
        if value.is_error() {
            return value;
        }

        let result = apply_infix(op, &current, &value);
        let result = self.decorate(position, result);
        if result.is_error() {
            return result;
        }
        env.update(name, result.clone());
        result
    }
}

fn apply_infix(op: InfixOp, left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => infix_int(op, *a, *b),
        (Value::Float(a), Value::Float(b)) => infix_float(op, *a, *b),
        (Value::String(a), Value::String(b)) => infix_string(op, &a.borrow(), &b.borrow()),
        _ => {
            if std::mem::discriminant(left) != std::mem::discriminant(right) {
                return Value::SimpleError("type mismatch".into());
            }
            match op {
                InfixOp::Eq => Value::Bool(value::value_eq(left, right)),
                InfixOp::NotEq => Value::Bool(!value::value_eq(left, right)),
                _ => Value::SimpleError("unknown operator".into()),
            }
        }
    }
}

fn infix_int(op: InfixOp, a: i64, b: i64) -> Value {
    match op {
        InfixOp::Add => Value::Int(a + b),
        InfixOp::Sub => Value::Int(a - b),
        InfixOp::Mul => Value::Int(a * b),
        InfixOp::Div => {
            if b == 0 {
                Value::SimpleError("division by zero".into())
            } else {
                Value::Int(a / b)
            }
        }
        InfixOp::Lt => Value::Bool(a < b),
        InfixOp::LtEq => Value::Bool(a <= b),
        InfixOp::Gt => Value::Bool(a > b),
        InfixOp::GtEq => Value::Bool(a >= b),
        InfixOp::Eq => Value::Bool(a == b),
        InfixOp::NotEq => Value::Bool(a != b),
    }
}

fn infix_float(op: InfixOp, a: f64, b: f64) -> Value {
    match op {
        InfixOp::Add => Value::Float(a + b),
        InfixOp::Sub => Value::Float(a - b),
        InfixOp::Mul => Value::Float(a * b),
        InfixOp::Div => Value::Float(a / b),
        InfixOp::Lt => Value::Bool(a < b),
        InfixOp::LtEq => Value::Bool(a <= b),
        InfixOp::Gt => Value::Bool(a > b),
        InfixOp::GtEq => Value::Bool(a >= b),
        InfixOp::Eq => Value::Bool(a == b),
        InfixOp::NotEq => Value::Bool(a != b),
    }
}

fn infix_string(op: InfixOp, a: &str, b: &str) -> Value {
    match op {
        InfixOp::Add => Value::new_string(format!("{a}{b}")),
        InfixOp::Lt => Value::Bool(a < b),
        InfixOp::LtEq => Value::Bool(a <= b),
        InfixOp::Gt => Value::Bool(a > b),
        InfixOp::GtEq => Value::Bool(a >= b),
        InfixOp::Eq => Value::Bool(a == b),
        InfixOp::NotEq => Value::Bool(a != b),
        InfixOp::Mul | InfixOp::Div => Value::SimpleError("unknown operator".into()),
    }
}

fn apply_index(left: &Value, index: &Value) -> Value {
    let i = match index {
        Value::Int(n) => *n,
        _ => return Value::SimpleError("expected an int type for index".into()),
    };
    match left {
        Value::Array(arr) => {
            let arr = arr.borrow();
            if i < 0 || i as usize >= arr.len() {
                return Value::SimpleError("index out of range".into());
            }
            arr[i as usize].clone()
        }
        Value::String(s) => {
            let s = s.borrow();
            if i < 0 || i as usize >= s.len() {
                return Value::SimpleError("index out of range".into());
            }
            Value::new_string((s.as_bytes()[i as usize] as char).to_string())
        }
        _ => Value::SimpleError("expected an array or string type".into()),
    }
}
