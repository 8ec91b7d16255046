use std::collections::HashMap;
use std::rc::Rc;

use super::value::{BuiltinValue, Value};

pub fn table() -> HashMap<&'static str, Value> {
    let mut m = HashMap::new();
    m.insert("len", make("len", len));
    m.insert("int", make("int", int));
    m.insert("float", make("float", float));
    m.insert("type", make("type", type_of));
    m.insert("print", make("print", print));
    m.insert("println", make("println", println));
    m.insert("any", make("any", any));
    m.insert("push", make("push", push));
    m.insert("pop", make("pop", pop));
    m.insert("slice", make("slice", slice));
    m
}

fn make(name: &'static str, func: fn(&[Value]) -> Value) -> Value {
    Value::Builtin(Rc::new(BuiltinValue { name, func }))
}

fn len(args: &[Value]) -> Value {
    if args.len() != 1 {
        return Value::SimpleError("len() only accepts one argument".into());
    }
    match &args[0] {
        Value::String(s) => Value::Int(s.borrow().len() as i64),
        Value::Array(a) => Value::Int(a.borrow().len() as i64),
        _ => Value::SimpleError("type is not supported".into()),
    }
}

fn int(args: &[Value]) -> Value {
    if args.len() != 1 {
        return Value::SimpleError("int() only accepts one argument".into());
    }
    match &args[0] {
        Value::Int(n) => Value::Int(*n),
        Value::Float(f) => Value::Int(*f as i64),
        Value::Bool(b) => Value::Int(if *b { 1 } else { 0 }),
        _ => Value::SimpleError("type is not supported".into()),
    }
}

fn float(args: &[Value]) -> Value {
    if args.len() != 1 {
        return Value::SimpleError("float() only accepts one argument".into());
    }
    match &args[0] {
        Value::Float(f) => Value::Float(*f),
        Value::Int(n) => Value::Float(*n as f64),
        _ => Value::SimpleError("type is not supported".into()),
    }
}

fn type_of(args: &[Value]) -> Value {
    if args.len() != 1 {
        return Value::SimpleError("type() only accepts one argument".into());
    }
    Value::new_string(args[0].kind_name())
}

/// Shared by `print`/`println`: renders each argument, rewriting the literal
/// two-character sequence `\n` to a real newline for top-level string
/// arguments only.
fn print(args: &[Value]) -> Value {
    for arg in args {
        let rendered = arg.render();
        if matches!(arg, Value::String(_)) {
            print!("{}", rendered.replace("\\n", "\n"));
        } else {
            print!("{rendered}");
        }
    }
    Value::Int(args.len() as i64)
}

fn println(args: &[Value]) -> Value {
    let result = print(args);
    std::println!();
    result
}

fn any(args: &[Value]) -> Value {
    if !args.is_empty() {
        return Value::SimpleError("any() does not accept any arguments".into());
    }
    Value::Null
}

fn push(args: &[Value]) -> Value {
    if args.len() != 2 {
        return Value::SimpleError("push() requires 2 arguments".into());
    }
    match &args[0] {
        Value::Array(arr) => {
            arr.borrow_mut().push(args[1].clone());
            Value::Array(arr.clone())
        }
        _ => Value::SimpleError("expected an array type".into()),
    }
}

fn pop(args: &[Value]) -> Value {
    if args.len() != 1 {
        return Value::SimpleError("pop() requires 1 argument".into());
    }
    match &args[0] {
        Value::Array(arr) => {
            if arr.borrow_mut().pop().is_none() {
                return Value::SimpleError("cannot pop from an empty array".into());
            }
            Value::Array(arr.clone())
        }
        _ => Value::SimpleError("expected an array type".into()),
    }
}

fn slice(args: &[Value]) -> Value {
    let arr = match args.first() {
        Some(Value::Array(a)) => a,
        Some(_) => return Value::SimpleError("expected an array type".into()),
        None => return Value::SimpleError("slice() requires either 1 or 3 arguments".into()),
    };
    match args.len() {
        1 => Value::new_array(arr.borrow().clone()),
        3 => {
            let start = match &args[1] {
                Value::Int(n) => *n,
                _ => return Value::SimpleError("expected start index to be an int type".into()),
            };
            let end = match &args[2] {
                Value::Int(n) => *n,
                _ => return Value::SimpleError("expected end index to be an int type".into()),
            };
            let len = arr.borrow().len() as i64;
            if start < 0 || end < 0 || start > len || end > len || start > end {
                return Value::SimpleError("index out of range".into());
            }
            Value::new_array(arr.borrow()[start as usize..end as usize].to_vec())
        }
        _ => Value::SimpleError("slice() requires either 1 or 3 arguments".into()),
    }
}
