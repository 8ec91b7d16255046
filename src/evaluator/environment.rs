use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::value::Value;

/// A lexical scope frame. Frames form a tree with child-to-parent links only,
/// so `Rc` reference counting is enough and cycles are structurally
/// impossible: a closure keeps its defining frame alive by holding a clone of
/// this handle.
#[derive(Debug, Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

#[derive(Debug)]
struct Frame {
    vars: HashMap<String, Value>,
    outer: Option<Environment>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            vars: HashMap::new(),
            outer: None,
        })))
    }

    /// A fresh frame whose outer scope is `self`.
    pub fn child(outer: &Environment) -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            vars: HashMap::new(),
            outer: Some(outer.clone()),
        })))
    }

    /// Walks the outer chain until `name` is found.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.0.borrow().vars.get(name) {
            return Some(value.clone());
        }
        let outer = self.0.borrow().outer.clone();
        outer.and_then(|env| env.get(name))
    }

    /// Always writes to this frame; used for declarations and parameter binding.
    pub fn set(&self, name: &str, value: Value) {
        self.0.borrow_mut().vars.insert(name.to_string(), value);
    }

    /// Writes to the nearest frame that already defines `name`. Returns
    /// `false` if no frame defines it.
    pub fn update(&self, name: &str, value: Value) -> bool {
        if self.0.borrow().vars.contains_key(name) {
            self.0.borrow_mut().vars.insert(name.to_string(), value);
            return true;
        }
        let outer = self.0.borrow().outer.clone();
        match outer {
            Some(env) => env.update(name, value),
            None => false,
        }
    }

    /// Checks only the current frame; used to reject redeclaration.
    pub fn exists(&self, name: &str) -> bool {
        self.0.borrow().vars.contains_key(name)
    }
}
