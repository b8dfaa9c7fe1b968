use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::interpreter::ast_walk::error::{ErrorKind, RuntimeError};
use crate::interpreter::ast_walk::procedure::{Procedure, BUILTIN_NAMES};
use crate::interpreter::ast_walk::value::Value;

use crate::runtime_error;

/// One frame of variable bindings. Frames form a tree through the parent
/// reference: the chain is finite and acyclic, children are reachable only
/// through closures or active calls, never enumerated from the parent.
pub struct Env {
    pub parent: Option<Rc<RefCell<Env>>>,
    values: HashMap<String, Value>,
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.parent {
            Some(ref parent) => write!(f, "<Env {:?}>", parent.borrow()),
            None => write!(f, "<Env>"),
        }
    }
}

impl Env {
    /// The global frame: no parent, pre-populated with the built-in table.
    pub fn new_root() -> Rc<RefCell<Env>> {
        let mut env = Env {
            parent: None,
            values: HashMap::new(),
        };
        for name in BUILTIN_NAMES.iter().copied() {
            env.define(name.to_string(), Value::Procedure(Procedure::Native(name)));
        }
        Rc::new(RefCell::new(env))
    }

    pub fn new_child(parent: Rc<RefCell<Env>>) -> Rc<RefCell<Env>> {
        let env = Env {
            parent: Some(parent),
            values: HashMap::new(),
        };
        Rc::new(RefCell::new(env))
    }

    /// A call frame over `parent`, pairing each parameter name with the
    /// argument value at the same position. Differing counts are an error,
    /// never silently truncated or padded.
    pub fn new_call_frame(parent: Rc<RefCell<Env>>, names: &[String], args: Vec<Value>) -> Result<Rc<RefCell<Env>>, RuntimeError> {
        if names.len() != args.len() {
            runtime_error!(
                ErrorKind::ArityMismatch,
                "Must supply exactly {} arguments to procedure, got {}",
                names.len(),
                args.len()
            );
        }
        let frame = Env::new_child(parent);
        for (name, value) in names.iter().zip(args) {
            frame.borrow_mut().define(name.clone(), value);
        }
        Ok(frame)
    }

    /// Insert or overwrite a binding directly in this frame. Ancestors are
    /// never consulted, so a same-named outer binding gets shadowed.
    pub fn define(&mut self, key: String, value: Value) { self.values.insert(key, value); }

    /// Overwrite the binding in whichever frame of the chain owns `key`.
    /// Assignment never creates a binding.
    pub fn set(&mut self, key: String, value: Value) -> Result<(), RuntimeError> {
        if self.values.contains_key(&key) {
            self.values.insert(key, value);
            Ok(())
        } else {
            match self.parent {
                Some(ref parent) => parent.borrow_mut().set(key, value),
                None => runtime_error!(ErrorKind::UnboundVariable, "Can't set! an undefined variable: {}", key),
            }
        }
    }

    /// Walk the parent chain upward until a frame directly contains `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self.values.get(key) {
            Some(val) => Some(val.clone()),
            None => match self.parent {
                Some(ref parent) => parent.borrow().get(key),
                None => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let env = Env::new_root();
        env.borrow_mut().define("x".to_string(), Value::Integer(42));
        assert_eq!(env.borrow().get("x"), Some(Value::Integer(42)));
        assert_eq!(env.borrow().get("missing"), None);
    }

    #[test]
    fn test_define_overwrites_in_place() {
        let env = Env::new_root();
        env.borrow_mut().define("x".to_string(), Value::Integer(1));
        env.borrow_mut().define("x".to_string(), Value::Integer(2));
        assert_eq!(env.borrow().get("x"), Some(Value::Integer(2)));
    }

    #[test]
    fn test_child_lookup_reaches_parent() {
        let root = Env::new_root();
        root.borrow_mut().define("x".to_string(), Value::Integer(10));
        let child = Env::new_child(root);
        assert_eq!(child.borrow().get("x"), Some(Value::Integer(10)));
    }

    #[test]
    fn test_child_define_shadows_parent() {
        let root = Env::new_root();
        root.borrow_mut().define("x".to_string(), Value::Integer(10));
        let child = Env::new_child(root.clone());
        child.borrow_mut().define("x".to_string(), Value::Integer(20));
        assert_eq!(child.borrow().get("x"), Some(Value::Integer(20)));
        assert_eq!(root.borrow().get("x"), Some(Value::Integer(10)));
    }

    #[test]
    fn test_set_mutates_owning_frame() {
        let root = Env::new_root();
        root.borrow_mut().define("x".to_string(), Value::Integer(10));
        let child = Env::new_child(root.clone());
        child.borrow_mut().set("x".to_string(), Value::Integer(99)).unwrap();
        assert_eq!(root.borrow().get("x"), Some(Value::Integer(99)));
    }

    #[test]
    fn test_set_unbound_fails() {
        let env = Env::new_root();
        let err = env.borrow_mut().set("ghost".to_string(), Value::Integer(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnboundVariable);
    }

    #[test]
    fn test_call_frame_binds_by_position() {
        let root = Env::new_root();
        let names = vec!["a".to_string(), "b".to_string()];
        let frame = Env::new_call_frame(root, &names, vec![Value::Integer(1), Value::Integer(2)]).unwrap();
        assert_eq!(frame.borrow().get("a"), Some(Value::Integer(1)));
        assert_eq!(frame.borrow().get("b"), Some(Value::Integer(2)));
    }

    #[test]
    fn test_call_frame_arity_mismatch() {
        let root = Env::new_root();
        let names = vec!["a".to_string(), "b".to_string()];
        let err = Env::new_call_frame(root, &names, vec![Value::Integer(1)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArityMismatch);
    }

    #[test]
    fn test_root_has_builtins() {
        let env = Env::new_root();
        assert!(env.borrow().get("+").is_some());
        assert!(env.borrow().get("car").is_some());
    }
}
