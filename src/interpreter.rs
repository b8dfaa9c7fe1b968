pub mod ast_walk;

use std::cell::RefCell;
use std::rc::Rc;

use crate::reader::{lexer, parser};
use ast_walk::{Env, RuntimeError, Value};

macro_rules! try_or_return_error {
    ($inp:expr) => {
        match $inp {
            Ok(v) => v,
            Err(e) => return Err(e.to_string()),
        }
    };
}

pub fn new() -> Interpreter { Interpreter::new() }

pub fn parse_code(src: &str) -> Result<Vec<parser::Node>, String> {
    let tokens = lexer::tokenize(src);
    let ast = try_or_return_error!(parser::parse(&tokens));
    Ok(ast)
}

/// One interpreter instance. The root frame is an explicit value owned here
/// and threaded through every evaluation, so separate instances are fully
/// independent of each other.
pub struct Interpreter {
    root: Rc<RefCell<Env>>,
}

impl Interpreter {
    pub fn new() -> Interpreter { Interpreter { root: Env::new_root() } }

    /// The global frame, for callers that evaluate forms directly.
    pub fn root(&self) -> Rc<RefCell<Env>> { self.root.clone() }

    pub fn run(&self, nodes: &[parser::Node]) -> Result<Value, RuntimeError> { ast_walk::eval_nodes(nodes, self.root.clone()) }

    pub fn execute(&self, input: &str) -> Result<String, String> {
        let parsed = try_or_return_error!(parse_code(input));
        let result = try_or_return_error!(self.run(&parsed));
        Ok(format!("{}", result))
    }
}

impl Default for Interpreter {
    fn default() -> Self { Interpreter::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_renders_the_result() {
        let interp = Interpreter::new();
        assert_eq!(interp.execute("(+ 3 (* 4 5))").unwrap(), "23");
        assert_eq!(interp.execute("(list 1 2 3)").unwrap(), "(1 2 3)");
    }

    #[test]
    fn test_state_persists_across_execute_calls() {
        let interp = Interpreter::new();
        interp.execute("(define plus1 (lambda (n) (+ n 1)))").unwrap();
        assert_eq!(interp.execute("(plus1 5)").unwrap(), "6");
    }

    #[test]
    fn test_instances_are_independent() {
        let a = Interpreter::new();
        let b = Interpreter::new();
        a.execute("(define x 1)").unwrap();
        assert!(b.execute("x").is_err());
    }

    #[test]
    fn test_errors_come_back_as_strings() {
        let interp = Interpreter::new();
        assert_eq!(interp.execute("(+ 1 2").unwrap_err(), "SyntaxError: unexpected end of input while reading");
        assert!(interp.execute("ghost").unwrap_err().starts_with("RuntimeError:"));
    }

    #[test]
    fn test_a_failed_form_does_not_corrupt_the_root_frame() {
        let interp = Interpreter::new();
        interp.execute("(define x 41)").unwrap();
        interp.execute("(car (list))").unwrap_err();
        assert_eq!(interp.execute("(+ x 1)").unwrap(), "42");
    }
}
