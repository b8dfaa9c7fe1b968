use std::fmt;

use crate::interpreter::ast_walk::error::{ErrorKind, RuntimeError};
use crate::interpreter::ast_walk::list::List;
use crate::interpreter::ast_walk::procedure::Procedure;
use crate::reader::parser::Node;

use crate::runtime_error;

/// The result type flowing through evaluation. `Boolean` is the designated
/// false value's home: the reader never produces one, only built-ins do, and
/// every value except `Boolean(false)` counts as true. `Unspecified` is the
/// unit result of `define`, `set!`, and an empty `begin`.
#[derive(PartialEq, Clone)]
pub enum Value {
    Symbol(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),

    List(List),

    Procedure(Procedure),

    Unspecified,
}

impl std::ops::Add for Value {
    type Output = Result<Value, RuntimeError>;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a + b)),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
            (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(a as f64 + b)),
            (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a + b as f64)),
            (a, b) => runtime_error!(ErrorKind::TypeMismatch, "Cannot `+` {:?} and {:?}", a, b),
        }
    }
}

impl std::ops::Sub for Value {
    type Output = Result<Value, RuntimeError>;

    fn sub(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a - b)),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a - b)),
            (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(a as f64 - b)),
            (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a - b as f64)),
            (a, b) => runtime_error!(ErrorKind::TypeMismatch, "Cannot `-` {:?} and {:?}", a, b),
        }
    }
}

impl std::ops::Mul for Value {
    type Output = Result<Value, RuntimeError>;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a * b)),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a * b)),
            (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(a as f64 * b)),
            (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a * b as f64)),
            (a, b) => runtime_error!(ErrorKind::TypeMismatch, "Cannot `*` {:?} and {:?}", a, b),
        }
    }
}

impl std::ops::Div for Value {
    type Output = Result<Value, RuntimeError>;

    fn div(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            // a zero divisor is an error of its own kind, never a NaN/inf
            (Value::Integer(_) | Value::Float(_), Value::Integer(0)) => {
                runtime_error!(ErrorKind::DivisionByZero, "Division by zero")
            }
            (Value::Integer(_) | Value::Float(_), Value::Float(b)) if b == 0.0 => {
                runtime_error!(ErrorKind::DivisionByZero, "Division by zero")
            }
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a / b)),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a / b)),
            (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(a as f64 / b)),
            (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a / b as f64)),
            (a, b) => runtime_error!(ErrorKind::TypeMismatch, "Cannot `/` {:?} and {:?}", a, b),
        }
    }
}

impl std::ops::Neg for Value {
    type Output = Result<Value, RuntimeError>;

    fn neg(self) -> Self::Output {
        match self {
            Value::Integer(a) => Ok(Value::Integer(-a)),
            Value::Float(a) => Ok(Value::Float(-a)),
            val => runtime_error!(ErrorKind::TypeMismatch, "Cannot `-` {:?}", val),
        }
    }
}

impl Value {
    pub fn from_vec(vec: Vec<Value>) -> Value { List::from_vec(vec).into_value() }

    pub fn from_node(node: &Node) -> Value {
        match *node {
            Node::Identifier(ref val) => Value::Symbol(val.clone()),
            Node::Integer(val) => Value::Integer(val),
            Node::Float(val) => Value::Float(val),
            Node::List(ref nodes) => Value::List(List::from_nodes(nodes)),
        }
    }

    /// Everything except the designated false value is truthy.
    pub fn is_truthy(&self) -> bool { !matches!(self, Value::Boolean(false)) }

    pub fn into_symbol(self) -> Result<String, RuntimeError> {
        match self {
            Value::Symbol(s) => Ok(s),
            val => runtime_error!(ErrorKind::TypeMismatch, "Expected a symbol, but got: {:?}", val),
        }
    }

    pub fn into_list(self) -> Result<List, RuntimeError> {
        match self {
            Value::List(list) => Ok(list),
            val => runtime_error!(ErrorKind::TypeMismatch, "Expected a list, but got: {:?}", val),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Symbol(ref val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Float(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "#{}", if val { "t" } else { "f" }),
            Value::List(ref list) => write!(f, "{}", list),
            Value::Procedure(ref p) => write!(f, "{:?}", p),
            Value::Unspecified => write!(f, "#<unspecified>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::List(ref list) => write!(f, "{:?}", list),
            _ => write!(f, "{}", self),
        }
    }
}
