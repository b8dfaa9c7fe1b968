use std::fmt;

use crate::interpreter::ast_walk::value::Value;
use crate::reader::parser::Node;

/// A cons-cell list. Represents code-as-data (a call or special form) and
/// list data alike; the empty list is `Null`.
#[derive(PartialEq, Clone)]
pub enum List {
    Cell(Box<Value>, Box<List>),
    Null,
}

/// `(car cdr) -> (car, cdr)`, or an error of the given kind on an empty list.
#[macro_export]
macro_rules! shift_or_error {
    ($list:expr, $kind:expr, $($arg:tt)*) => (
        match $list.shift() {
            Some((car, cdr)) => Ok((car, cdr)),
            None => Err($crate::interpreter::ast_walk::error::RuntimeError {
                kind: $kind,
                message: format!($($arg)*),
            }),
        }?
    )
}

/// Destructure a [`List`] against a fixed shape, evaluating the body with the
/// elements bound. Anything else is a malformed form.
#[macro_export]
macro_rules! match_list {
    ($list:expr, [] => $expr:expr) => {
        match $list {
            $crate::interpreter::ast_walk::list::List::Null => Ok($expr),
            _ => Err($crate::interpreter::ast_walk::error::RuntimeError {
                kind: $crate::interpreter::ast_walk::error::ErrorKind::MalformedForm,
                message: "Expected empty list".into(),
            }),
        }
    };

    ($list:expr, [$x:pat] => $expr:expr) => {
        match $list.shift() {
            Some(($x, tail)) if tail.is_empty() => Ok($expr),
            _ => Err($crate::interpreter::ast_walk::error::RuntimeError {
                kind: $crate::interpreter::ast_walk::error::ErrorKind::MalformedForm,
                message: "Expected list of length 1".into(),
            }),
        }
    };

    ($list:expr, [$x:pat, $y:pat] => $expr:expr) => {
        match $list.shift() {
            Some(($x, tail)) => match tail.shift() {
                Some(($y, tail)) if tail.is_empty() => Ok($expr),
                _ => Err($crate::interpreter::ast_walk::error::RuntimeError {
                    kind: $crate::interpreter::ast_walk::error::ErrorKind::MalformedForm,
                    message: "Expected list of length 2".into(),
                }),
            },
            _ => Err($crate::interpreter::ast_walk::error::RuntimeError {
                kind: $crate::interpreter::ast_walk::error::ErrorKind::MalformedForm,
                message: "Expected list of length 2".into(),
            }),
        }
    };

    ($list:expr, [$x:pat, $y:pat, $z:pat] => $expr:expr) => {
        match $list.shift() {
            Some(($x, tail)) => match tail.shift() {
                Some(($y, tail)) => match tail.shift() {
                    Some(($z, tail)) if tail.is_empty() => Ok($expr),
                    _ => Err($crate::interpreter::ast_walk::error::RuntimeError {
                        kind: $crate::interpreter::ast_walk::error::ErrorKind::MalformedForm,
                        message: "Expected list of length 3".into(),
                    }),
                },
                _ => Err($crate::interpreter::ast_walk::error::RuntimeError {
                    kind: $crate::interpreter::ast_walk::error::ErrorKind::MalformedForm,
                    message: "Expected list of length 3".into(),
                }),
            },
            _ => Err($crate::interpreter::ast_walk::error::RuntimeError {
                kind: $crate::interpreter::ast_walk::error::ErrorKind::MalformedForm,
                message: "Expected list of length 3".into(),
            }),
        }
    };

    ($list:expr, head: $x:pat, tail: $xs:pat => $expr:expr) => {
        match $list.shift() {
            Some(($x, $xs)) => Ok($expr),
            _ => Err($crate::interpreter::ast_walk::error::RuntimeError {
                kind: $crate::interpreter::ast_walk::error::ErrorKind::MalformedForm,
                message: "Expected non-empty list".into(),
            }),
        }
    };
}

impl List {
    pub fn new() -> List { List::Null }

    pub fn from_vec(src: Vec<Value>) -> List { src.into_iter().rfold(List::Null, |acc, val| acc.unshift(val)) }

    pub fn from_nodes(nodes: &[Node]) -> List { List::from_vec(nodes.iter().map(Value::from_node).collect()) }

    pub fn is_empty(&self) -> bool { self == &List::Null }

    /// Null => None, (car . cdr) => Some((car, cdr))
    pub fn shift(self) -> Option<(Value, List)> {
        match self {
            List::Null => None,
            List::Cell(car, cdr) => Some((*car, *cdr)),
        }
    }

    /// car => (car self)
    pub fn unshift(self, car: Value) -> List { List::Cell(Box::new(car), Box::new(self)) }

    pub fn len(&self) -> usize {
        match self {
            List::Cell(_, ref cdr) => 1 + cdr.len(),
            List::Null => 0,
        }
    }

    pub fn reverse(self) -> List { self.into_iter().fold(List::Null, |acc, val| acc.unshift(val)) }

    pub fn into_value(self) -> Value { Value::List(self) }

    pub fn into_vec(self) -> Vec<Value> { self.into_iter().collect() }
}

impl Default for List {
    fn default() -> Self { List::new() }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = ListIterator;

    fn into_iter(self) -> ListIterator { ListIterator(self) }
}

pub struct ListIterator(List);

impl Iterator for ListIterator {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        let (car, cdr) = std::mem::take(&mut self.0).shift()?;
        self.0 = cdr;
        Some(car)
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let strs: Vec<String> = self.clone().into_iter().map(|val| format!("{}", val)).collect();
        write!(f, "({})", strs.join(" "))
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let strs: Vec<String> = self.clone().into_iter().map(|val| format!("{:?}", val)).collect();
        write!(f, "({})", strs.join(" "))
    }
}
