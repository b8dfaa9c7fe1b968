use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::interpreter::ast_walk::env::Env;
use crate::interpreter::ast_walk::error::{ErrorKind, RuntimeError};
use crate::interpreter::ast_walk::list::List;
use crate::interpreter::ast_walk::value::Value;

use crate::{match_list, runtime_error};

/// A callable value: a user lambda closing over its defining frame, or a
/// named native from the built-in table. Immutable after creation; the
/// captured frame is shared, not copied, which is what makes the lambda a
/// closure over its defining scope.
#[derive(Clone)]
pub enum Procedure {
    Lambda(Vec<String>, Box<Value>, Rc<RefCell<Env>>),
    Native(&'static str),
}

impl PartialEq for Procedure {
    /// Lambdas compare their captured frame by identity, not contents: a
    /// frame may (through the lambda itself) contain the value under
    /// comparison, and deep equality would chase that loop forever.
    fn eq(&self, other: &Procedure) -> bool {
        match (self, other) {
            (Procedure::Lambda(params_l, body_l, env_l), Procedure::Lambda(params_r, body_r, env_r)) => {
                params_l == params_r && body_l == body_r && Rc::ptr_eq(env_l, env_r)
            }
            (Procedure::Native(l), Procedure::Native(r)) => l == r,
            _ => false,
        }
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Procedure::Lambda(_, _, _) => write!(f, "#<procedure>"),
            Procedure::Native(ref name) => write!(f, "#<procedure:{}>", name),
        }
    }
}

/// Names pre-bound in the global frame, each dispatching to [`primitive`].
pub static BUILTIN_NAMES: &[&str] = &[
    "+", "-", "*", "/", ">", "<", ">=", "<=", "=", "equal?", "eq?", "not", "cons", "car", "cdr", "append", "list", "length", "list?",
    "null?", "symbol?", "display", "displayln", "newline",
];

fn as_number(f: &str, val: &Value) -> Result<f64, RuntimeError> {
    match *val {
        Value::Integer(n) => Ok(n as f64),
        Value::Float(n) => Ok(n),
        ref val => runtime_error!(ErrorKind::TypeMismatch, "`{}` expects numbers, but got: {:?}", f, val),
    }
}

/// `eq?` identity: atoms by value, composite values only when both are the
/// empty list.
fn eq_identity(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::List(a), Value::List(b)) => a.is_empty() && b.is_empty(),
        _ => l == r,
    }
}

pub fn primitive(f: &'static str, args: List) -> Result<Value, RuntimeError> {
    match f {
        "+" => args.into_iter().try_fold(Value::Integer(0), |acc, arg| acc + arg),
        "*" => args.into_iter().try_fold(Value::Integer(1), |acc, arg| acc * arg),
        "-" => match args.len() {
            0 => runtime_error!(ErrorKind::ArityMismatch, "`-` requires at least one argument"),
            1 => {
                let val = match_list!(args, [val] => val)?;
                -val
            }
            _ => {
                let mut iter = args.into_iter();
                let initial = iter.next().unwrap(); // it's okay because len > 1
                iter.try_fold(initial, |acc, arg| acc - arg)
            }
        },
        "/" => match args.len() {
            0 => runtime_error!(ErrorKind::ArityMismatch, "`/` requires at least one argument"),
            1 => match match_list!(args, [val] => val)? {
                Value::Integer(0) => runtime_error!(ErrorKind::DivisionByZero, "Division by zero"),
                Value::Integer(val) => Ok(Value::Float(1.0 / val as f64)),
                Value::Float(val) if val == 0.0 => runtime_error!(ErrorKind::DivisionByZero, "Division by zero"),
                Value::Float(val) => Ok(Value::Float(1.0 / val)),
                val => runtime_error!(ErrorKind::TypeMismatch, "Expected a number, but got: {:?}", val),
            },
            _ => {
                let mut iter = args.into_iter();
                let initial = iter.next().unwrap(); // it's okay because len > 1
                iter.try_fold(initial, |acc, arg| acc / arg)
            }
        },
        ">" | "<" | ">=" | "<=" | "=" => {
            if args.len() != 2 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly two arguments to {}: {:?}", f, args);
            }
            let (l, r) = match_list!(args, [l, r] => (l, r))?;
            let (l, r) = (as_number(f, &l)?, as_number(f, &r)?);
            let result = match f {
                ">" => l > r,
                "<" => l < r,
                ">=" => l >= r,
                "<=" => l <= r,
                _ => l == r,
            };
            Ok(Value::Boolean(result))
        }
        "equal?" => {
            if args.len() != 2 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly two arguments to equal?: {:?}", args);
            }
            match_list!(args, [l, r] => Value::Boolean(l == r))
        }
        "eq?" => {
            if args.len() != 2 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly two arguments to eq?: {:?}", args);
            }
            match_list!(args, [l, r] => Value::Boolean(eq_identity(&l, &r)))
        }
        "not" => {
            if args.len() != 1 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly one argument to not: {:?}", args);
            }
            match_list!(args, [val] => Value::Boolean(!val.is_truthy()))
        }
        "cons" => {
            if args.len() != 2 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly two arguments to cons: {:?}", args);
            }
            match_list!(args, [elem, rest] => rest.into_list()?.unshift(elem).into_value())
        }
        "car" => {
            if args.len() != 1 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly one argument to car: {:?}", args);
            }
            let list = match_list!(args, [val] => val)?.into_list()?;
            match list.shift() {
                Some((car, _)) => Ok(car),
                None => runtime_error!(ErrorKind::EmptyListAccess, "Can't take car of an empty list"),
            }
        }
        "cdr" => {
            if args.len() != 1 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly one argument to cdr: {:?}", args);
            }
            let list = match_list!(args, [val] => val)?.into_list()?;
            match list.shift() {
                Some((_, cdr)) => Ok(cdr.into_value()),
                None => runtime_error!(ErrorKind::EmptyListAccess, "Can't take cdr of an empty list"),
            }
        }
        "append" => {
            if args.len() != 2 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly two arguments to append: {:?}", args);
            }
            match_list!(args, [front_raw, back_raw] => {
                let front = front_raw.into_list()?;
                let mut back = back_raw.into_list()?;
                for elem in front.reverse() {
                    back = back.unshift(elem);
                }
                back.into_value()
            })
        }
        "list" => Ok(args.into_value()),
        "length" => {
            if args.len() != 1 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly one argument to length: {:?}", args);
            }
            let list = match_list!(args, [val] => val)?.into_list()?;
            Ok(Value::Integer(list.len() as i64))
        }
        "list?" => {
            if args.len() != 1 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly one argument to list?: {:?}", args);
            }
            match_list!(args, [val] => Value::Boolean(matches!(val, Value::List(_))))
        }
        "null?" => {
            if args.len() != 1 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly one argument to null?: {:?}", args);
            }
            match_list!(args, [val] => {
                match val {
                    Value::List(list) => Value::Boolean(list.is_empty()),
                    _ => Value::Boolean(false),
                }
            })
        }
        "symbol?" => {
            if args.len() != 1 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly one argument to symbol?: {:?}", args);
            }
            match_list!(args, [val] => Value::Boolean(matches!(val, Value::Symbol(_))))
        }
        "display" => {
            if args.len() != 1 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly one argument to display: {:?}", args);
            }
            let val = match_list!(args, [val] => val)?;
            print!("{}", val);
            Ok(Value::Unspecified)
        }
        "displayln" => {
            if args.len() != 1 {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly one argument to displayln: {:?}", args);
            }
            let val = match_list!(args, [val] => val)?;
            println!("{}", val);
            Ok(Value::Unspecified)
        }
        "newline" => {
            if !args.is_empty() {
                runtime_error!(ErrorKind::ArityMismatch, "Must supply exactly zero arguments to newline: {:?}", args);
            }
            println!();
            Ok(Value::Unspecified)
        }
        _ => runtime_error!(ErrorKind::NotApplicable, "Unknown primitive: {:?}", f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(vals: &[i64]) -> List { List::from_vec(vals.iter().map(|n| Value::Integer(*n)).collect()) }

    #[test]
    fn test_variadic_arithmetic() {
        assert_eq!(primitive("+", ints(&[])).unwrap(), Value::Integer(0));
        assert_eq!(primitive("+", ints(&[1, 2, 3])).unwrap(), Value::Integer(6));
        assert_eq!(primitive("*", ints(&[2, 3, 4])).unwrap(), Value::Integer(24));
        assert_eq!(primitive("-", ints(&[10, 1, 2])).unwrap(), Value::Integer(7));
        assert_eq!(primitive("-", ints(&[3])).unwrap(), Value::Integer(-3));
    }

    #[test]
    fn test_reciprocal_and_division() {
        assert_eq!(primitive("/", ints(&[10, 4])).unwrap(), Value::Integer(2));
        assert_eq!(primitive("/", ints(&[2])).unwrap(), Value::Float(0.5));
        assert_eq!(primitive("/", ints(&[1, 0])).unwrap_err().kind, ErrorKind::DivisionByZero);
        assert_eq!(primitive("/", ints(&[0])).unwrap_err().kind, ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_comparisons_mix_integer_and_float() {
        assert_eq!(primitive("<", ints(&[1, 2])).unwrap(), Value::Boolean(true));
        assert_eq!(primitive(">=", ints(&[2, 2])).unwrap(), Value::Boolean(true));
        let args = List::from_vec(vec![Value::Integer(2), Value::Float(2.0)]);
        assert_eq!(primitive("=", args).unwrap(), Value::Boolean(true));
        let args = List::from_vec(vec![Value::Symbol("a".to_string()), Value::Integer(1)]);
        assert_eq!(primitive("<", args).unwrap_err().kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_list_operations() {
        let cons_args = List::from_vec(vec![Value::Integer(1), ints(&[2, 3]).into_value()]);
        assert_eq!(primitive("cons", cons_args).unwrap(), ints(&[1, 2, 3]).into_value());

        let car_args = List::from_vec(vec![ints(&[1, 2]).into_value()]);
        assert_eq!(primitive("car", car_args).unwrap(), Value::Integer(1));

        let cdr_args = List::from_vec(vec![ints(&[1, 2]).into_value()]);
        assert_eq!(primitive("cdr", cdr_args).unwrap(), ints(&[2]).into_value());

        let append_args = List::from_vec(vec![ints(&[1, 2]).into_value(), ints(&[3]).into_value()]);
        assert_eq!(primitive("append", append_args).unwrap(), ints(&[1, 2, 3]).into_value());

        assert_eq!(primitive("list", ints(&[1, 2])).unwrap(), ints(&[1, 2]).into_value());

        let len_args = List::from_vec(vec![ints(&[1, 2, 3]).into_value()]);
        assert_eq!(primitive("length", len_args).unwrap(), Value::Integer(3));
    }

    #[test]
    fn test_car_and_cdr_of_empty_list() {
        let args = List::from_vec(vec![List::Null.into_value()]);
        assert_eq!(primitive("car", args).unwrap_err().kind, ErrorKind::EmptyListAccess);
        let args = List::from_vec(vec![List::Null.into_value()]);
        assert_eq!(primitive("cdr", args).unwrap_err().kind, ErrorKind::EmptyListAccess);
    }

    #[test]
    fn test_predicates() {
        let args = List::from_vec(vec![List::Null.into_value()]);
        assert_eq!(primitive("null?", args).unwrap(), Value::Boolean(true));
        let args = List::from_vec(vec![Value::Integer(1)]);
        assert_eq!(primitive("null?", args).unwrap(), Value::Boolean(false));
        let args = List::from_vec(vec![Value::Symbol("a".to_string())]);
        assert_eq!(primitive("symbol?", args).unwrap(), Value::Boolean(true));
        let args = List::from_vec(vec![ints(&[1]).into_value()]);
        assert_eq!(primitive("list?", args).unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_equal_is_structural_eq_is_identity() {
        let args = List::from_vec(vec![ints(&[1, 2]).into_value(), ints(&[1, 2]).into_value()]);
        assert_eq!(primitive("equal?", args).unwrap(), Value::Boolean(true));

        let args = List::from_vec(vec![ints(&[1, 2]).into_value(), ints(&[1, 2]).into_value()]);
        assert_eq!(primitive("eq?", args).unwrap(), Value::Boolean(false));

        let args = List::from_vec(vec![List::Null.into_value(), List::Null.into_value()]);
        assert_eq!(primitive("eq?", args).unwrap(), Value::Boolean(true));

        let args = List::from_vec(vec![Value::Symbol("a".to_string()), Value::Symbol("a".to_string())]);
        assert_eq!(primitive("eq?", args).unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_not() {
        let args = List::from_vec(vec![Value::Boolean(false)]);
        assert_eq!(primitive("not", args).unwrap(), Value::Boolean(true));
        let args = List::from_vec(vec![Value::Integer(0)]);
        assert_eq!(primitive("not", args).unwrap(), Value::Boolean(false));
    }

    #[test]
    fn test_builtin_arity_errors() {
        assert_eq!(primitive("-", List::Null).unwrap_err().kind, ErrorKind::ArityMismatch);
        assert_eq!(primitive("<", ints(&[1])).unwrap_err().kind, ErrorKind::ArityMismatch);
        assert_eq!(primitive("car", ints(&[])).unwrap_err().kind, ErrorKind::ArityMismatch);
    }
}
