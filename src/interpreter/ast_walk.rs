pub mod env;
pub mod error;
pub mod list;
pub mod procedure;
pub mod special;
pub mod value;


use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::reader::parser::Node;
use crate::{match_list, runtime_error, shift_or_error};

pub use env::Env;
pub use error::{ErrorKind, RuntimeError};
pub use list::List;
pub use procedure::{primitive, Procedure};
pub use special::{SpecialForm, SPECIAL_FORMS};
pub use value::Value;

/// Evaluate a sequence of top-level forms against `env`, yielding the value
/// of the last one. An empty program yields the unit value.
pub fn eval_nodes(nodes: &[Node], env: Rc<RefCell<Env>>) -> Result<Value, RuntimeError> {
    let mut result = Value::Unspecified;
    for node in nodes {
        result = eval(Value::from_node(node), env.clone())?;
    }
    Ok(result)
}

/// Evaluate one expression in the given frame. Recursion into
/// sub-expressions and closure bodies rides the host call stack directly;
/// there is no trampoline or depth bound.
pub fn eval(expr: Value, env: Rc<RefCell<Env>>) -> Result<Value, RuntimeError> {
    trace!("eval {:?}", expr);
    match expr {
        Value::Symbol(ref name) => {
            let found = env.borrow().get(name);
            match found {
                Some(val) => Ok(val),
                None => runtime_error!(ErrorKind::UnboundVariable, "Identifier not found: {}", name),
            }
        }
        Value::List(form) => eval_combination(form, env),
        // numbers, booleans, procedures and the unit value are self-evaluating
        other => Ok(other),
    }
}

fn eval_combination(form: List, env: Rc<RefCell<Env>>) -> Result<Value, RuntimeError> {
    let (head, rest) = shift_or_error!(form, ErrorKind::MalformedForm, "Cannot evaluate an empty combination: ()");

    if let Value::Symbol(ref name) = head {
        if let Some(sf) = SPECIAL_FORMS.get(name.as_str()) {
            return eval_special(*sf, rest, env);
        }
    }

    let f = eval(head, env.clone())?;
    // operator first, then operands, all left to right in the caller's frame
    let mut args = Vec::with_capacity(rest.len());
    for operand in rest {
        args.push(eval(operand, env.clone())?);
    }
    apply(f, args)
}

fn eval_special(sf: SpecialForm, rest: List, env: Rc<RefCell<Env>>) -> Result<Value, RuntimeError> {
    match sf {
        SpecialForm::Quote => match_list!(rest, [expr] => expr),
        SpecialForm::If => {
            let (test, conseq, alt) = match_list!(rest, [test, conseq, alt] => (test, conseq, alt))?;
            if eval(test, env.clone())?.is_truthy() {
                eval(conseq, env)
            } else {
                eval(alt, env)
            }
        }
        SpecialForm::Set => {
            let (name, expr) = match_list!(rest, [name, expr] => (name.into_symbol()?, expr))?;
            let value = eval(expr, env.clone())?;
            env.borrow_mut().set(name, value)?;
            Ok(Value::Unspecified)
        }
        SpecialForm::Define => {
            let (name, expr) = match_list!(rest, [name, expr] => (name.into_symbol()?, expr))?;
            let value = eval(expr, env.clone())?;
            env.borrow_mut().define(name, value);
            Ok(Value::Unspecified)
        }
        SpecialForm::Lambda => {
            let (params, body) = match_list!(rest, [params, body] => (params, body))?;
            let names = params
                .into_list()?
                .into_iter()
                .map(|val| val.into_symbol())
                .collect::<Result<Vec<String>, RuntimeError>>()?;
            Ok(Value::Procedure(Procedure::Lambda(names, Box::new(body), env)))
        }
        SpecialForm::Begin => {
            let mut result = Value::Unspecified;
            for expr in rest {
                result = eval(expr, env.clone())?;
            }
            Ok(result)
        }
    }
}

/// Invoke a procedure value on already-evaluated arguments. A user lambda
/// gets a fresh call frame whose parent is its captured frame, never the
/// caller's.
pub fn apply(f: Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
    debug!("apply {:?} to {:?}", f, args);
    match f {
        Value::Procedure(Procedure::Native(name)) => primitive(name, List::from_vec(args)),
        Value::Procedure(Procedure::Lambda(names, body, captured)) => {
            let frame = Env::new_call_frame(captured, &names, args)?;
            eval(*body, frame)
        }
        val => runtime_error!(ErrorKind::NotApplicable, "Don't know how to apply: {:?}", val),
    }
}
