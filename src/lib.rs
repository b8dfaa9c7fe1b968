pub mod interpreter;
pub mod reader;

pub use interpreter::ast_walk::{eval, eval_nodes, Env, ErrorKind, RuntimeError, Value};
pub use interpreter::{parse_code, Interpreter};
pub use reader::parser::{parse, Node, ParseError};
pub use reader::read;
