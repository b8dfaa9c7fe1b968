use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reader::lexer::Token;

/// A parsed form. Nodes are immutable once built; the evaluator only reads
/// them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Node {
    Identifier(String),
    Integer(i64),
    Float(f64),
    List(Vec<Node>),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Identifier(name) => write!(f, "{}", name),
            Node::Integer(val) => write!(f, "{}", val),
            Node::Float(val) => write!(f, "{}", val),
            Node::List(items) => {
                let strs: Vec<String> = items.iter().map(|item| format!("{}", item)).collect();
                write!(f, "({})", strs.join(" "))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The token sequence ran out while a form was still open.
    UnexpectedEndOfInput,
    /// A `)` appeared with no enclosing `(`.
    UnmatchedCloseParen,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::UnexpectedEndOfInput => write!(f, "SyntaxError: unexpected end of input while reading"),
            ParseError::UnmatchedCloseParen => write!(f, "SyntaxError: unexpected `)`"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Classify one atom token: integer first, then float, else a symbol.
/// Every token text is representable as at least a symbol.
fn atom(text: &str) -> Node {
    if let Ok(val) = text.parse::<i64>() {
        return Node::Integer(val);
    }
    if let Ok(val) = text.parse::<f64>() {
        return Node::Float(val);
    }
    Node::Identifier(text.to_string())
}

/// Read the next complete form off the front of `tokens`, returning it along
/// with the unconsumed remainder.
pub fn parse_one(tokens: &[Token]) -> Result<(Node, &[Token]), ParseError> {
    let (token, mut rest) = tokens.split_first().ok_or(ParseError::UnexpectedEndOfInput)?;
    match token.as_str() {
        "(" => {
            let mut items = Vec::new();
            loop {
                match rest.first().map(Token::as_str) {
                    Some(")") => break,
                    Some(_) => {
                        let (item, remaining) = parse_one(rest)?;
                        items.push(item);
                        rest = remaining;
                    }
                    None => return Err(ParseError::UnexpectedEndOfInput),
                }
            }
            Ok((Node::List(items), &rest[1..]))
        }
        ")" => Err(ParseError::UnmatchedCloseParen),
        text => Ok((atom(text), rest)),
    }
}

/// Read every top-level form in the token sequence.
pub fn parse(tokens: &[Token]) -> Result<Vec<Node>, ParseError> {
    let mut rest = tokens;
    let mut nodes = Vec::new();
    while !rest.is_empty() {
        let (node, remaining) = parse_one(rest)?;
        nodes.push(node);
        rest = remaining;
    }
    Ok(nodes)
}
