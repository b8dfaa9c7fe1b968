pub mod lexer;
pub mod parser;

/// Parse a single form from program text. Tokens past the first complete
/// form are left unconsumed; use [`parser::parse`] to read them all.
pub fn read(src: &str) -> Result<parser::Node, parser::ParseError> {
    let tokens = lexer::tokenize(src);
    let (node, _rest) = parser::parse_one(&tokens)?;
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::parser::{Node, ParseError};
    use super::read;

    #[test]
    fn test_read_one_form_from_text() {
        assert_eq!(
            read("(+ 1 2)").unwrap(),
            Node::List(vec![Node::Identifier("+".to_string()), Node::Integer(1), Node::Integer(2)])
        );
        // only the first form is consumed
        assert_eq!(read("1 2 3").unwrap(), Node::Integer(1));
        assert_eq!(read("").unwrap_err(), ParseError::UnexpectedEndOfInput);
    }
}
