use std::fmt;

/// One lexical fragment: a parenthesis or an opaque run of atom text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token(pub String);

impl Token {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Split program text into tokens: pad every parenthesis with spaces so it
/// becomes its own token, then split on whitespace runs. There are no string
/// literals, comments, or escapes, so this stage never fails.
pub fn tokenize(src: &str) -> Vec<Token> {
    src.replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .map(|text| Token(text.to_string()))
        .collect()
}
