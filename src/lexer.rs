use std::sync::LazyLock;

use regex::Regex;

use crate::{
    ast::{Token, TokenKind},
    error::TokenizeError,
};

/// Token patterns in priority order. The first pattern that matches at the
/// cursor wins, so keywords sit before the generic identifier pattern and
/// two-character symbols before their one-character prefixes.
static MATCHERS: LazyLock<Vec<(TokenKind, Regex)>> = LazyLock::new(|| {
    [
        (TokenKind::Transform, r"^TRANSFORM\("),
        (TokenKind::Field, r#"^FIELD\(\s*(?:"[^"]*"|'[^']*')\s*\)"#),
        (TokenKind::Logical, r"^(?:AND|OR|NOT)\b"),
        (TokenKind::Condition, r"^(?:TYPE|RANGE|MATCHES|IN|REQUIRED)\b"),
        (TokenKind::Operator, r"^(?:->|=>)"),
        (TokenKind::Condition, r"^(?:==|!=|>=|<=|>|<)"),
        (TokenKind::Value, r#"^(?:"[^"]*"|'[^']*')"#),
        (TokenKind::Value, r#"^\((?:"[^"]*"|'[^']*'|[^()"'])*\)"#),
        (TokenKind::Value, r"^-?\d+(?:\.\d+)?\b"),
        (TokenKind::Separator, r"^,"),
        (TokenKind::Field, r"^[A-Za-z0-9_.]+"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("valid token pattern")))
    .collect()
});

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.remaining();
        self.position += rest.len() - rest.trim_start().len();
    }

    /// Next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, TokenizeError> {
        self.skip_whitespace();

        let rest = self.remaining();
        if rest.is_empty() {
            return Ok(None);
        }

        for (kind, pattern) in MATCHERS.iter() {
            if let Some(m) = pattern.find(rest) {
                self.position += m.end();
                return Ok(Some(Token::new(*kind, m.as_str())));
            }
        }

        Err(TokenizeError::UnexpectedToken {
            remaining: rest.trim_end().to_string(),
        })
    }

    /// Consumes the whole input. Fails on the first unmatched position.
    pub fn tokenize(mut self) -> Result<Vec<Token>, TokenizeError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Tokenizes a rule string.
pub fn tokenize(text: &str) -> Result<Vec<Token>, TokenizeError> {
    Lexer::new(text).tokenize()
}

#[test]
fn test_keywords() {
    let tokens = tokenize("AND OR NOT TYPE RANGE MATCHES IN REQUIRED").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Logical,
            TokenKind::Logical,
            TokenKind::Logical,
            TokenKind::Condition,
            TokenKind::Condition,
            TokenKind::Condition,
            TokenKind::Condition,
            TokenKind::Condition,
        ]
    );
}

#[test]
fn test_rule() {
    let mut lexer = Lexer::new("age RANGE (18,30) AND city REQUIRED");
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Field, "age")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Condition, "RANGE")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Value, "(18,30)")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Logical, "AND")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Field, "city")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Condition, "REQUIRED")));
    assert_eq!(lexer.next_token().unwrap(), None);
}
