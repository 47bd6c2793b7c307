use std::fmt;

/// Kind of a lexical token.
///
/// The set is closed. Tokens carry no position, only their order in the
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Column reference
    ///
    /// # Examples
    /// ```text
    /// age
    /// customer.id
    /// FIELD("first name")
    /// ```
    Field,

    /// Condition keyword or comparison symbol
    ///
    /// # Examples
    /// ```text
    /// TYPE
    /// RANGE
    /// MATCHES
    /// IN
    /// REQUIRED
    /// >=
    /// ```
    Condition,

    /// Arrow operator
    ///
    /// # Examples
    /// ```text
    /// ->
    /// =>
    /// ```
    Operator,

    /// Quoted literal, number, or parenthesized list
    ///
    /// # Examples
    /// ```text
    /// "New York"
    /// 'abc'
    /// 42
    /// (18,30)
    /// ("New York","Boston")
    /// ```
    Value,

    /// Logical keyword
    ///
    /// # Examples
    /// ```text
    /// AND
    /// OR
    /// NOT
    /// ```
    Logical,

    /// Comma between rules
    Separator,

    /// Transform prefix, `TRANSFORM(`
    Transform,

    /// Never produced by the lexer; available to callers building token
    /// streams by hand.
    Invalid,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Field => "FIELD",
            TokenKind::Condition => "CONDITION",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Value => "VALUE",
            TokenKind::Logical => "LOGICAL",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::Transform => "TRANSFORM",
            TokenKind::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexical token: its kind plus the exact source text it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.text)
    }
}
