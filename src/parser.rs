use crate::{
    ast::{Expression, Leaf, Logical, LogicalOp, Operand, RuleSet, Token, TokenKind},
    error::ParseError,
};

/// Recursive-descent parser over a token slice with one token of lookahead.
pub struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser {
            tokens,
            position: 0,
        }
    }

    fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Advances past the current token if it has the expected kind.
    /// Leaves the cursor alone otherwise.
    fn consume(&mut self, kind: TokenKind) -> Option<&'t Token> {
        let token = self.current().filter(|t| t.kind == kind)?;
        self.position += 1;
        Some(token)
    }

    fn describe_current(&self) -> String {
        match self.current() {
            Some(token) => token.text.clone(),
            None => "end of input".to_string(),
        }
    }

    /// Parse a complete ruleset.
    ///
    /// ```text
    /// ruleset := expression ( [","] expression )*
    /// ```
    pub fn parse(&mut self) -> Result<RuleSet, ParseError> {
        let mut rules = vec![];

        while !self.at_end() {
            rules.push(self.parse_expression()?);
            self.consume(TokenKind::Separator);
        }

        Ok(RuleSet::new(rules))
    }

    /// ```text
    /// expression := FIELD CONDITION VALUE [ LOGICAL expression ]
    /// ```
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let field = self
            .consume(TokenKind::Field)
            .ok_or_else(|| ParseError::ExpectedField {
                found: self.describe_current(),
            })?;

        let condition =
            self.consume(TokenKind::Condition)
                .ok_or_else(|| ParseError::ExpectedCondition {
                    after: field.text.clone(),
                })?;

        let value = self.parse_value(condition)?;

        let expr = Expression::new(
            Leaf::new(field.kind, field.text.as_str()),
            Leaf::new(condition.kind, condition.text.as_str()),
            value,
        );

        match self.parse_logical() {
            Some(op) => {
                let rest = self.parse_expression()?;
                Ok(expr.with_next(Logical::new(op, rest)))
            }
            None => Ok(expr),
        }
    }

    fn parse_logical(&mut self) -> Option<LogicalOp> {
        let op = self
            .current()
            .filter(|t| t.kind == TokenKind::Logical)
            .and_then(|t| LogicalOp::from_keyword(&t.text))?;
        self.position += 1;
        Some(op)
    }

    fn parse_value(&mut self, condition: &Token) -> Result<Operand, ParseError> {
        // A bare word after REQUIRED starts the next rule, so only a literal
        // is taken as its (ignored) value.
        if condition.text == "REQUIRED" {
            return match self.consume(TokenKind::Value) {
                Some(token) => value_operand(token),
                None => Ok(Operand::Omitted),
            };
        }

        if let Some(token) = self.consume(TokenKind::Value) {
            return value_operand(token);
        }

        // Bare words such as INT or STRING
        if let Some(token) = self.consume(TokenKind::Field) {
            return Ok(Operand::Scalar(Leaf::new(token.kind, token.text.as_str())));
        }

        Err(ParseError::ExpectedValue {
            after: condition.text.clone(),
        })
    }
}

fn value_operand(token: &Token) -> Result<Operand, ParseError> {
    if token.text.starts_with('(') {
        split_list(&token.text).map(Operand::List)
    } else {
        Ok(Operand::Scalar(Leaf::new(token.kind, token.text.as_str())))
    }
}

/// Splits `(a, "b,c", 'd')` into its items, honouring quotes.
fn split_list(text: &str) -> Result<Vec<Leaf>, ParseError> {
    let malformed = || ParseError::MalformedList {
        text: text.to_string(),
    };

    let inner = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(malformed)?;

    if inner.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut items = vec![];
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in inner.chars() {
        match (quote, ch) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                current.push(ch);
            }
            (None, ',') => {
                items.push(list_item(&current).ok_or_else(malformed)?);
                current.clear();
            }
            (None, c) => current.push(c),
        }
    }

    if quote.is_some() {
        return Err(malformed());
    }
    items.push(list_item(&current).ok_or_else(malformed)?);

    Ok(items)
}

fn list_item(raw: &str) -> Option<Leaf> {
    let item = raw.trim();
    (!item.is_empty()).then(|| Leaf::new(TokenKind::Value, item))
}

/// Parses a token stream into a ruleset.
pub fn parse(tokens: &[Token]) -> Result<RuleSet, ParseError> {
    Parser::new(tokens).parse()
}
