use std::fmt;

/// Logical keyword joining a rule to the next one in its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `NOT`
    Not,
}

impl LogicalOp {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "AND" => Some(LogicalOp::And),
            "OR" => Some(LogicalOp::Or),
            "NOT" => Some(LogicalOp::Not),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
            LogicalOp::Not => "NOT",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Comparison symbols accepted in condition position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
}

impl Comparison {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Equal => "==",
            Comparison::NotEqual => "!=",
            Comparison::GreaterThan => ">",
            Comparison::LessThan => "<",
            Comparison::GreaterEqual => ">=",
            Comparison::LessEqual => "<=",
        }
    }
}

/// What a rule checks. Resolved from the condition token's text at
/// evaluation time, so an unknown keyword parses fine and fails per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// `TYPE` - value parses as the named type
    Type,
    /// `RANGE` - numeric value within an inclusive `(min,max)`
    Range,
    /// `MATCHES` - value matches a regular expression
    Matches,
    /// `IN` - value is one of a list
    In,
    /// `REQUIRED` - value is not blank
    Required,
    /// Comparison symbol against a literal
    Compare(Comparison),
}

impl Condition {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let condition = match keyword {
            "TYPE" => Condition::Type,
            "RANGE" => Condition::Range,
            "MATCHES" => Condition::Matches,
            "IN" => Condition::In,
            "REQUIRED" => Condition::Required,
            "==" => Condition::Compare(Comparison::Equal),
            "!=" => Condition::Compare(Comparison::NotEqual),
            ">" => Condition::Compare(Comparison::GreaterThan),
            "<" => Condition::Compare(Comparison::LessThan),
            ">=" => Condition::Compare(Comparison::GreaterEqual),
            "<=" => Condition::Compare(Comparison::LessEqual),
            _ => return None,
        };
        Some(condition)
    }
}

/// Type names understood by `TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    /// Anything
    String,
    /// Signed integer
    Int,
    /// Floating point number
    Float,
    /// `true`/`false` and the usual spellings
    Bool,
    /// Calendar date, `YYYY-MM-DD`
    Date,
}

impl TypeName {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "STRING" => Some(TypeName::String),
            "INT" => Some(TypeName::Int),
            "FLOAT" => Some(TypeName::Float),
            "BOOL" => Some(TypeName::Bool),
            "DATE" => Some(TypeName::Date),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            TypeName::String => "STRING",
            TypeName::Int => "INT",
            TypeName::Float => "FLOAT",
            TypeName::Bool => "BOOL",
            TypeName::Date => "DATE",
        }
    }
}
