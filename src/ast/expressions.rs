use crate::ast::{LogicalOp, RuleSet, TokenKind};

/// Any node of the rule tree.
///
/// Children are owned exclusively by their parent; the tree is never shared
/// and never cyclic, so a parsed tree can be evaluated from several threads
/// at once.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Top-level rules in declaration order
    Root(RuleSet),

    /// `field CONDITION value [LOGICAL expression]`
    Expression(Expression),

    /// Logical combination owning all of its operands
    Logical(LogicalNode),

    /// Field name, condition keyword, or literal
    Leaf(Leaf),
}

impl Node {
    /// Short name of the node kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Root(_) => "ROOT",
            Node::Expression(_) => "EXPRESSION",
            Node::Logical(_) => "LOGICAL",
            Node::Leaf(leaf) => leaf.kind.name(),
        }
    }
}

impl From<RuleSet> for Node {
    fn from(rules: RuleSet) -> Self {
        Node::Root(rules)
    }
}

impl From<Expression> for Node {
    fn from(expr: Expression) -> Self {
        Node::Expression(expr)
    }
}

impl From<LogicalNode> for Node {
    fn from(node: LogicalNode) -> Self {
        Node::Logical(node)
    }
}

/// Terminal node: a token carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub kind: TokenKind,
    pub text: String,
}

impl Leaf {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Leaf {
            kind,
            text: text.into(),
        }
    }

    /// Text without one pair of surrounding quotes, if present.
    ///
    /// # Examples
    /// ```text
    /// "New York"  ->  New York
    /// 'abc'       ->  abc
    /// 42          ->  42
    /// ```
    pub fn unquoted(&self) -> &str {
        strip_quotes(&self.text)
    }

    /// Column name this leaf refers to, with any `FIELD("...")` wrapper
    /// removed.
    ///
    /// # Examples
    /// ```text
    /// age                 ->  age
    /// FIELD("first name") ->  first name
    /// ```
    pub fn field_name(&self) -> &str {
        self.text
            .strip_prefix("FIELD(")
            .and_then(|rest| rest.strip_suffix(')'))
            .map(|inner| strip_quotes(inner.trim()))
            .unwrap_or(&self.text)
    }
}

/// Removes one pair of matching `"` or `'` quotes around `text`.
pub fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2
            && let Some(inner) = text.strip_prefix(quote).and_then(|t| t.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

/// The value position of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Single literal or bare word
    ///
    /// # Examples
    /// ```text
    /// INT
    /// "^[a-z]+$"
    /// 18
    /// ```
    Scalar(Leaf),

    /// Parenthesized, comma-separated list
    ///
    /// # Examples
    /// ```text
    /// (18,30)
    /// ("New York","Boston")
    /// ```
    List(Vec<Leaf>),

    /// No value written; only `REQUIRED` may omit it
    Omitted,
}

impl Operand {
    pub fn items(&self) -> &[Leaf] {
        match self {
            Operand::Scalar(leaf) => std::slice::from_ref(leaf),
            Operand::List(items) => items,
            Operand::Omitted => &[],
        }
    }
}

/// One rule: a field, a condition, a value, and an optional logical suffix
/// chaining the next rule.
///
/// Chains lean right: `a AND b OR c` is `a AND (b OR c)`, and the first rule
/// of the chain is always checked first.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub field: Leaf,
    pub condition: Leaf,
    pub value: Operand,
    pub next: Option<Logical>,
}

impl Expression {
    pub fn new(field: Leaf, condition: Leaf, value: Operand) -> Self {
        Expression {
            field,
            condition,
            value,
            next: None,
        }
    }

    pub fn with_next(mut self, next: Logical) -> Self {
        self.next = Some(next);
        self
    }

    /// Number of rules in this chain, this one included.
    pub fn chain_len(&self) -> usize {
        1 + self.next.as_ref().map_or(0, |next| next.rest().chain_len())
    }
}

/// Logical suffix. The owning expression is the left-hand operand; the
/// boxed expression is the rest of the chain.
///
/// `Not` is unary: its verdict depends on the owning expression alone. The
/// trailing expression is kept so the rule can be printed back verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Logical {
    And(Box<Expression>),
    Or(Box<Expression>),
    Not(Box<Expression>),
}

impl Logical {
    pub fn new(op: LogicalOp, rest: Expression) -> Self {
        let rest = Box::new(rest);
        match op {
            LogicalOp::And => Logical::And(rest),
            LogicalOp::Or => Logical::Or(rest),
            LogicalOp::Not => Logical::Not(rest),
        }
    }

    pub fn op(&self) -> LogicalOp {
        match self {
            Logical::And(_) => LogicalOp::And,
            Logical::Or(_) => LogicalOp::Or,
            Logical::Not(_) => LogicalOp::Not,
        }
    }

    pub fn rest(&self) -> &Expression {
        match self {
            Logical::And(rest) | Logical::Or(rest) | Logical::Not(rest) => rest,
        }
    }
}

/// A logical operator together with its operands.
///
/// `And` and `Or` are binary; `Not` is unary and negates its one operand.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalNode {
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
}

impl LogicalNode {
    /// Splits the head of a chain off its logical suffix.
    ///
    /// The left operand is `expr` without its suffix; the right operand is
    /// the rest of the chain. `NOT` keeps only the left operand. Returns
    /// `None` when `expr` is not chained.
    ///
    /// # Examples
    /// ```text
    /// a AND b OR c  ->  And(a, b OR c)
    /// a NOT b       ->  Not(a)
    /// ```
    pub fn from_chain(expr: &Expression) -> Option<Self> {
        let next = expr.next.as_ref()?;
        let head = Box::new(Expression {
            next: None,
            ..expr.clone()
        });

        Some(match next {
            Logical::And(rest) => LogicalNode::And(head, rest.clone()),
            Logical::Or(rest) => LogicalNode::Or(head, rest.clone()),
            Logical::Not(_) => LogicalNode::Not(head),
        })
    }

    pub fn op(&self) -> LogicalOp {
        match self {
            LogicalNode::And(..) => LogicalOp::And,
            LogicalNode::Or(..) => LogicalOp::Or,
            LogicalNode::Not(_) => LogicalOp::Not,
        }
    }
}
