use std::{borrow::Cow, collections::HashMap};

use regex::Regex;

use crate::{
    ast::{
        Condition, Expression, Logical, LogicalNode, Node, Operand, RuleSet, TokenKind,
        expressions::strip_quotes,
    },
    conditions::{
        check_comparison, check_in, check_matches, check_range, check_required, check_type,
        compile_pattern,
    },
    error::ValidationError,
    output::operand_to_text,
    record::FieldMap,
};

/// The validation evaluator.
///
/// Walks a rule tree against one record's [`FieldMap`]. Evaluation never
/// mutates the tree or the evaluator, so one evaluator can serve many
/// records, and many threads, at once.
#[derive(Debug, Default, Clone)]
pub struct Evaluator {
    /// `MATCHES` patterns compiled ahead of time, keyed by pattern text
    patterns: HashMap<String, Regex>,
}

impl Evaluator {
    /// Creates an evaluator with no precompiled patterns. `MATCHES` patterns
    /// are then compiled on every check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with every valid `MATCHES` pattern of `rules`
    /// compiled up front.
    ///
    /// Patterns that do not compile are left out; they still fail with
    /// [`ValidationError::InvalidPattern`] when a record reaches them.
    pub fn for_rules(rules: &RuleSet) -> Self {
        let mut patterns = HashMap::new();

        for rule in rules {
            let mut current = Some(rule);
            while let Some(expr) = current {
                if Condition::from_keyword(&expr.condition.text) == Some(Condition::Matches) {
                    let text = operand_str(&expr.value);
                    if !patterns.contains_key(&*text)
                        && let Ok(regex) = compile_pattern(&text)
                    {
                        patterns.insert(text.into_owned(), regex);
                    }
                }
                current = expr.next.as_ref().map(Logical::rest);
            }
        }

        Evaluator { patterns }
    }

    /// Evaluates any node against a record.
    ///
    /// # Examples
    ///
    /// ```
    /// use fractal::{Evaluator, FieldMap, Node};
    /// use fractal::{lexer::tokenize, parser::parse};
    ///
    /// let tokens = tokenize("age TYPE INT").unwrap();
    /// let rules = parse(&tokens).unwrap();
    ///
    /// let header = ["name", "age"];
    /// let row = ["John", "25"];
    /// let fields = FieldMap::from_row(&header, &row).unwrap();
    ///
    /// let evaluator = Evaluator::for_rules(&rules);
    /// assert!(evaluator.evaluate(&Node::Root(rules), &fields).is_ok());
    /// ```
    pub fn evaluate(&self, node: &Node, fields: &FieldMap<'_>) -> Result<(), ValidationError> {
        match node {
            Node::Root(rules) => self.eval_rules(rules, fields),
            Node::Expression(expr) => self.eval_expression(expr, fields),
            Node::Logical(logical) => self.eval_logical(logical, fields),
            // Field names and literals are consumed by their expression
            Node::Leaf(leaf) if matches!(leaf.kind, TokenKind::Field | TokenKind::Value) => Ok(()),
            other => Err(ValidationError::UnknownNodeKind(other.kind_name().to_string())),
        }
    }

    /// Evaluates top-level rules in order. The first failure wins and the
    /// remaining rules are not evaluated.
    pub fn eval_rules(&self, rules: &RuleSet, fields: &FieldMap<'_>) -> Result<(), ValidationError> {
        for rule in rules {
            self.eval_expression(rule, fields)?;
        }
        Ok(())
    }

    /// Evaluates one rule and the chain hanging off it.
    ///
    /// Both operands of `AND` and `OR` are always evaluated; their own
    /// errors are replaced by the logical failure. `NOT` looks at the owning
    /// expression only, so nothing chained after it is checked.
    pub fn eval_expression(
        &self,
        expr: &Expression,
        fields: &FieldMap<'_>,
    ) -> Result<(), ValidationError> {
        let left = self.check(expr, fields);

        match &expr.next {
            None => left,
            Some(Logical::And(rest)) => all_of(left, self.eval_expression(rest, fields)),
            Some(Logical::Or(rest)) => any_of(left, self.eval_expression(rest, fields)),
            Some(Logical::Not(_)) => negate(left),
        }
    }

    /// Evaluates a standalone logical node, combining its operands the same
    /// way a chain does.
    pub fn eval_logical(
        &self,
        logical: &LogicalNode,
        fields: &FieldMap<'_>,
    ) -> Result<(), ValidationError> {
        match logical {
            LogicalNode::And(left, right) => all_of(
                self.eval_expression(left, fields),
                self.eval_expression(right, fields),
            ),
            LogicalNode::Or(left, right) => any_of(
                self.eval_expression(left, fields),
                self.eval_expression(right, fields),
            ),
            LogicalNode::Not(operand) => negate(self.eval_expression(operand, fields)),
        }
    }

    /// Checks a single `field CONDITION value` triple, ignoring any chain.
    fn check(&self, expr: &Expression, fields: &FieldMap<'_>) -> Result<(), ValidationError> {
        let name = expr.field.field_name();
        let raw = fields
            .get(name)
            .ok_or_else(|| ValidationError::FieldNotFound(name.to_string()))?;
        let value = strip_quotes(raw);

        let keyword = expr.condition.text.as_str();
        let condition = Condition::from_keyword(keyword)
            .ok_or_else(|| ValidationError::UnsupportedCondition(keyword.to_string()))?;

        match condition {
            Condition::Type => check_type(value, &operand_str(&expr.value)),
            Condition::Range => check_range(value, &expr.value),
            Condition::Matches => {
                let pattern = self.pattern(&operand_str(&expr.value))?;
                check_matches(value, &pattern)
            }
            Condition::In => check_in(value, expr.value.items()),
            Condition::Required => check_required(name, value),
            Condition::Compare(comparison) => {
                check_comparison(value, comparison, &operand_str(&expr.value))
            }
        }
    }

    fn pattern(&self, text: &str) -> Result<Cow<'_, Regex>, ValidationError> {
        match self.patterns.get(text) {
            Some(regex) => Ok(Cow::Borrowed(regex)),
            None => compile_pattern(text).map(Cow::Owned),
        }
    }
}

type Verdict = Result<(), ValidationError>;

fn all_of(left: Verdict, right: Verdict) -> Verdict {
    if left.is_ok() && right.is_ok() {
        Ok(())
    } else {
        Err(ValidationError::LogicalAndFailed)
    }
}

fn any_of(left: Verdict, right: Verdict) -> Verdict {
    if left.is_ok() || right.is_ok() {
        Ok(())
    } else {
        Err(ValidationError::LogicalOrFailed)
    }
}

fn negate(operand: Verdict) -> Verdict {
    match operand {
        Ok(()) => Err(ValidationError::LogicalNotFailed),
        Err(_) => Ok(()),
    }
}

/// Operand as a single string: the unquoted scalar, or the printed list.
fn operand_str(operand: &Operand) -> Cow<'_, str> {
    match operand {
        Operand::Scalar(leaf) => Cow::Borrowed(leaf.unquoted()),
        other => Cow::Owned(operand_to_text(other)),
    }
}
