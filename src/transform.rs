use crate::ast::{Expression, Node, RuleSet};

/// Per-rule record rewriting.
///
/// The transformation walk calls [`RecordTransform::apply`] once per
/// top-level rule, in declaration order, threading each result into the next
/// call. Implementations decide what a rule means for a record; the walk
/// owns the ordering.
///
/// Closures with the same signature implement the trait:
///
/// ```
/// use fractal::{ast::Expression, compile_rules};
///
/// let upper = |_: &Expression, record: &str| record.to_uppercase();
/// let compiled = compile_rules("name REQUIRED").unwrap();
///
/// assert_eq!(compiled.transform_with("john,25", &upper), "JOHN,25");
/// ```
pub trait RecordTransform {
    fn apply(&self, rule: &Expression, record: &str) -> String;
}

/// Leaves records unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl RecordTransform for Identity {
    fn apply(&self, _rule: &Expression, record: &str) -> String {
        record.to_string()
    }
}

impl<F> RecordTransform for F
where
    F: Fn(&Expression, &str) -> String,
{
    fn apply(&self, rule: &Expression, record: &str) -> String {
        self(rule, record)
    }
}

/// Applies a [`RecordTransform`] over a rule tree.
pub struct Transformer<'t, T: RecordTransform + ?Sized> {
    transform: &'t T,
}

impl<'t, T: RecordTransform + ?Sized> Transformer<'t, T> {
    pub fn new(transform: &'t T) -> Self {
        Transformer { transform }
    }

    /// Transforms `record` under `node`.
    ///
    /// A root folds its rules left to right; an expression is one rule;
    /// every other node passes the record through.
    pub fn transform(&self, node: &Node, record: &str) -> String {
        match node {
            Node::Root(rules) => self.transform_rules(rules, record),
            Node::Expression(expr) => self.transform.apply(expr, record),
            Node::Logical(_) | Node::Leaf(_) => record.to_string(),
        }
    }

    pub fn transform_rules(&self, rules: &RuleSet, record: &str) -> String {
        rules
            .iter()
            .fold(record.to_string(), |current, rule| self.transform.apply(rule, &current))
    }
}
