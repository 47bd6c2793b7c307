use crate::ast::{Expression, Logical};

/// Ordered top-level rules parsed from one rule string.
///
/// Order matters for transformation, where each rule's output is the next
/// rule's input. Validation requires every rule to pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    pub rules: Vec<Expression>,
}

impl RuleSet {
    pub fn new(rules: Vec<Expression>) -> Self {
        RuleSet { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Chains that continue past a `NOT` operand, e.g. `b AND c` in
    /// `a NOT b AND c`. Nothing in them is ever evaluated.
    pub fn ignored_after_not(&self) -> Vec<&Expression> {
        let mut ignored = Vec::new();
        for rule in &self.rules {
            let mut current = Some(rule);
            while let Some(expr) = current {
                match &expr.next {
                    Some(Logical::Not(rest)) => {
                        if rest.next.is_some() {
                            ignored.push(&**rest);
                        }
                        current = None;
                    }
                    next => current = next.as_ref().map(Logical::rest),
                }
            }
        }
        ignored
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expression> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Expression;
    type IntoIter = std::slice::Iter<'a, Expression>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
