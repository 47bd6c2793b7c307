//! Rule-text serialization for parsed rulesets.
//!
//! Printing a ruleset and compiling the text again yields a structurally
//! identical tree. Leaves are printed verbatim, so quoting and `FIELD("...")`
//! wrappers survive the trip; only whitespace inside lists is normalized.
//!
//! # Features
//!
//! - **Compact output** via [`to_rule_text()`] - one line, rules separated by `, `
//! - **Pretty output** via [`to_rule_text_pretty()`] - one rule per line, chain
//!   links indented below the rule they extend
//!
//! # Examples
//!
//! ```
//! use fractal::compile_rules;
//! use fractal::output::to_rule_text;
//!
//! let compiled = compile_rules("age   TYPE INT AND city IN ( \"NY\" , \"LA\" )").unwrap();
//! assert_eq!(to_rule_text(compiled.rules()), "age TYPE INT AND city IN (\"NY\",\"LA\")");
//! ```

use std::fmt;

use crate::ast::{Expression, Operand, RuleSet};

pub struct RulePrinter {
    pretty: bool,
}

impl RulePrinter {
    pub fn new(pretty: bool) -> Self {
        RulePrinter { pretty }
    }

    pub fn print(&self, rules: &RuleSet) -> String {
        let separator = if self.pretty { ",\n" } else { ", " };
        let rules: Vec<String> = rules.iter().map(|rule| self.print_expression(rule)).collect();
        rules.join(separator)
    }

    pub fn print_expression(&self, expr: &Expression) -> String {
        let mut result = self.print_triple(expr);

        let mut next = expr.next.as_ref();
        while let Some(logical) = next {
            let rest = logical.rest();
            if self.pretty {
                result.push_str("\n  ");
            } else {
                result.push(' ');
            }
            result.push_str(logical.op().keyword());
            result.push(' ');
            result.push_str(&self.print_triple(rest));
            next = rest.next.as_ref();
        }

        result
    }

    fn print_triple(&self, expr: &Expression) -> String {
        match &expr.value {
            Operand::Omitted => format!("{} {}", expr.field.text, expr.condition.text),
            value => format!(
                "{} {} {}",
                expr.field.text,
                expr.condition.text,
                operand_to_text(value)
            ),
        }
    }
}

/// Prints the value position of a rule.
pub fn operand_to_text(operand: &Operand) -> String {
    match operand {
        Operand::Scalar(leaf) => leaf.text.clone(),
        Operand::List(items) => {
            let items: Vec<&str> = items.iter().map(|item| item.text.as_str()).collect();
            format!("({})", items.join(","))
        }
        Operand::Omitted => String::new(),
    }
}

/// Prints a ruleset on one line.
pub fn to_rule_text(rules: &RuleSet) -> String {
    RulePrinter::new(false).print(rules)
}

/// Prints a ruleset one rule per line.
///
/// ```text
/// age TYPE INT
///   AND age RANGE (18,65),
/// city REQUIRED
/// ```
pub fn to_rule_text_pretty(rules: &RuleSet) -> String {
    RulePrinter::new(true).print(rules)
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_rule_text(self))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&RulePrinter::new(false).print_expression(self))
    }
}
