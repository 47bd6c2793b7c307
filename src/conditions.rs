//! Condition primitives.
//!
//! Each function checks one already-resolved field value against the operand
//! of a rule and returns the specific [`ValidationError`] on failure.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::{
    ast::{Comparison, Leaf, Operand, TypeName},
    error::ValidationError,
    output::operand_to_text,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `TYPE`: the value must parse as the named type.
pub fn check_type(value: &str, type_name: &str) -> Result<(), ValidationError> {
    let expected = TypeName::from_keyword(type_name)
        .ok_or_else(|| ValidationError::UnknownType(type_name.to_string()))?;

    let ok = match expected {
        TypeName::String => true,
        TypeName::Int => value.parse::<i64>().is_ok(),
        TypeName::Float => value.parse::<f64>().is_ok(),
        TypeName::Bool => parse_bool(value).is_some(),
        TypeName::Date => NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok(),
    };

    if ok {
        Ok(())
    } else {
        Err(ValidationError::TypeMismatch {
            value: value.to_string(),
            expected: expected.keyword().to_string(),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

fn parse_number(text: &str) -> Result<Decimal, ValidationError> {
    text.trim()
        .parse::<Decimal>()
        .map_err(|_| ValidationError::NotANumber(text.to_string()))
}

/// `RANGE`: the value must be a number within the inclusive `(min,max)`.
pub fn check_range(value: &str, operand: &Operand) -> Result<(), ValidationError> {
    let (min, max) = match operand {
        Operand::List(items) if items.len() == 2 => (items[0].unquoted(), items[1].unquoted()),
        other => return Err(ValidationError::MalformedRange(operand_to_text(other))),
    };

    let low = parse_number(min)?;
    let high = parse_number(max)?;
    let actual = parse_number(value)?;

    if actual < low || actual > high {
        return Err(ValidationError::OutOfRange {
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}

/// `MATCHES`: the value must match `pattern` (unanchored).
pub fn check_matches(value: &str, pattern: &Regex) -> Result<(), ValidationError> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::PatternMismatch {
            value: value.to_string(),
            pattern: pattern.as_str().to_string(),
        })
    }
}

/// Compiles a `MATCHES` operand.
pub fn compile_pattern(pattern: &str) -> Result<Regex, ValidationError> {
    Regex::new(pattern).map_err(|e| ValidationError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// `IN`: the value must equal one of the allowed items.
pub fn check_in(value: &str, allowed: &[Leaf]) -> Result<(), ValidationError> {
    if allowed.iter().any(|item| item.unquoted() == value) {
        Ok(())
    } else {
        Err(ValidationError::NotInAllowedSet(value.to_string()))
    }
}

/// `REQUIRED`: the value must not be blank.
pub fn check_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyRequiredField(field.to_string()))
    } else {
        Ok(())
    }
}

/// Comparison symbols. Equality compares text; ordering compares numbers and
/// fails when either side is not numeric.
pub fn check_comparison(
    value: &str,
    comparison: Comparison,
    expected: &str,
) -> Result<(), ValidationError> {
    let holds = match comparison {
        Comparison::Equal => value == expected,
        Comparison::NotEqual => value != expected,
        Comparison::GreaterThan => compare_numbers(value, expected, |a, b| a > b),
        Comparison::LessThan => compare_numbers(value, expected, |a, b| a < b),
        Comparison::GreaterEqual => compare_numbers(value, expected, |a, b| a >= b),
        Comparison::LessEqual => compare_numbers(value, expected, |a, b| a <= b),
    };

    if holds {
        Ok(())
    } else {
        Err(ValidationError::ComparisonFailed {
            value: value.to_string(),
            operator: comparison.symbol().to_string(),
            expected: expected.to_string(),
        })
    }
}

fn compare_numbers(value: &str, expected: &str, relation: impl Fn(Decimal, Decimal) -> bool) -> bool {
    match (parse_number(value), parse_number(expected)) {
        (Ok(a), Ok(b)) => relation(a, b),
        _ => false,
    }
}
