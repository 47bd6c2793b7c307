use fractal::ast::{Expression, Leaf, LogicalNode, Node, Operand, RuleSet, TokenKind};
use fractal::error::{RecordError, RecordRejected, ValidationError};
use fractal::{Evaluator, FieldMap, compile_rules, validate_record};
use rstest::rstest;

const HEADER: [&str; 3] = ["name", "age", "city"];
const JOHN: [&str; 3] = ["John", "25", "New York"];

fn validate(rules: &str, row: &[&str]) -> Result<(), RecordRejected> {
    let compiled = compile_rules(rules).unwrap();
    validate_record(&compiled, &HEADER, row)
}

fn invalid(rules: &str, row: &[&str]) -> ValidationError {
    match validate(rules, row) {
        Err(RecordRejected::Invalid(err)) => err,
        other => panic!("expected validation error for {:?}, got {:?}", rules, other),
    }
}

// ============================================================================
// Reference Records
// ============================================================================

#[test]
fn test_type_int_passes() {
    assert_eq!(validate("age TYPE INT", &JOHN), Ok(()));
}

#[test]
fn test_and_with_both_conjuncts_holding() {
    assert_eq!(validate("age TYPE FLOAT AND city REQUIRED", &JOHN), Ok(()));
}

#[test]
fn test_range_on_non_numeric_value() {
    assert_eq!(
        invalid("age RANGE (18,30)", &["John", "abc", "New York"]),
        ValidationError::NotANumber("abc".to_string())
    );
}

#[test]
fn test_in_allow_list() {
    let rules = r#"city IN ("New York","Boston")"#;
    assert_eq!(validate(rules, &JOHN), Ok(()));
    assert_eq!(
        invalid(rules, &["John", "25", "Chicago"]),
        ValidationError::NotInAllowedSet("Chicago".to_string())
    );
}

#[test]
fn test_required_on_empty_value() {
    assert_eq!(
        invalid("name REQUIRED", &["", "25", "New York"]),
        ValidationError::EmptyRequiredField("name".to_string())
    );
    assert_eq!(
        invalid("name REQUIRED", &["   ", "25", "New York"]),
        ValidationError::EmptyRequiredField("name".to_string())
    );
}

#[test]
fn test_short_row_is_rejected_before_evaluation() {
    // Even a rule that would fail is never reached
    assert_eq!(
        validate("zip REQUIRED", &["John", "25"]),
        Err(RecordRejected::Malformed(RecordError::ColumnCountMismatch {
            expected: 3,
            found: 2
        }))
    );
}

#[test]
fn test_long_row_is_rejected() {
    assert!(matches!(
        validate("name REQUIRED", &["John", "25", "New York", "extra"]),
        Err(RecordRejected::Malformed(_))
    ));
}

// ============================================================================
// Field Resolution
// ============================================================================

#[test]
fn test_missing_field() {
    assert_eq!(
        invalid("zip REQUIRED", &JOHN),
        ValidationError::FieldNotFound("zip".to_string())
    );
}

#[test]
fn test_field_wrapper_resolves_column() {
    assert_eq!(validate(r#"FIELD("city") IN ("New York")"#, &JOHN), Ok(()));
}

#[test]
fn test_field_wrapper_with_spaces() {
    let compiled = compile_rules(r#"FIELD("postal code") MATCHES "^[0-9]{5}$""#).unwrap();
    let header = ["name", "postal code"];
    assert_eq!(validate_record(&compiled, &header, &["John", "10001"]), Ok(()));
    assert!(validate_record(&compiled, &header, &["John", "1000"]).is_err());
}

#[test]
fn test_record_quotes_are_stripped() {
    let row = ["John", "\"25\"", "\"New York\""];
    assert_eq!(validate("age TYPE INT", &row), Ok(()));
    assert_eq!(validate(r#"city IN ("New York")"#, &row), Ok(()));
}

#[test]
fn test_record_whitespace_is_trimmed() {
    assert_eq!(validate("age RANGE (18,30)", &["John", " 25 ", "New York"]), Ok(()));
}

// ============================================================================
// TYPE
// ============================================================================

#[rstest]
#[case("STRING", "anything at all", true)]
#[case("INT", "25", true)]
#[case("INT", "-7", true)]
#[case("INT", "2.5", false)]
#[case("INT", "abc", false)]
#[case("FLOAT", "2.5", true)]
#[case("FLOAT", "25", true)]
#[case("FLOAT", "1e5", true)]
#[case("FLOAT", "2,5", false)]
#[case("BOOL", "true", true)]
#[case("BOOL", "F", true)]
#[case("BOOL", "1", true)]
#[case("BOOL", "yes", false)]
#[case("DATE", "2024-02-29", true)]
#[case("DATE", "2023-02-29", false)]
#[case("DATE", "31/01/2024", false)]
fn test_type_check(#[case] type_name: &str, #[case] input: &str, #[case] passes: bool) {
    let rules = format!("value TYPE {}", type_name);
    let compiled = compile_rules(&rules).unwrap();
    let result = validate_record(&compiled, &["value"], &[input]);

    if passes {
        assert_eq!(result, Ok(()), "{} should accept {:?}", type_name, input);
    } else {
        assert_eq!(
            result,
            Err(RecordRejected::Invalid(ValidationError::TypeMismatch {
                value: input.to_string(),
                expected: type_name.to_string(),
            })),
            "{} should reject {:?}",
            type_name,
            input
        );
    }
}

#[test]
fn test_unknown_type_name() {
    assert_eq!(
        invalid("age TYPE NUMBER", &JOHN),
        ValidationError::UnknownType("NUMBER".to_string())
    );
}

// ============================================================================
// RANGE
// ============================================================================

#[rstest]
#[case("18", true)]
#[case("30", true)]
#[case("25", true)]
#[case("17", false)]
#[case("31", false)]
fn test_range_bounds_are_inclusive(#[case] age: &str, #[case] passes: bool) {
    let result = validate("age RANGE (18,30)", &["John", age, "New York"]);
    assert_eq!(result.is_ok(), passes, "age {}", age);
}

#[test]
fn test_out_of_range_error() {
    assert_eq!(
        invalid("age RANGE (18,20)", &JOHN),
        ValidationError::OutOfRange {
            value: "25".to_string(),
            min: "18".to_string(),
            max: "20".to_string(),
        }
    );
}

#[test]
fn test_decimal_range() {
    let compiled = compile_rules("price RANGE (0.5, 1.5)").unwrap();
    assert!(validate_record(&compiled, &["price"], &["1.25"]).is_ok());
    assert!(validate_record(&compiled, &["price"], &["1.50"]).is_ok());
    assert!(validate_record(&compiled, &["price"], &["1.51"]).is_err());
}

#[test]
fn test_non_numeric_bound() {
    assert_eq!(
        invalid("age RANGE (a,30)", &JOHN),
        ValidationError::NotANumber("a".to_string())
    );
}

#[test]
fn test_malformed_range() {
    assert_eq!(
        invalid("age RANGE (18)", &JOHN),
        ValidationError::MalformedRange("(18)".to_string())
    );
    assert_eq!(
        invalid("age RANGE 18", &JOHN),
        ValidationError::MalformedRange("18".to_string())
    );
}

// ============================================================================
// MATCHES
// ============================================================================

#[test]
fn test_matches() {
    assert_eq!(validate(r#"name MATCHES "^J[a-z]+$""#, &JOHN), Ok(()));
    assert_eq!(
        invalid(r#"name MATCHES "^X""#, &JOHN),
        ValidationError::PatternMismatch {
            value: "John".to_string(),
            pattern: "^X".to_string(),
        }
    );
}

#[test]
fn test_matches_is_unanchored() {
    assert_eq!(validate(r#"city MATCHES "York""#, &JOHN), Ok(()));
}

#[test]
fn test_invalid_pattern() {
    let err = invalid(r#"name MATCHES "(""#, &JOHN);
    assert!(
        matches!(&err, ValidationError::InvalidPattern { pattern, .. } if pattern == "("),
        "got {:?}",
        err
    );
}

#[test]
fn test_invalid_pattern_without_precompiled_patterns() {
    let compiled = compile_rules(r#"name MATCHES "[a-""#).unwrap();
    let fields = FieldMap::from_row(&HEADER, &JOHN).unwrap();
    let result = Evaluator::new().evaluate(&Node::Root(compiled.rules().clone()), &fields);
    assert!(matches!(result, Err(ValidationError::InvalidPattern { .. })));
}

// ============================================================================
// Comparisons
// ============================================================================

#[rstest]
#[case("age >= 18", true)]
#[case("age > 25", false)]
#[case("age <= 25", true)]
#[case("age < 25", false)]
#[case("age == 25", true)]
#[case("age != 25", false)]
#[case(r#"city == "New York""#, true)]
#[case(r#"city != "Boston""#, true)]
#[case("name > 10", false)]
fn test_comparisons(#[case] rules: &str, #[case] passes: bool) {
    assert_eq!(validate(rules, &JOHN).is_ok(), passes, "{}", rules);
}

#[test]
fn test_comparison_error() {
    assert_eq!(
        invalid("age > 30", &JOHN),
        ValidationError::ComparisonFailed {
            value: "25".to_string(),
            operator: ">".to_string(),
            expected: "30".to_string(),
        }
    );
}

// ============================================================================
// Logical Operators
// ============================================================================

#[test]
fn test_and_fails_when_either_side_fails() {
    assert_eq!(
        invalid(r#"age TYPE INT AND city IN ("Boston")"#, &JOHN),
        ValidationError::LogicalAndFailed
    );
    assert_eq!(
        invalid("age TYPE BOOL AND city REQUIRED", &JOHN),
        ValidationError::LogicalAndFailed
    );
}

#[test]
fn test_or() {
    assert_eq!(validate("age TYPE BOOL OR city REQUIRED", &JOHN), Ok(()));
    assert_eq!(validate("age TYPE INT OR zip REQUIRED", &JOHN), Ok(()));
    assert_eq!(
        invalid(r#"age TYPE BOOL OR city IN ("Boston")"#, &JOHN),
        ValidationError::LogicalOrFailed
    );
}

#[test]
fn test_not_looks_at_left_operand_only() {
    assert_eq!(validate("age TYPE BOOL NOT name REQUIRED", &JOHN), Ok(()));
    assert_eq!(validate("age TYPE BOOL NOT zip REQUIRED", &JOHN), Ok(()));
    assert_eq!(
        invalid("age TYPE INT NOT name REQUIRED", &JOHN),
        ValidationError::LogicalNotFailed
    );
}

#[test]
fn test_chain_groups_to_the_right() {
    // a AND (b OR c)
    assert_eq!(
        invalid("age TYPE BOOL AND name REQUIRED OR city REQUIRED", &JOHN),
        ValidationError::LogicalAndFailed
    );
    // a OR (b AND c)
    assert_eq!(
        validate("age TYPE INT OR age TYPE BOOL AND city REQUIRED", &JOHN),
        Ok(())
    );
}

// ============================================================================
// Rulesets
// ============================================================================

#[test]
fn test_first_failing_rule_wins() {
    assert_eq!(
        invalid(r#"name REQUIRED, age TYPE BOOL, name MATCHES "^X""#, &JOHN),
        ValidationError::TypeMismatch {
            value: "25".to_string(),
            expected: "BOOL".to_string(),
        }
    );
}

#[test]
fn test_empty_ruleset_accepts_everything() {
    assert_eq!(validate("", &JOHN), Ok(()));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        validate("zip REQUIRED", &JOHN).unwrap_err().to_string(),
        "field zip not found"
    );
    assert_eq!(
        validate("age TYPE BOOL", &JOHN).unwrap_err().to_string(),
        "value '25' is not of type BOOL"
    );
    assert_eq!(
        validate("name REQUIRED", &["John"]).unwrap_err().to_string(),
        "record has 1 columns, header has 3"
    );
}

// ============================================================================
// Evaluator Dispatch
// ============================================================================

#[test]
fn test_leaves_are_no_ops() {
    let fields = FieldMap::from_row(&HEADER, &JOHN).unwrap();
    let evaluator = Evaluator::new();

    for kind in [TokenKind::Field, TokenKind::Value] {
        let leaf = Node::Leaf(Leaf::new(kind, "age"));
        assert_eq!(evaluator.evaluate(&leaf, &fields), Ok(()));
    }
}

#[test]
fn test_unknown_node_kinds() {
    let fields = FieldMap::from_row(&HEADER, &JOHN).unwrap();
    let evaluator = Evaluator::new();

    let leaf = Node::Leaf(Leaf::new(TokenKind::Condition, "TYPE"));
    assert_eq!(
        evaluator.evaluate(&leaf, &fields),
        Err(ValidationError::UnknownNodeKind("CONDITION".to_string()))
    );
}

fn logical_node(rules: &str) -> Node {
    let compiled = compile_rules(rules).unwrap();
    Node::from(LogicalNode::from_chain(&compiled.rules().rules[0]).unwrap())
}

#[rstest]
#[case("age TYPE INT AND city REQUIRED", Ok(()))]
#[case("age TYPE BOOL AND city REQUIRED", Err(ValidationError::LogicalAndFailed))]
#[case("age TYPE BOOL OR city REQUIRED", Ok(()))]
#[case("age TYPE BOOL OR zip REQUIRED", Err(ValidationError::LogicalOrFailed))]
#[case("age TYPE BOOL NOT city REQUIRED", Ok(()))]
#[case("age TYPE INT NOT city REQUIRED", Err(ValidationError::LogicalNotFailed))]
fn test_standalone_logical_node(#[case] rules: &str, #[case] expected: Result<(), ValidationError>) {
    let fields = FieldMap::from_row(&HEADER, &JOHN).unwrap();
    let evaluator = Evaluator::new();
    assert_eq!(evaluator.evaluate(&logical_node(rules), &fields), expected);
}

#[test]
fn test_logical_node_agrees_with_chain() {
    let fields = FieldMap::from_row(&HEADER, &JOHN).unwrap();
    let evaluator = Evaluator::new();

    for rules in [
        r#"age RANGE (30,40) OR city IN ("Boston") AND name REQUIRED"#,
        "age TYPE INT AND name TYPE INT",
    ] {
        let compiled = compile_rules(rules).unwrap();
        let chain = Node::from(compiled.rules().rules[0].clone());
        assert_eq!(
            evaluator.evaluate(&logical_node(rules), &fields),
            evaluator.evaluate(&chain, &fields),
            "{}",
            rules
        );
    }
}

#[test]
fn test_unchained_expression_has_no_logical_node() {
    let compiled = compile_rules("age TYPE INT").unwrap();
    assert_eq!(LogicalNode::from_chain(&compiled.rules().rules[0]), None);
}

#[test]
fn test_chain_after_not_operand_is_not_checked() {
    // zip is not a column, yet the rule passes: only age is looked at
    assert_eq!(
        validate("age TYPE BOOL NOT name REQUIRED AND zip TYPE INT", &JOHN),
        Ok(())
    );
    assert!(validate("age TYPE BOOL NOT name REQUIRED, zip TYPE INT", &JOHN).is_err());
}

#[test]
fn test_single_expression_node() {
    let fields = FieldMap::from_row(&HEADER, &JOHN).unwrap();
    let compiled = compile_rules("age RANGE (18,30)").unwrap();
    let node = Node::from(compiled.rules().rules[0].clone());
    assert_eq!(compiled.evaluator().evaluate(&node, &fields), Ok(()));
}

#[test]
fn test_unsupported_condition() {
    let fields = FieldMap::from_row(&HEADER, &JOHN).unwrap();
    let rule = Expression::new(
        Leaf::new(TokenKind::Field, "name"),
        Leaf::new(TokenKind::Condition, "LIKE"),
        Operand::Scalar(Leaf::new(TokenKind::Value, "\"J%\"")),
    );
    let node = Node::Root(RuleSet::new(vec![rule]));
    assert_eq!(
        Evaluator::new().evaluate(&node, &fields),
        Err(ValidationError::UnsupportedCondition("LIKE".to_string()))
    );
}

// ============================================================================
// Sharing
// ============================================================================

#[test]
fn test_compiled_rules_are_shared_across_threads() {
    let compiled = compile_rules(r#"age RANGE (18,65) AND name MATCHES "^[A-Z]""#).unwrap();
    let rows: Vec<[String; 3]> = (0..64)
        .map(|i| ["Jane".to_string(), (10 + i).to_string(), "Boston".to_string()])
        .collect();

    let accepted: usize = std::thread::scope(|scope| {
        let handles: Vec<_> = rows
            .chunks(16)
            .map(|chunk| {
                let compiled = &compiled;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .filter(|row| validate_record(compiled, &HEADER, &row[..]).is_ok())
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    // Ages 18 through 65
    assert_eq!(accepted, 48);
}
