//! Compile once, evaluate many.
//!
//! [`compile_rules`] tokenizes and parses a rule string a single time. The
//! resulting [`CompiledRuleSet`] is immutable and can be shared across
//! threads while records are validated and transformed against it.

use tracing::{debug, trace, warn};

use crate::{
    ast::RuleSet,
    error::{CompileError, RecordRejected},
    evaluator::Evaluator,
    lexer::tokenize,
    parser::parse,
    record::FieldMap,
    transform::{Identity, RecordTransform, Transformer},
};

/// A parsed ruleset together with its prepared evaluator.
#[derive(Debug, Clone, Default)]
pub struct CompiledRuleSet {
    rules: RuleSet,
    evaluator: Evaluator,
}

impl CompiledRuleSet {
    pub fn new(rules: RuleSet) -> Self {
        let evaluator = Evaluator::for_rules(&rules);
        CompiledRuleSet { rules, evaluator }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validates one record given as parallel header and row slices.
    pub fn validate<H, R>(&self, header: &[H], row: &[R]) -> Result<(), RecordRejected>
    where
        H: AsRef<str>,
        R: AsRef<str>,
    {
        let fields = FieldMap::from_row(header, row)?;
        self.validate_fields(&fields)
    }

    /// Validates an already-built field map.
    pub fn validate_fields(&self, fields: &FieldMap<'_>) -> Result<(), RecordRejected> {
        let verdict = self.evaluator.eval_rules(&self.rules, fields);
        trace!(fields = fields.len(), passed = verdict.is_ok(), "evaluated record");
        verdict.map_err(RecordRejected::from)
    }

    /// Runs the record through every rule with the identity transform.
    pub fn transform(&self, record: &str) -> String {
        self.transform_with(record, &Identity)
    }

    /// Runs the record through every rule in order, each rule receiving the
    /// previous rule's output.
    pub fn transform_with<T>(&self, record: &str, transform: &T) -> String
    where
        T: RecordTransform + ?Sized,
    {
        Transformer::new(transform).transform_rules(&self.rules, record)
    }
}

/// Tokenizes and parses `text` into a reusable ruleset.
///
/// # Examples
///
/// ```
/// use fractal::compile_rules;
///
/// let compiled = compile_rules("age TYPE INT, city REQUIRED").unwrap();
/// assert_eq!(compiled.rules().len(), 2);
///
/// assert!(compile_rules("age TYPE").is_err());
/// ```
pub fn compile_rules(text: &str) -> Result<CompiledRuleSet, CompileError> {
    let tokens = tokenize(text.trim())?;
    let rules = parse(&tokens)?;
    debug!(tokens = tokens.len(), rules = rules.len(), "compiled ruleset");
    for ignored in rules.ignored_after_not() {
        warn!(chain = %ignored, "rules chained after a NOT operand are never checked");
    }
    Ok(CompiledRuleSet::new(rules))
}

/// Validates one record. Structural problems are reported before any rule
/// runs; otherwise the first failing rule is reported.
pub fn validate_record<H, R>(
    rules: &CompiledRuleSet,
    header: &[H],
    row: &[R],
) -> Result<(), RecordRejected>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    rules.validate(header, row)
}

/// Transforms one record with the identity transform. An empty ruleset
/// returns the record unchanged.
pub fn transform_record(rules: &CompiledRuleSet, record: &str) -> String {
    rules.transform(record)
}

#[test]
fn test_compiled_rules_are_reusable() {
    let compiled = compile_rules("age RANGE (18,30)").unwrap();
    let header = ["name", "age"];

    assert!(compiled.validate(&header, &["John", "25"]).is_ok());
    assert!(compiled.validate(&header, &["Jane", "31"]).is_err());
    assert!(compiled.validate(&header, &["Joe", "18"]).is_ok());
}
