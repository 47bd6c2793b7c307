//! Error types for the rule language and the pipeline driver.
//!
//! Errors are layered the same way the stages are: tokenizing and parsing
//! fail once per ruleset, validation fails once per record.

use thiserror::Error;

/// Tokenizer failure. No partial token list is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// No pattern matched at the cursor
    #[error("unexpected token at: {remaining}")]
    UnexpectedToken {
        /// The unconsumed remainder of the rule text
        remaining: String,
    },
}

/// Parser failure. Parsing aborts on the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A rule had to start here but the token was missing or of the wrong kind
    #[error("expected field, found {found}")]
    ExpectedField {
        /// Text of the offending token, or `end of input`
        found: String,
    },

    /// A field was not followed by a condition
    #[error("expected condition after field {after}")]
    ExpectedCondition {
        /// The field text
        after: String,
    },

    /// A condition was not followed by a value
    #[error("expected value after condition {after}")]
    ExpectedValue {
        /// The condition text
        after: String,
    },

    /// A parenthesized list literal could not be split into items
    #[error("malformed list literal: {text}")]
    MalformedList {
        /// The raw list text
        text: String,
    },
}

/// Either stage of compiling a rule string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Tokenizing failed
    #[error("failed to tokenize rules: {0}")]
    Tokenize(#[from] TokenizeError),

    /// Parsing failed
    #[error("failed to parse rules: {0}")]
    Parse(#[from] ParseError),
}

/// A record failed a rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The rule names a column the record does not have
    #[error("field {0} not found")]
    FieldNotFound(String),

    /// `TYPE` check failed
    #[error("value '{value}' is not of type {expected}")]
    TypeMismatch {
        /// The field value
        value: String,
        /// The declared type name
        expected: String,
    },

    /// `TYPE` names a type the language does not know
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// `RANGE` bound violated
    #[error("value '{value}' out of range ({min}, {max})")]
    OutOfRange {
        /// The field value
        value: String,
        /// Inclusive lower bound
        min: String,
        /// Inclusive upper bound
        max: String,
    },

    /// `RANGE` operand or field value is not numeric
    #[error("value '{0}' is not numeric")]
    NotANumber(String),

    /// `RANGE` value is not a `(min,max)` pair
    #[error("malformed range: {0}")]
    MalformedRange(String),

    /// `MATCHES` did not match
    #[error("value '{value}' does not match pattern {pattern}")]
    PatternMismatch {
        /// The field value
        value: String,
        /// The regular expression
        pattern: String,
    },

    /// `MATCHES` pattern does not compile
    #[error("invalid pattern {pattern}: {reason}")]
    InvalidPattern {
        /// The regular expression
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// `IN` allow-list miss
    #[error("value '{0}' not in allowed list")]
    NotInAllowedSet(String),

    /// `REQUIRED` on a blank value
    #[error("field {0} is required and cannot be empty")]
    EmptyRequiredField(String),

    /// Comparison operator did not hold
    #[error("expected {operator} {expected}, got {value}")]
    ComparisonFailed {
        /// The field value
        value: String,
        /// The comparison symbol
        operator: String,
        /// The rule operand
        expected: String,
    },

    /// Condition keyword has no evaluator
    #[error("unsupported condition: {0}")]
    UnsupportedCondition(String),

    /// `AND` with at least one failing operand
    #[error("AND condition failed")]
    LogicalAndFailed,

    /// `OR` with both operands failing
    #[error("OR condition failed")]
    LogicalOrFailed,

    /// `NOT` whose operand passed
    #[error("NOT condition failed")]
    LogicalNotFailed,

    /// The evaluator was handed a node it cannot evaluate on its own
    #[error("unknown node type: {0}")]
    UnknownNodeKind(String),
}

/// Structural problems with a record, caught before evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Header and row lengths differ
    #[error("record has {found} columns, header has {expected}")]
    ColumnCountMismatch {
        /// Header width
        expected: usize,
        /// Row width
        found: usize,
    },

    /// Nothing to process
    #[error("data is empty")]
    EmptyBatch,
}

/// Why a single record was rejected by `validate_record`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordRejected {
    /// The row could not be mapped onto the header
    #[error(transparent)]
    Malformed(#[from] RecordError),

    /// The row failed a rule
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Pipeline driver failure. `line` is 1-based within the input batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A ruleset did not compile
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The batch or a row is structurally invalid
    #[error("line {line}: {source}")]
    Record {
        /// Line number in the batch
        line: usize,
        /// Underlying error
        source: RecordError,
    },

    /// A record failed validation
    #[error("line {line}: {source}")]
    Validation {
        /// Line number in the batch
        line: usize,
        /// Underlying error
        source: ValidationError,
    },
}

/// Result alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Pipeline configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path as given
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not a valid configuration document
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Path as given
        path: String,
        /// Underlying error
        source: serde_json::Error,
    },
}
