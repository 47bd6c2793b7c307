//! Documentation content for the fractal CLI

use super::CliError;

/// Available documentation topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTopic {
    Syntax,
    Conditions,
    Logical,
    Types,
    Pipeline,
    Errors,
}

impl DocTopic {
    /// Parse topic name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "grammar" => Some(Self::Syntax),
            "conditions" | "condition" => Some(Self::Conditions),
            "logical" | "logic" | "operators" => Some(Self::Logical),
            "types" | "type" => Some(Self::Types),
            "pipeline" | "run" | "config" => Some(Self::Pipeline),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (topic listing)
pub fn get_docs_overview() -> &'static str {
    r#"FRACTAL DOCUMENTATION

Fractal rules validate and transform delimited records during a data
migration. A ruleset is compiled once and then applied to every record.

DOCUMENTATION TOPICS

  syntax        Rule shape, field references, literals, and separators
  conditions    TYPE, RANGE, MATCHES, IN, REQUIRED, and comparison symbols
  logical       AND, OR, and NOT chains
  types         Type names accepted by TYPE
  pipeline      Running batches, configuration files, and error policies
  errors        What each error message means

QUICK REFERENCE

  age TYPE INT                     Value must parse as an integer
  age RANGE (18,65)                Inclusive numeric bounds
  email MATCHES "^[^@]+@[^@]+$"    Regular expression
  city IN ("NY","LA")              Allow-list
  name REQUIRED                    Not blank
  age TYPE INT AND age > 17        Chained rules

Run 'fractal docs <topic>' for detailed documentation.
"#
}

/// Get documentation for a specific topic
pub fn get_doc_topic(name: &str) -> Result<&'static str, CliError> {
    match DocTopic::from_name(name) {
        Some(DocTopic::Syntax) => Ok(SYNTAX_DOC),
        Some(DocTopic::Conditions) => Ok(CONDITIONS_DOC),
        Some(DocTopic::Logical) => Ok(LOGICAL_DOC),
        Some(DocTopic::Types) => Ok(TYPES_DOC),
        Some(DocTopic::Pipeline) => Ok(PIPELINE_DOC),
        Some(DocTopic::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownTopic(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Rule Shape

RULE
  field CONDITION value [AND|OR|NOT field CONDITION value ...]

    Every rule names a column, a condition keyword, and the value the
    condition checks against. Whitespace between parts is ignored.

    Example:
      Header:  name,age,city
      Rule:    age TYPE INT

RULESETS
  rule, rule, ...
    A ruleset is a sequence of rules. Commas between rules are optional.

    Example:
      age TYPE INT, city REQUIRED
      age TYPE INT city REQUIRED

    Constraints:
      - Every rule must pass for a record to be valid
      - The first failing rule is reported; later rules are not checked

FIELD REFERENCES
  name
    A bare column name: letters, digits, underscores, and dots.

  FIELD("first name")
    A quoted column name, for names with spaces or other characters.

    Constraints:
      - Names are matched against the header after trimming whitespace
      - A rule naming a missing column fails with "field ... not found"
      - Without a header, columns are named "1", "2", ... by position:
          FIELD("2") TYPE INT

VALUES
  "text" or 'text'    Quoted literal
  42, -1.5            Number
  INT                 Bare word
  (a, "b", 3)         List, used by RANGE and IN

    Constraints:
      - Quotes around record values are stripped before checking
      - REQUIRED takes no value
"#;

const CONDITIONS_DOC: &str = r#"CONDITIONS - What a Rule Checks

TYPE
  field TYPE STRING|INT|FLOAT|BOOL|DATE
    The value must parse as the named type.

    Examples:
      age TYPE INT
      joined TYPE DATE          2024-01-31

RANGE
  field RANGE (min,max)
    The value must be a number between min and max, both inclusive.
    Bounds may be integers or decimals.

    Examples:
      age RANGE (18,65)
      price RANGE (0.01, 999.99)

    Constraints:
      - A non-numeric value fails with "is not numeric"
      - The list must have exactly two items

MATCHES
  field MATCHES "pattern"
    The value must match the regular expression. The match is not
    anchored; use ^ and $ to match the whole value.

    Example:
      email MATCHES "^[^@]+@[^@]+\.[a-z]+$"

IN
  field IN (item, item, ...)
    The value must equal one of the items exactly.

    Example:
      city IN ("New York","Boston")

REQUIRED
  field REQUIRED
    The value must not be empty or whitespace.

COMPARISONS
  field == value    field != value
  field >  value    field <  value
  field >= value    field <= value

    == and != compare text. The ordering symbols compare numbers and fail
    when either side is not numeric.

    Example:
      status == "active"
      age >= 18
"#;

const LOGICAL_DOC: &str = r#"LOGICAL - Chaining Rules

AND
  a AND b
    Both rules must pass.

OR
  a OR b
    At least one rule must pass.

NOT
  a NOT b
    Passes only when a fails. The rule after NOT is kept in the ruleset
    but does not affect the verdict, and neither does anything chained
    after it: in a NOT b AND c, c is never checked. Compiling such a rule
    logs a warning. Start a new rule with "," to keep c:

      a NOT b, c

CHAINS
  a AND b OR c
    Chains group to the right: a AND (b OR c). Both sides of AND and OR
    are always checked.

    Example:
      age TYPE INT AND age RANGE (18,65) OR status == "exempt"
"#;

const TYPES_DOC: &str = r#"TYPES - Names Accepted by TYPE

  STRING    Always passes
  INT       Signed 64-bit integer: 42, -7
  FLOAT     Decimal or scientific notation: 3.14, 1e5, 25
  BOOL      1 0 t f T F true false TRUE FALSE True False
  DATE      Calendar date as YYYY-MM-DD: 2024-02-29

  Constraints:
    - Type names are case-sensitive
    - Any other name fails with "unknown type"
"#;

const PIPELINE_DOC: &str = r#"PIPELINE - Running Batches

RUN
  fractal run --input records.csv --validate "age TYPE INT"
  cat records.csv | fractal run --validate "age TYPE INT" --skip-invalid

    The first line is the header. Every following line is validated; valid
    records are passed through the transformation rules in order, each
    rule receiving the previous rule's output. The header is carried into
    the output.

OPTIONS
  --validate <rules>     Validation rules
  --transform <rules>    Transformation rules
  --config <file>        JSON configuration file
  --delimiter <char>     Column delimiter (default ,)
  --no-header            First line is data
  --skip-invalid         Drop invalid records instead of stopping
  --json                 Print the full report as JSON

ENVIRONMENT
  FRACTAL_VALIDATION_RULES        Default for --validate
  FRACTAL_TRANSFORMATION_RULES    Default for --transform

CONFIGURATION FILE
  {
    "delimiter": ",",
    "has_header": true,
    "on_error": "skip",
    "validation_rules": "age TYPE INT",
    "transformation_rules": "name REQUIRED"
  }

    Every key is optional. Command-line options override the file.
"#;

const ERRORS_DOC: &str = r#"ERRORS - Reading Failures

COMPILE ERRORS (the whole run stops before any record is read)
  unexpected token at: ...            Text the tokenizer could not read
  expected field, found ...           A rule must start with a field
  expected condition after field ...  Missing condition keyword
  expected value after condition ...  Missing value
  malformed list literal: ...         Empty item or open quote in a list

RECORD ERRORS
  line N: record has X columns, header has Y
  line N: field ... not found
  line N: value '...' is not of type ...
  line N: value '...' out of range (min, max)
  line N: value '...' is not numeric
  line N: value '...' does not match pattern ...
  line N: value '...' not in allowed list
  line N: field ... is required and cannot be empty
  line N: AND condition failed / OR condition failed / NOT condition failed

    With --skip-invalid these are collected in the report instead of
    stopping the run.
"#;
