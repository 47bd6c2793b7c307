//! Batch driver.
//!
//! Takes a block of delimited text, validates every data row against the
//! validation ruleset, and passes the rows that survive through the
//! transformation ruleset.
//!
//! ```
//! use fractal::{compile_rules, pipeline::Pipeline};
//!
//! let pipeline = Pipeline::new().validate_with(compile_rules("age TYPE INT").unwrap());
//! let report = pipeline.run("name,age\nJohn,25\nJane,30").unwrap();
//!
//! assert_eq!(report.output, "name,age\nJohn,25\nJane,30\n");
//! assert_eq!(report.accepted, 2);
//! ```

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::{
    ast::expressions::strip_quotes,
    config::{ErrorPolicy, PipelineConfig},
    engine::{CompiledRuleSet, compile_rules},
    error::{CompileError, PipelineError, RecordError, RecordRejected, Result},
    record::{FieldMap, split_row},
    transform::{Identity, RecordTransform},
};

/// Outcome of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Transformed header and accepted rows, one per line
    pub output: String,
    /// Data rows read, header excluded
    pub records: usize,
    /// Rows that passed validation
    pub accepted: usize,
    /// Rows dropped under [`ErrorPolicy::Skip`]
    pub rejected: Vec<Rejection>,
}

/// A dropped row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// 1-based line number in the batch
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    validation: Option<CompiledRuleSet>,
    transformation: CompiledRuleSet,
    delimiter: char,
    has_header: bool,
    on_error: ErrorPolicy,
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline {
            validation: None,
            transformation: CompiledRuleSet::default(),
            delimiter: ',',
            has_header: true,
            on_error: ErrorPolicy::Abort,
        }
    }
}

impl Pipeline {
    /// A pipeline that accepts every well-formed row and changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles both rulesets named by `config`.
    pub fn from_config(config: &PipelineConfig) -> std::result::Result<Self, CompileError> {
        let validation = config
            .validation_rules
            .as_deref()
            .map(compile_rules)
            .transpose()?;
        let transformation = config
            .transformation_rules
            .as_deref()
            .map(compile_rules)
            .transpose()?
            .unwrap_or_default();

        Ok(Pipeline {
            validation,
            transformation,
            delimiter: config.delimiter,
            has_header: config.has_header,
            on_error: config.on_error,
        })
    }

    pub fn validate_with(mut self, rules: CompiledRuleSet) -> Self {
        self.validation = Some(rules);
        self
    }

    pub fn transform_with(mut self, rules: CompiledRuleSet) -> Self {
        self.transformation = rules;
        self
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn on_error(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// Runs the batch with the identity transform.
    pub fn run(&self, data: &str) -> Result<PipelineReport> {
        self.run_with(data, &Identity)
    }

    /// Runs the batch, applying `transform` once per transformation rule to
    /// the header and to every accepted row.
    pub fn run_with<T>(&self, data: &str, transform: &T) -> Result<PipelineReport>
    where
        T: RecordTransform + ?Sized,
    {
        let mut lines = data
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(_, line)| !line.trim().is_empty())
            .peekable();

        let Some(&(first_line, first)) = lines.peek() else {
            return Err(PipelineError::Record {
                line: 1,
                source: RecordError::EmptyBatch,
            });
        };

        let mut report = PipelineReport::default();

        let header: Vec<String> = if self.has_header {
            lines.next();
            self.emit(&mut report.output, first, transform);
            split_row(first, self.delimiter)
                .into_iter()
                .map(|name| strip_quotes(name.trim()).to_string())
                .collect()
        } else {
            let width = split_row(first, self.delimiter).len();
            (1..=width).map(|position| position.to_string()).collect()
        };
        debug!(line = first_line, columns = header.len(), "resolved header");

        for (line, record) in lines {
            report.records += 1;

            match self.check(&header, record) {
                Ok(()) => {
                    trace!(line, "record accepted");
                    report.accepted += 1;
                    self.emit(&mut report.output, record, transform);
                }
                Err(rejected) => match self.on_error {
                    ErrorPolicy::Abort => return Err(located(line, rejected)),
                    ErrorPolicy::Skip => {
                        warn!(line, reason = %rejected, "skipping invalid record");
                        report.rejected.push(Rejection {
                            line,
                            reason: rejected.to_string(),
                        });
                    }
                },
            }
        }

        debug!(
            records = report.records,
            accepted = report.accepted,
            rejected = report.rejected.len(),
            "batch finished"
        );
        Ok(report)
    }

    fn check(&self, header: &[String], record: &str) -> std::result::Result<(), RecordRejected> {
        let row = split_row(record, self.delimiter);
        let fields = FieldMap::from_row(header, &row[..])?;
        match &self.validation {
            Some(rules) => rules.validate_fields(&fields),
            None => Ok(()),
        }
    }

    fn emit<T>(&self, output: &mut String, record: &str, transform: &T)
    where
        T: RecordTransform + ?Sized,
    {
        output.push_str(&self.transformation.transform_with(record, transform));
        output.push('\n');
    }
}

fn located(line: usize, rejected: RecordRejected) -> PipelineError {
    match rejected {
        RecordRejected::Malformed(source) => PipelineError::Record { line, source },
        RecordRejected::Invalid(source) => PipelineError::Validation { line, source },
    }
}

/// Builds a pipeline from `config` and runs `data` through it.
pub fn run(config: &PipelineConfig, data: &str) -> Result<PipelineReport> {
    Pipeline::from_config(config)?.run(data)
}
