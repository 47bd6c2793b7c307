//! Run a batch of delimited records through the pipeline

use std::path::PathBuf;

use crate::{
    config::{ErrorPolicy, PipelineConfig},
    pipeline::{Pipeline, PipelineReport},
};

use super::CliError;

/// Options for the run command. Every `Some` overrides the value loaded
/// from `config`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Records to process
    pub input: Option<String>,
    /// JSON configuration file
    pub config: Option<PathBuf>,
    /// Validation rule text
    pub validate: Option<String>,
    /// Transformation rule text
    pub transform: Option<String>,
    /// Column delimiter
    pub delimiter: Option<char>,
    /// Treat the first line as data
    pub no_header: bool,
    /// Drop invalid records instead of stopping
    pub skip_invalid: bool,
}

impl RunOptions {
    /// Merges the configuration file, if any, with the command-line overrides.
    pub fn resolve_config(&self) -> Result<PipelineConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(rules) = &self.validate {
            config.validation_rules = Some(rules.clone());
        }
        if let Some(rules) = &self.transform {
            config.transformation_rules = Some(rules.clone());
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if self.no_header {
            config.has_header = false;
        }
        if self.skip_invalid {
            config.on_error = ErrorPolicy::Skip;
        }

        Ok(config)
    }
}

/// Execute a pipeline run over the input in `options`
pub fn execute_run(options: &RunOptions) -> Result<PipelineReport, CliError> {
    let config = options.resolve_config()?;
    let input = options.input.as_ref().ok_or(CliError::NoInput)?;

    let pipeline = Pipeline::from_config(&config)?;
    Ok(pipeline.run(input)?)
}
