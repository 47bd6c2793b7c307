//! CLI support for fractal
//!
//! Provides programmatic access to the `fractal` commands so they can be
//! embedded in other tools without going through the binary.

mod check;
mod docs;
mod run;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use docs::{DocTopic, get_doc_topic, get_docs_overview};
pub use run::{RunOptions, execute_run};

use std::io;

use thiserror::Error;

use crate::error::{CompileError, ConfigError, PipelineError};

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Rules did not compile
    #[error("{0}")]
    Compile(#[from] CompileError),

    /// The batch failed
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// Configuration file problem
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Report serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or writing output failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Use --input or pipe records to stdin.")]
    NoInput,

    /// Unknown documentation topic
    #[error("Unknown topic: '{0}'\nRun 'fractal docs' to see available topics.")]
    UnknownTopic(String),
}
