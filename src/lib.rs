pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod conditions;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod transform;

pub use ast::{Expression, Leaf, Logical, LogicalNode, Node, Operand, RuleSet, Token, TokenKind};
pub use config::{ErrorPolicy, PipelineConfig};
pub use engine::{CompiledRuleSet, compile_rules, transform_record, validate_record};
pub use error::{
    CompileError, ConfigError, ParseError, PipelineError, RecordError, RecordRejected,
    TokenizeError, ValidationError,
};
pub use evaluator::Evaluator;
pub use lexer::{Lexer, tokenize};
pub use output::{to_rule_text, to_rule_text_pretty};
pub use parser::{Parser, parse};
pub use pipeline::{Pipeline, PipelineReport, Rejection};
pub use record::FieldMap;
pub use transform::{Identity, RecordTransform};
