//! Compile a ruleset and show what the compiler saw

use crate::{
    ast::Token,
    engine::compile_rules,
    error::CompileError,
    lexer::tokenize,
    output::{to_rule_text, to_rule_text_pretty},
};

use super::CliError;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The rule text to compile
    pub rules: String,
    /// Include the token stream in the result
    pub tokens: bool,
    /// Include the parsed tree in the result
    pub ast: bool,
    /// Print the normalized rules one per line
    pub pretty: bool,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// Number of top-level rules
    pub rule_count: usize,
    /// Rules printed back in normalized form
    pub normalized: String,
    /// Token stream, when requested
    pub tokens: Option<Vec<Token>>,
    /// Debug rendering of the tree, when requested
    pub ast: Option<String>,
}

impl CheckResult {
    /// Human-readable rendering used by the binary.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(tokens) = &self.tokens {
            for token in tokens {
                out.push_str(&format!("{:<10} {}\n", token.kind.name(), token.text));
            }
            out.push('\n');
        }

        if let Some(ast) = &self.ast {
            out.push_str(ast);
            out.push_str("\n\n");
        }

        match self.rule_count {
            0 => out.push_str("No rules\n"),
            1 => out.push_str("1 rule OK\n"),
            n => out.push_str(&format!("{} rules OK\n", n)),
        }
        if !self.normalized.is_empty() {
            out.push_str(&self.normalized);
            out.push('\n');
        }

        out
    }
}

/// Compile the rules in `options`, failing on the first tokenize or parse
/// error.
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let compiled = compile_rules(&options.rules)?;

    let tokens = if options.tokens {
        Some(tokenize(options.rules.trim()).map_err(CompileError::from)?)
    } else {
        None
    };

    let normalized = if options.pretty {
        to_rule_text_pretty(compiled.rules())
    } else {
        to_rule_text(compiled.rules())
    };

    Ok(CheckResult {
        rule_count: compiled.rules().len(),
        normalized,
        tokens,
        ast: options.ast.then(|| format!("{:#?}", compiled.rules())),
    })
}
