//! # Fractal Rule Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the tree produced for the rule
//! language, a small declarative language used to validate records and to
//! drive record transformations during a migration.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Tree nodes (expressions, logical suffixes, leaves)
//! - **[operators]** - Logical keywords, condition keywords and type names
//! - **[ruleset]** - The root: ordered top-level rules
//!
//! ## Quick Start
//!
//! ```text
//! age TYPE INT AND age RANGE (18,65), city IN ("New York","Boston")
//! ```
//!
//! This ruleset has two top-level rules. The first is a chain of two
//! expressions joined by `AND`.
//!
//! ## Grammar
//!
//! ```text
//! ruleset    := expression ( [","] expression )*
//! expression := FIELD CONDITION VALUE [ LOGICAL expression ]
//! ```
//!
//! `FIELD` is a bare identifier (`[A-Za-z0-9_.]+`) or the wrapper
//! `FIELD("name")` for column names that are not identifiers. `VALUE` is a
//! quoted literal, a number, a bare word, or a parenthesized list. `REQUIRED`
//! is the one condition whose value may be omitted.
//!
//! ## Conditions
//!
//! - **TYPE** `STRING` | `INT` | `FLOAT` | `BOOL` | `DATE`
//! - **RANGE** `(min,max)`, inclusive
//! - **MATCHES** a regular expression
//! - **IN** a list of allowed values
//! - **REQUIRED** non-blank value; takes no operand
//! - **`==` `!=` `>` `<` `>=` `<=`** comparison against a literal
//!
//! ## Examples
//!
//! ### Type check
//!
//! ```text
//! age TYPE INT
//! ```
//!
//! ### Allow-list with a fallback
//!
//! ```text
//! city IN ("New York","Boston") OR country == "US"
//! ```
//!
//! ### Column names with spaces
//!
//! ```text
//! FIELD("postal code") MATCHES "^[0-9]{5}$"
//! ```
pub mod tokens;
pub mod expressions;
pub mod operators;
pub mod ruleset;

pub use tokens::{Token, TokenKind};
pub use expressions::{Expression, Leaf, Logical, LogicalNode, Node, Operand};
pub use operators::{Comparison, Condition, LogicalOp, TypeName};
pub use ruleset::RuleSet;
