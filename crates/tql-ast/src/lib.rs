//! TQL AST - Syntax tree for telemetry query statements
//!
//! A statement is a single function invocation with an optional `where`
//! clause. This crate defines the node types, byte spans into the statement
//! text, and the canonical printer used to turn a tree back into source.

mod span;
mod expr;
mod query;
mod printer;

pub use span::*;
pub use expr::*;
pub use query::*;
pub use printer::*;
