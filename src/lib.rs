//! TQL - Telemetry Query Language
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use tql_ast as ast;
pub use tql_binder as binder;
pub use tql_lexer as lexer;
pub use tql_parser as parser;

pub use tql_binder::{compile, compile_with, CompileError, FunctionRegistry, Query, Val};
pub use tql_parser::{parse, parse_with, ParseError, ParserConfig};
