//! TQL Parser - Recursive descent parser
//!
//! Parses one statement into a [`ParsedQuery`]:
//!
//! ```text
//! statement  := invocation ( "where" bool_expr )?
//! invocation := NAME "(" ( value ( "," value )* )? ")"
//! bool_expr  := term ( "or" term )*
//! term       := bool_value ( "and" bool_value )*
//! bool_value := comparison | "true" | "false" | "(" bool_expr ")"
//! comparison := value ( "==" | "!=" ) value
//! value      := invocation | BYTES | STRING | FLOAT | INT | "true" | "false"
//!             | "nil" | UPPER | path
//! path       := field ( "." field )*
//! field      := LOWER ( "[" STRING "]" )?
//! ```

mod config;
mod error;
mod parser;

pub use config::*;
pub use error::*;
pub use parser::*;

use tql_ast::ParsedQuery;
use tql_lexer::tokenize;

/// Parse a statement into a query AST
pub fn parse(source: &str) -> Result<ParsedQuery, ParseError> {
    parse_with(source, &ParserConfig::default())
}

/// Parse a statement with explicit limits
pub fn parse_with(source: &str, config: &ParserConfig) -> Result<ParsedQuery, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::with_config(source, tokens, config);
    parser.parse_query()
}
