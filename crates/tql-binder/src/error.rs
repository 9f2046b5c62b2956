//! Error types for binding and batch compilation

use tql_ast::Span;
use tql_parser::ParseError;
use thiserror::Error;

/// Errors from resolving a parsed statement against the registries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    /// E-BIND-001: No function registered under this exact name
    #[error("unknown function: {name}")]
    UnknownFunction { name: String, span: Span },

    /// E-BIND-002: Wrong argument count or kind, or the factory refused them
    #[error("invalid arguments for {function}: {reason}")]
    ArgumentShape {
        function: String,
        reason: String,
        span: Span,
    },

    /// E-BIND-003: The path resolver does not support this path
    #[error("unknown path {path}: {reason}")]
    UnknownPath {
        /// Canonical text of the path
        path: String,
        reason: String,
        span: Span,
    },

    /// E-BIND-004: The enum resolver has no value for this symbol
    #[error("unknown enum symbol: {symbol}")]
    UnknownEnumSymbol { symbol: String, span: Span },
}

impl BindError {
    /// Get the source span of this error
    pub fn span(&self) -> Span {
        match self {
            BindError::UnknownFunction { span, .. } => *span,
            BindError::ArgumentShape { span, .. } => *span,
            BindError::UnknownPath { span, .. } => *span,
            BindError::UnknownEnumSymbol { span, .. } => *span,
        }
    }

    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            BindError::UnknownFunction { .. } => "E-BIND-001",
            BindError::ArgumentShape { .. } => "E-BIND-002",
            BindError::UnknownPath { .. } => "E-BIND-003",
            BindError::UnknownEnumSymbol { .. } => "E-BIND-004",
        }
    }
}

/// Why a single statement failed to compile
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Bind(#[from] BindError),
}

impl QueryError {
    pub fn span(&self) -> Span {
        match self {
            QueryError::Parse(e) => e.span(),
            QueryError::Bind(e) => e.span(),
        }
    }
}

/// A failed statement within a batch
#[derive(Debug, Clone, PartialEq, Error)]
#[error("statement {index} `{statement}`: {error}")]
pub struct StatementError {
    /// Zero-based position in the batch
    pub index: usize,
    pub statement: String,
    pub error: QueryError,
}

/// Every failure from a batch, in statement order
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", join_messages(.errors))]
pub struct CompileError {
    errors: Vec<StatementError>,
}

impl CompileError {
    pub(crate) fn new(errors: Vec<StatementError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[StatementError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<StatementError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

fn join_messages(errors: &[StatementError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn unknown(index: usize, name: &str) -> StatementError {
        StatementError {
            index,
            statement: format!("{}()", name),
            error: QueryError::Bind(BindError::UnknownFunction {
                name: name.to_string(),
                span: Span::new(0, name.len() + 2),
            }),
        }
    }

    #[test]
    fn test_statement_error_names_cause_once() {
        let err = unknown(2, "bar");
        assert_eq!(err.to_string(), "statement 2 `bar()`: unknown function: bar");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_compile_error_joins_messages() {
        let err = CompileError::new(vec![unknown(0, "bar"), unknown(3, "baz")]);
        assert_eq!(
            err.to_string(),
            "statement 0 `bar()`: unknown function: bar; statement 3 `baz()`: unknown function: baz"
        );
        assert_eq!(err.len(), 2);
        assert_eq!(err.errors()[1].index, 3);
    }
}
