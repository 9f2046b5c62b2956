//! Parser error types

use tql_ast::Span;
use tql_lexer::{LexError, TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected end of statement: expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    #[error("invalid {kind} literal: {reason}")]
    InvalidLiteral {
        kind: &'static str,
        reason: String,
        span: Span,
    },

    #[error("statement nested deeper than {max_depth} levels")]
    NestingTooDeep { max_depth: usize, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(e) => e.span(),
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { span, .. } => *span,
            ParseError::InvalidLiteral { span, .. } => *span,
            ParseError::NestingTooDeep { span, .. } => *span,
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: TokenKind, text: &str, span: Span) -> Self {
        if found == TokenKind::Eof {
            return ParseError::UnexpectedEof {
                expected: expected.into(),
                span,
            };
        }
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: format!("{} `{}`", found.describe(), text),
            span,
        }
    }
}
