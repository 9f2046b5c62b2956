//! Token definitions for TQL
//!
//! Rule order matters where patterns overlap: hex bytes win over integers,
//! floats win over integers, keywords win over lowercase identifiers of the
//! same length, and uppercase identifiers win over lowercase ones for `_`.
//! A keyword glued to an identifier is demoted to `Lower` after lexing.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]  // Skip whitespace
pub enum TokenKind {
    // === Literals ===
    #[regex(r"0x[a-fA-F0-9]+")]
    Bytes,

    #[regex(r"[-+]?[0-9]*\.[0-9]+([eE][-+]?[0-9]+)?")]
    Float,

    #[regex(r"[-+]?[0-9]+")]
    Int,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    // === Keywords ===
    #[token("or")]
    Or,
    #[token("and")]
    And,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // === Operators ===
    #[token("==")]
    EqEq,
    #[token("!=")]
    Ne,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // === Punctuation ===
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    // === Identifiers ===
    /// Function name or enum symbol
    #[regex(r"[A-Z_][A-Z0-9_]*", priority = 3)]
    Upper,

    /// Function name or path field; `where` and `nil` are matched by text
    #[regex(r"[a-z_][a-z0-9_]*")]
    Lower,

    // === Special ===
    Eof,
}

impl TokenKind {
    pub fn is_identifier(&self) -> bool {
        matches!(self, TokenKind::Upper | TokenKind::Lower)
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Or | TokenKind::And | TokenKind::True | TokenKind::False
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, TokenKind::EqEq | TokenKind::Ne)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, TokenKind::True | TokenKind::False)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Bytes => "bytes literal",
            TokenKind::Float => "float",
            TokenKind::Int => "integer",
            TokenKind::String => "string",
            TokenKind::Or => "'or'",
            TokenKind::And => "'and'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::EqEq => "'=='",
            TokenKind::Ne => "'!='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Upper => "uppercase identifier",
            TokenKind::Lower => "lowercase identifier",
            TokenKind::Eof => "end of statement",
        }
    }
}
