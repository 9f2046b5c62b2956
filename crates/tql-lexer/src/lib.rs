//! TQL Lexer - Tokenization using logos
//!
//! Turns one statement into a flat token list ending in [`TokenKind::Eof`].
//! Whitespace is dropped. Casing is significant: uppercase identifiers may
//! name functions or enum symbols, lowercase identifiers name functions or
//! path fields.

mod error;
mod token;

pub use error::*;
pub use token::*;

use logos::Logos;
use tql_ast::Span;

/// Tokenize a statement into a vector of tokens
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end);
        match result {
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(()) => return Err(lex_error(source, span)),
        }
    }

    demote_glued_keywords(&mut tokens);

    // Add EOF token
    let end = source.len();
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(end, end),
    });

    Ok(tokens)
}

/// Keywords only stand alone: `andThen` and `Xor` are identifier runs
fn demote_glued_keywords(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        if !tokens[i].kind.is_keyword() {
            continue;
        }
        let span = tokens[i].span;
        let glued_before = i > 0
            && tokens[i - 1].kind.is_identifier()
            && tokens[i - 1].span.end == span.start;
        let glued_after = tokens
            .get(i + 1)
            .is_some_and(|next| next.kind.is_identifier() && next.span.start == span.end);
        if glued_before || glued_after {
            tokens[i].kind = TokenKind::Lower;
        }
    }
}

fn lex_error(source: &str, span: Span) -> LexError {
    let ch = source[span.start..].chars().next().unwrap_or('\0');
    if ch == '"' {
        LexError::UnterminatedString {
            span: Span::new(span.start, source.len()),
        }
    } else {
        LexError::UnexpectedCharacter {
            ch,
            span: Span::new(span.start, span.start + ch.len_utf8()),
        }
    }
}

/// Strip the quotes from a string token and resolve its escape sequences
///
/// `span` is the span of the whole token, quotes included; it is used to
/// locate an invalid escape.
pub fn unescape(token_text: &str, span: Span) -> Result<String, LexError> {
    let inner = token_text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token_text);
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.char_indices();

    while let Some((_, c)) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '"')) => result.push('"'),
            Some((_, '\\')) => result.push('\\'),
            Some((_, 'n')) => result.push('\n'),
            Some((_, 't')) => result.push('\t'),
            Some((_, 'r')) => result.push('\r'),
            Some((_, '0')) => result.push('\0'),
            Some((i, other)) => {
                // `i` indexes the escaped char; the backslash sits right before it
                let start = span.start + i;
                return Err(LexError::InvalidEscape {
                    ch: other,
                    span: Span::new(start, start + 1 + other.len_utf8()),
                });
            }
            None => result.push('\\'),
        }
    }

    Ok(result)
}

/// A token with its span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }
}
