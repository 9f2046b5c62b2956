//! Recursive descent parser implementation

use tql_ast::*;
use tql_lexer::{unescape, Token, TokenKind};

use crate::{ParseError, ParserConfig};

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn with_config(source: &'a str, mut tokens: Vec<Token>, config: &ParserConfig) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = source.len();
            tokens.push(Token {
                kind: TokenKind::Eof,
                span: Span::new(end, end),
            });
        }
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            max_depth: config.max_depth,
        }
    }

    // === Utilities ===

    fn current(&self) -> Token {
        // The last token is always Eof, so clamping parks the cursor on it
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_ahead(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.current();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    /// Lowercase identifier with the given text, e.g. `where`
    fn at_word(&self, word: &str) -> bool {
        self.at(TokenKind::Lower) && self.text(self.current()) == word
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        ParseError::unexpected(expected, token.kind, self.text(token), token.span)
    }

    fn text(&self, token: Token) -> &'a str {
        token.text(self.source)
    }

    fn span(&self) -> Span {
        self.current().span
    }

    fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].span,
            None => self.span(),
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                max_depth: self.max_depth,
                span: self.previous_span(),
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Number of identifier tokens at the cursor with no whitespace between them
    fn identifier_run(&self) -> usize {
        let mut len = 0;
        let mut end: Option<usize> = None;
        while let Some(token) = self.tokens.get(self.pos + len) {
            if !token.kind.is_identifier() || end.is_some_and(|e| e != token.span.start) {
                break;
            }
            end = Some(token.span.end);
            len += 1;
        }
        len
    }

    // === Statement ===

    pub fn parse_query(&mut self) -> Result<ParsedQuery, ParseError> {
        let start = self.span();
        let invocation = self.parse_invocation()?;

        let where_clause = if self.at_word("where") {
            self.advance();
            Some(self.parse_boolean_expression()?)
        } else {
            None
        };

        if !self.at(TokenKind::Eof) {
            let expected = if where_clause.is_some() {
                "'and', 'or' or end of statement"
            } else {
                "'where' or end of statement"
            };
            return Err(self.unexpected(expected));
        }

        Ok(ParsedQuery {
            invocation,
            where_clause,
            span: start.merge(self.previous_span()),
        })
    }

    // === Invocations ===

    fn parse_invocation(&mut self) -> Result<Invocation, ParseError> {
        let start = self.span();
        let function = self.parse_function_name()?;
        self.consume(TokenKind::LParen)?;
        self.enter()?;

        let mut arguments = Vec::new();
        if !self.at(TokenKind::RParen) && !self.at(TokenKind::Eof) {
            loop {
                arguments.push(self.parse_value()?);
                if !self.at(TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }

        let end = self.consume(TokenKind::RParen)?.span;
        self.leave();

        Ok(Invocation {
            function,
            arguments,
            span: start.merge(end),
        })
    }

    /// One or more adjacent identifiers; `replaceAll` lexes as three tokens
    ///
    /// The identifiers must touch. `foo bar()` is rejected rather than read
    /// as a call to `foobar`.
    fn parse_function_name(&mut self) -> Result<String, ParseError> {
        let run = self.identifier_run();
        if run == 0 {
            return Err(self.unexpected("function name"));
        }
        let mut name = String::new();
        for _ in 0..run {
            let token = self.advance();
            name.push_str(self.text(token));
        }
        Ok(name)
    }

    // === Values ===

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let token = self.current();
        match token.kind {
            TokenKind::Upper | TokenKind::Lower => self.parse_identifier_value(),
            TokenKind::Bytes => {
                self.advance();
                Ok(Value::Bytes(decode_hex(self.text(token), token.span)?))
            }
            TokenKind::String => {
                self.advance();
                Ok(Value::String(unescape(self.text(token), token.span)?))
            }
            TokenKind::Float => {
                self.advance();
                Ok(Value::Float(parse_float(self.text(token), token.span)?))
            }
            TokenKind::Int => {
                self.advance();
                Ok(Value::Int(parse_int(self.text(token), token.span)?))
            }
            TokenKind::True => {
                self.advance();
                Ok(Value::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Value::Bool(false))
            }
            _ => Err(self.unexpected("value")),
        }
    }

    /// Invocation, `nil`, enum symbol or path, tried in that order
    fn parse_identifier_value(&mut self) -> Result<Value, ParseError> {
        let run = self.identifier_run();
        if self.peek_ahead(run) == TokenKind::LParen {
            return Ok(Value::Invocation(self.parse_invocation()?));
        }

        let token = self.current();
        if token.kind == TokenKind::Lower && self.text(token) == "nil" {
            self.advance();
            return Ok(Value::Nil);
        }
        if token.kind == TokenKind::Upper {
            self.advance();
            return Ok(Value::Enum(EnumSymbol {
                name: self.text(token).to_string(),
                span: token.span,
            }));
        }

        Ok(Value::Path(self.parse_path()?))
    }

    fn parse_path(&mut self) -> Result<Path, ParseError> {
        let start = self.span();
        let mut fields = vec![self.parse_field()?];
        while self.at(TokenKind::Dot) {
            self.advance();
            fields.push(self.parse_field()?);
        }
        Ok(Path {
            fields,
            span: start.merge(self.previous_span()),
        })
    }

    fn parse_field(&mut self) -> Result<Field, ParseError> {
        if !self.at(TokenKind::Lower) {
            return Err(self.unexpected("field name"));
        }
        let name_token = self.advance();
        let name = self.text(name_token).to_string();

        let map_key = if self.at(TokenKind::LBracket) {
            self.advance();
            let key_token = self.consume(TokenKind::String)?;
            let key = unescape(self.text(key_token), key_token.span)?;
            self.consume(TokenKind::RBracket)?;
            Some(key)
        } else {
            None
        };

        Ok(Field { name, map_key })
    }

    // === Conditions ===

    fn parse_boolean_expression(&mut self) -> Result<BooleanExpression, ParseError> {
        let left = self.parse_term()?;
        let mut right = Vec::new();
        while self.at(TokenKind::Or) {
            self.advance();
            right.push(self.parse_term()?);
        }
        Ok(BooleanExpression { left, right })
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        let left = self.parse_boolean_value()?;
        let mut right = Vec::new();
        while self.at(TokenKind::And) {
            self.advance();
            right.push(self.parse_boolean_value()?);
        }
        Ok(Term { left, right })
    }

    fn parse_boolean_value(&mut self) -> Result<BooleanValue, ParseError> {
        match self.peek() {
            // No value starts with '(', so this is always a group
            TokenKind::LParen => {
                self.advance();
                self.enter()?;
                let expr = self.parse_boolean_expression()?;
                self.consume(TokenKind::RParen)?;
                self.leave();
                Ok(BooleanValue::SubExpr(Box::new(expr)))
            }
            kind if kind.is_boolean() && !self.peek_ahead(1).is_comparison() => {
                self.advance();
                Ok(BooleanValue::Constant(kind == TokenKind::True))
            }
            _ => Ok(BooleanValue::Comparison(self.parse_comparison()?)),
        }
    }

    fn parse_comparison(&mut self) -> Result<Comparison, ParseError> {
        let start = self.span();
        let left = self.parse_value()?;
        let op = match self.peek() {
            TokenKind::EqEq => CompareOp::Eq,
            TokenKind::Ne => CompareOp::Ne,
            _ => return Err(self.unexpected("comparison operator '==' or '!='")),
        };
        self.advance();
        let right = self.parse_value()?;

        Ok(Comparison {
            left,
            op,
            right,
            span: start.merge(self.previous_span()),
        })
    }
}

// === Literal decoding ===

fn decode_hex(text: &str, span: Span) -> Result<Vec<u8>, ParseError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    let invalid = |reason: String| ParseError::InvalidLiteral {
        kind: "bytes",
        reason,
        span,
    };
    if digits.len() % 2 != 0 {
        return Err(invalid("odd number of hex digits".to_string()));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|e| invalid(e.to_string())))
        .collect()
}

fn parse_int(text: &str, span: Span) -> Result<i64, ParseError> {
    text.parse().map_err(|e: std::num::ParseIntError| ParseError::InvalidLiteral {
        kind: "integer",
        reason: e.to_string(),
        span,
    })
}

fn parse_float(text: &str, span: Span) -> Result<f64, ParseError> {
    let invalid = |reason: String| ParseError::InvalidLiteral {
        kind: "float",
        reason,
        span,
    };
    let value: f64 = text.parse().map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
    if !value.is_finite() {
        return Err(invalid("value out of range".to_string()));
    }
    Ok(value)
}
