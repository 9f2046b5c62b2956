//! Canonical text printer for TQL AST
//!
//! Serializes a tree back to statement text that the parser accepts and that
//! parses to the same structure. Canonical form uses single spaces around
//! `==`, `!=`, `and`, `or` and `where`, `", "` between arguments, lowercase
//! hex for bytes and always writes a decimal point in floats.

use crate::{
    BooleanExpression, BooleanValue, Comparison, CompareOp, EnumSymbol, Field, Invocation,
    ParsedQuery, Path, Term, Value,
};

/// Trait for converting AST nodes to canonical TQL text.
pub trait ToTql {
    fn to_tql(&self) -> String;
}

/// Escape a string for output (double quotes, backslashes, control characters)
pub fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\0' => result.push_str("\\0"),
            _ => result.push(c),
        }
    }
    result
}

/// Format a float so it lexes back as a float literal.
///
/// `Debug` output is the shortest round-tripping form but drops the decimal
/// point for exponent notation (`1e-7`), which would lex as an integer.
fn format_float(value: f64) -> String {
    let text = format!("{:?}", value);
    if text.contains('.') || !value.is_finite() {
        return text;
    }
    match text.find('e') {
        Some(pos) => format!("{}.0{}", &text[..pos], &text[pos..]),
        None => format!("{}.0", text),
    }
}

fn format_bytes(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(2 + bytes.len() * 2);
    text.push_str("0x");
    for byte in bytes {
        text.push_str(&format!("{:02x}", byte));
    }
    text
}

// ===== Statement =====

impl ToTql for ParsedQuery {
    fn to_tql(&self) -> String {
        match &self.where_clause {
            Some(condition) => format!("{} where {}", self.invocation.to_tql(), condition.to_tql()),
            None => self.invocation.to_tql(),
        }
    }
}

impl ToTql for Invocation {
    fn to_tql(&self) -> String {
        let args = self
            .arguments
            .iter()
            .map(|arg| arg.to_tql())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.function, args)
    }
}

// ===== Values =====

impl ToTql for Value {
    fn to_tql(&self) -> String {
        match self {
            Value::Invocation(inv) => inv.to_tql(),
            Value::Bytes(bytes) => format_bytes(bytes),
            Value::String(s) => format!("\"{}\"", escape_string(s)),
            Value::Float(f) => format_float(*f),
            Value::Int(i) => i.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Nil => "nil".to_string(),
            Value::Enum(symbol) => symbol.to_tql(),
            Value::Path(path) => path.to_tql(),
        }
    }
}

impl ToTql for EnumSymbol {
    fn to_tql(&self) -> String {
        self.name.clone()
    }
}

impl ToTql for Path {
    fn to_tql(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.to_tql())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl ToTql for Field {
    fn to_tql(&self) -> String {
        match &self.map_key {
            Some(key) => format!("{}[\"{}\"]", self.name, escape_string(key)),
            None => self.name.clone(),
        }
    }
}

// ===== Conditions =====

impl ToTql for BooleanExpression {
    fn to_tql(&self) -> String {
        self.terms()
            .map(|t| t.to_tql())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl ToTql for Term {
    fn to_tql(&self) -> String {
        self.values()
            .map(|v| v.to_tql())
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

impl ToTql for BooleanValue {
    fn to_tql(&self) -> String {
        match self {
            BooleanValue::Comparison(cmp) => cmp.to_tql(),
            BooleanValue::Constant(b) => b.to_string(),
            BooleanValue::SubExpr(expr) => format!("({})", expr.to_tql()),
        }
    }
}

impl ToTql for Comparison {
    fn to_tql(&self) -> String {
        format!("{} {} {}", self.left.to_tql(), self.op.to_tql(), self.right.to_tql())
    }
}

impl ToTql for CompareOp {
    fn to_tql(&self) -> String {
        self.symbol().to_string()
    }
}
