//! Value AST nodes: invocations, literals, enum symbols and paths

use serde::{Deserialize, Serialize};
use crate::Span;

/// A function call: `set(attributes["k"], "v")`
///
/// The name is matched exactly against the function registry at bind time.
/// Upper and lower case names are both accepted by the grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub function: String,
    pub arguments: Vec<Value>,
    pub span: Span,
}

/// Anything that resolves to a value when a statement runs
///
/// The parser tries the alternatives in declaration order. A bare uppercase
/// identifier is an [`EnumSymbol`] unless it is followed by `(`, in which case
/// it names a nested [`Invocation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Nested call: `concat(name, "-x")`
    Invocation(Invocation),
    /// Hex literal: `0x1a2b`
    Bytes(Vec<u8>),
    /// Unescaped string literal: `"http.method"`
    String(String),
    Float(f64),
    Int(i64),
    Bool(bool),
    /// `nil`
    Nil,
    /// Bare uppercase symbol: `SEVERITY_NUMBER_INFO`
    Enum(EnumSymbol),
    /// Telemetry field reference: `resource.attributes["host"]`
    Path(Path),
}

impl Value {
    /// Short name of the variant, used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Value::Invocation(_) => "function call",
            Value::Bytes(_) => "bytes literal",
            Value::String(_) => "string literal",
            Value::Float(_) => "float literal",
            Value::Int(_) => "integer literal",
            Value::Bool(_) => "boolean literal",
            Value::Nil => "nil",
            Value::Enum(_) => "enum symbol",
            Value::Path(_) => "path",
        }
    }
}

/// An uppercase symbol resolved through the enum table at bind time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumSymbol {
    pub name: String,
    pub span: Span,
}

/// A dotted sequence of fields addressing a location in a telemetry record
///
/// Never empty. Field names are always lowercase identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub fields: Vec<Field>,
    pub span: Span,
}

/// One segment of a [`Path`]: `attributes` or `attributes["key"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub map_key: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map_key: None,
        }
    }

    pub fn keyed(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map_key: Some(key.into()),
        }
    }
}
