//! Statement and `where` clause AST nodes

use serde::{Deserialize, Serialize};
use crate::{Invocation, Span, Value};

/// A parsed statement: `invocation [where condition]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub invocation: Invocation,
    pub where_clause: Option<BooleanExpression>,
    pub span: Span,
}

/// Terms joined by `or`
///
/// `and` binds tighter than `or` because each [`Term`] already groups its
/// `and` operands; no precedence climbing happens after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanExpression {
    pub left: Term,
    pub right: Vec<Term>,
}

impl BooleanExpression {
    /// All terms in source order
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        std::iter::once(&self.left).chain(self.right.iter())
    }
}

/// Boolean values joined by `and`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub left: BooleanValue,
    pub right: Vec<BooleanValue>,
}

impl Term {
    /// All operands in source order
    pub fn values(&self) -> impl Iterator<Item = &BooleanValue> {
        std::iter::once(&self.left).chain(self.right.iter())
    }
}

/// A single operand of `and`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BooleanValue {
    Comparison(Comparison),
    /// `true` or `false`
    Constant(bool),
    /// Parenthesized group: `(a == 1 or b == 2)`
    SubExpr(Box<BooleanExpression>),
}

/// `left == right` or `left != right`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub left: Value,
    pub op: CompareOp,
    pub right: Value,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
        }
    }
}
