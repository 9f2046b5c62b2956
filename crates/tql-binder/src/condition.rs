//! Compiled `where` clauses

use std::fmt;

use tql_ast::CompareOp;

use crate::Getter;

/// A boolean predicate over the context
///
/// `All` and `Any` evaluate left to right and stop at the first operand that
/// decides the result.
pub enum Condition<Ctx> {
    /// No `where` clause
    Always,
    /// Literal `true` or `false`
    Constant(bool),
    Compare {
        left: Box<dyn Getter<Ctx>>,
        op: CompareOp,
        right: Box<dyn Getter<Ctx>>,
    },
    /// Operands of `and`
    All(Vec<Condition<Ctx>>),
    /// Operands of `or`
    Any(Vec<Condition<Ctx>>),
}

impl<Ctx> Condition<Ctx> {
    pub fn evaluate(&self, ctx: &mut Ctx) -> bool {
        match self {
            Condition::Always => true,
            Condition::Constant(value) => *value,
            Condition::Compare { left, op, right } => {
                let left = left.get(ctx);
                let right = right.get(ctx);
                match op {
                    CompareOp::Eq => left == right,
                    CompareOp::Ne => left != right,
                }
            }
            Condition::All(operands) => operands.iter().all(|c| c.evaluate(ctx)),
            Condition::Any(operands) => operands.iter().any(|c| c.evaluate(ctx)),
        }
    }

    /// True when the statement had no `where` clause
    pub fn is_unconditional(&self) -> bool {
        matches!(self, Condition::Always)
    }
}

impl<Ctx> fmt::Debug for Condition<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Always => f.write_str("Always"),
            Condition::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Condition::Compare { op, .. } => write!(f, "Compare(_ {} _)", op.symbol()),
            Condition::All(operands) => f.debug_tuple("All").field(operands).finish(),
            Condition::Any(operands) => f.debug_tuple("Any").field(operands).finish(),
        }
    }
}
