//! The compiled statement handed back to callers

use std::fmt;

use crate::{Condition, ExprFunc};

/// A bound function plus the condition gating it
///
/// Callers decide when to run it: evaluate `condition` against a record and,
/// if it holds, call `function` on the same record.
pub struct Query<Ctx> {
    pub function: ExprFunc<Ctx>,
    pub condition: Condition<Ctx>,
}

impl<Ctx> fmt::Debug for Query<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("function", &"<fn>")
            .field("condition", &self.condition)
            .finish()
    }
}
