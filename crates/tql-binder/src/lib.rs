//! tql-binder: Statement binding and batch compilation
//!
//! This crate turns parsed statements into runnable queries:
//! - Look up invocations in a [`FunctionRegistry`] and check their argument shape
//! - Resolve paths and enum symbols through caller-supplied resolvers
//! - Compile `where` clauses into short-circuiting [`Condition`]s
//! - Compile whole batches, collecting every failure (E-BIND-001..004)
//!
//! # Example
//!
//! ```ignore
//! use std::collections::HashMap;
//! use tql_binder::{compile, FunctionRegistry, Val};
//!
//! let mut functions = FunctionRegistry::<Record>::new();
//! functions.register("drop", &[], |_| Ok(Box::new(|_: &mut Record| Val::Nil)));
//!
//! let enums: HashMap<String, i64> = HashMap::new();
//! let queries = compile(&["drop() where name == \"noise\""], &functions, &resolve_path, &enums)?;
//! for query in &queries {
//!     if query.condition.evaluate(&mut record) {
//!         (query.function)(&mut record);
//!     }
//! }
//! ```

mod accessor;
mod binder;
mod compile;
mod condition;
mod error;
mod query;
mod registry;
mod resolver;
mod value;

#[cfg(test)]
mod test_support;

pub use accessor::{GetSetter, Getter, Setter};
pub use binder::Binder;
pub use compile::{compile, compile_statement, compile_with};
pub use condition::Condition;
pub use error::{BindError, CompileError, QueryError, StatementError};
pub use query::Query;
pub use registry::{
    Argument, Arguments, ExprFunc, FunctionDef, FunctionFactory, FunctionRegistry, ParamKind,
};
pub use resolver::{EnumResolver, PathResolver};
pub use value::Val;
