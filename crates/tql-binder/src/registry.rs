//! Function registry and argument shapes
//!
//! Each function declares the kind of every parameter. The binder checks the
//! parsed arguments against that list, converts them into [`Argument`]s and
//! hands them to the function's factory, which returns the callable.

use std::collections::HashMap;
use std::fmt;

use crate::{GetSetter, Getter, Setter, Val};

/// The bound form of an invocation; runs against one context
pub type ExprFunc<Ctx> = Box<dyn Fn(&mut Ctx) -> Val + Send + Sync>;

/// Builds an [`ExprFunc`] from bound arguments, or explains why it cannot
pub type FunctionFactory<Ctx> =
    Box<dyn Fn(Arguments<Ctx>) -> Result<ExprFunc<Ctx>, String> + Send + Sync>;

/// What a function expects in one parameter position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Any value: path, nested call, enum or literal
    Getter,
    /// A path to write to
    Setter,
    /// A path to read and write
    GetSetter,
    String,
    /// Zero or more trailing string literals; only valid last
    StringList,
    Float,
    Int,
    Bool,
    Bytes,
    /// An uppercase enum symbol
    Enum,
}

impl ParamKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ParamKind::Getter => "value",
            ParamKind::Setter => "path",
            ParamKind::GetSetter => "path",
            ParamKind::String => "string literal",
            ParamKind::StringList => "string literal",
            ParamKind::Float => "float literal",
            ParamKind::Int => "integer literal",
            ParamKind::Bool => "boolean literal",
            ParamKind::Bytes => "bytes literal",
            ParamKind::Enum => "enum symbol",
        }
    }
}

/// One bound argument
pub enum Argument<Ctx> {
    Getter(Box<dyn Getter<Ctx>>),
    Setter(Box<dyn Setter<Ctx>>),
    GetSetter(Box<dyn GetSetter<Ctx>>),
    String(String),
    StringList(Vec<String>),
    Float(f64),
    Int(i64),
    Bool(bool),
    Bytes(Vec<u8>),
    Enum(i64),
}

impl<Ctx> Argument<Ctx> {
    pub fn kind(&self) -> ParamKind {
        match self {
            Argument::Getter(_) => ParamKind::Getter,
            Argument::Setter(_) => ParamKind::Setter,
            Argument::GetSetter(_) => ParamKind::GetSetter,
            Argument::String(_) => ParamKind::String,
            Argument::StringList(_) => ParamKind::StringList,
            Argument::Float(_) => ParamKind::Float,
            Argument::Int(_) => ParamKind::Int,
            Argument::Bool(_) => ParamKind::Bool,
            Argument::Bytes(_) => ParamKind::Bytes,
            Argument::Enum(_) => ParamKind::Enum,
        }
    }
}

impl<Ctx> fmt::Debug for Argument<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Getter(_) => f.write_str("Getter(..)"),
            Argument::Setter(_) => f.write_str("Setter(..)"),
            Argument::GetSetter(_) => f.write_str("GetSetter(..)"),
            Argument::String(s) => f.debug_tuple("String").field(s).finish(),
            Argument::StringList(list) => f.debug_tuple("StringList").field(list).finish(),
            Argument::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Argument::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Argument::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Argument::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
            Argument::Enum(v) => f.debug_tuple("Enum").field(v).finish(),
        }
    }
}

/// Bound arguments in declaration order, consumed front to back by a factory
pub struct Arguments<Ctx> {
    args: std::vec::IntoIter<Argument<Ctx>>,
    position: usize,
}

macro_rules! take_variant {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&mut self) -> Result<$ty, String> {
            match self.next_arg(ParamKind::$variant)? {
                Argument::$variant(value) => Ok(value),
                other => Err(self.mismatch(ParamKind::$variant, &other)),
            }
        }
    };
}

impl<Ctx> Arguments<Ctx> {
    pub fn new(args: Vec<Argument<Ctx>>) -> Self {
        Self {
            args: args.into_iter(),
            position: 0,
        }
    }

    /// Arguments not yet taken
    pub fn remaining(&self) -> usize {
        self.args.len()
    }

    fn next_arg(&mut self, expected: ParamKind) -> Result<Argument<Ctx>, String> {
        self.position += 1;
        self.args.next().ok_or_else(|| {
            format!(
                "missing argument {}: expected {}",
                self.position,
                expected.describe()
            )
        })
    }

    fn mismatch(&self, expected: ParamKind, found: &Argument<Ctx>) -> String {
        format!(
            "argument {} is a {:?}, expected {:?}",
            self.position,
            found.kind(),
            expected
        )
    }

    take_variant!(take_getter, Getter, Box<dyn Getter<Ctx>>);
    take_variant!(take_setter, Setter, Box<dyn Setter<Ctx>>);
    take_variant!(take_get_setter, GetSetter, Box<dyn GetSetter<Ctx>>);
    take_variant!(take_string, String, String);
    take_variant!(take_string_list, StringList, Vec<String>);
    take_variant!(take_float, Float, f64);
    take_variant!(take_int, Int, i64);
    take_variant!(take_bool, Bool, bool);
    take_variant!(take_bytes, Bytes, Vec<u8>);
    take_variant!(
        /// The value the enum resolver returned for the symbol
        take_enum, Enum, i64
    );
}

/// A registered function: its parameter shape and the factory that builds it
pub struct FunctionDef<Ctx> {
    params: Vec<ParamKind>,
    factory: FunctionFactory<Ctx>,
}

impl<Ctx> FunctionDef<Ctx> {
    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    /// Whether the last parameter soaks up trailing string literals
    pub fn is_variadic(&self) -> bool {
        self.params.last() == Some(&ParamKind::StringList)
    }

    pub fn build(&self, args: Vec<Argument<Ctx>>) -> Result<ExprFunc<Ctx>, String> {
        (self.factory)(Arguments::new(args))
    }
}

/// Functions available to statements, keyed by exact name
pub struct FunctionRegistry<Ctx> {
    functions: HashMap<String, FunctionDef<Ctx>>,
}

impl<Ctx> FunctionRegistry<Ctx> {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Register `name` with the given parameter shape
    ///
    /// A later registration under the same name replaces the earlier one.
    /// `StringList` anywhere but last is rejected by the binder as a shape
    /// error when the function is called.
    pub fn register<F>(&mut self, name: impl Into<String>, params: &[ParamKind], factory: F) -> &mut Self
    where
        F: Fn(Arguments<Ctx>) -> Result<ExprFunc<Ctx>, String> + Send + Sync + 'static,
    {
        self.functions.insert(
            name.into(),
            FunctionDef {
                params: params.to_vec(),
                factory: Box::new(factory),
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef<Ctx>> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl<Ctx> Default for FunctionRegistry<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}
