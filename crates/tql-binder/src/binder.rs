//! Resolves a parsed statement into a runnable [`Query`]

use tql_ast::{
    BooleanExpression, BooleanValue, EnumSymbol, Invocation, ParsedQuery, Path, Term, ToTql, Value,
};
use tracing::trace;

use crate::accessor::{Call, Literal, PathGetter, PathSetter};
use crate::{
    Argument, BindError, Condition, EnumResolver, ExprFunc, FunctionRegistry, GetSetter, Getter,
    ParamKind, PathResolver, Query, Val,
};

/// Binds statements against one set of registries
///
/// The registries are only read, so a binder can be shared freely.
pub struct Binder<'a, Ctx> {
    functions: &'a FunctionRegistry<Ctx>,
    paths: &'a dyn PathResolver<Ctx>,
    enums: &'a dyn EnumResolver,
}

impl<'a, Ctx: 'static> Binder<'a, Ctx> {
    pub fn new(
        functions: &'a FunctionRegistry<Ctx>,
        paths: &'a dyn PathResolver<Ctx>,
        enums: &'a dyn EnumResolver,
    ) -> Self {
        Self {
            functions,
            paths,
            enums,
        }
    }

    /// Bind the invocation and the `where` clause of one statement
    pub fn bind(&self, parsed: &ParsedQuery) -> Result<Query<Ctx>, BindError> {
        let function = self.bind_invocation(&parsed.invocation)?;
        let condition = match &parsed.where_clause {
            Some(expr) => self.bind_condition(expr)?,
            None => Condition::Always,
        };
        Ok(Query {
            function,
            condition,
        })
    }

    // === Invocations ===

    pub fn bind_invocation(&self, invocation: &Invocation) -> Result<ExprFunc<Ctx>, BindError> {
        trace!(
            function = %invocation.function,
            arguments = invocation.arguments.len(),
            "binding invocation"
        );
        let def = self
            .functions
            .get(&invocation.function)
            .ok_or_else(|| BindError::UnknownFunction {
                name: invocation.function.clone(),
                span: invocation.span,
            })?;
        let args = self.bind_arguments(invocation, def.params())?;
        def.build(args).map_err(|reason| shape_error(invocation, reason))
    }

    fn bind_arguments(
        &self,
        invocation: &Invocation,
        params: &[ParamKind],
    ) -> Result<Vec<Argument<Ctx>>, BindError> {
        if let Some(pos) = params.iter().position(|p| *p == ParamKind::StringList) {
            if pos + 1 != params.len() {
                return Err(shape_error(
                    invocation,
                    format!("string list parameter {} is not the last parameter", pos + 1),
                ));
            }
        }

        let variadic = params.last() == Some(&ParamKind::StringList);
        let fixed = if variadic { params.len() - 1 } else { params.len() };
        let given = invocation.arguments.len();
        if given < fixed || (!variadic && given > fixed) {
            let at_least = if variadic { "at least " } else { "" };
            return Err(shape_error(
                invocation,
                format!("expected {}{} arguments, got {}", at_least, fixed, given),
            ));
        }

        let mut bound = Vec::with_capacity(params.len());
        for (index, (kind, value)) in params[..fixed]
            .iter()
            .zip(&invocation.arguments)
            .enumerate()
        {
            bound.push(self.bind_argument(invocation, index, *kind, value)?);
        }

        if variadic {
            let rest = invocation.arguments[fixed..]
                .iter()
                .enumerate()
                .map(|(offset, value)| match value {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(shape_error(
                        invocation,
                        format!(
                            "argument {} must be a string literal, found {}",
                            fixed + offset + 1,
                            other.describe()
                        ),
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?;
            bound.push(Argument::StringList(rest));
        }

        Ok(bound)
    }

    fn bind_argument(
        &self,
        invocation: &Invocation,
        index: usize,
        kind: ParamKind,
        value: &Value,
    ) -> Result<Argument<Ctx>, BindError> {
        let argument = match (kind, value) {
            (ParamKind::Getter, value) => Argument::Getter(self.bind_getter(value)?),
            (ParamKind::Setter, Value::Path(path)) => {
                Argument::Setter(Box::new(PathSetter(self.resolve_path(path)?)))
            }
            (ParamKind::GetSetter, Value::Path(path)) => {
                Argument::GetSetter(self.resolve_path(path)?)
            }
            (ParamKind::String, Value::String(s)) => Argument::String(s.clone()),
            (ParamKind::Float, Value::Float(f)) => Argument::Float(*f),
            (ParamKind::Int, Value::Int(i)) => Argument::Int(*i),
            (ParamKind::Bool, Value::Bool(b)) => Argument::Bool(*b),
            (ParamKind::Bytes, Value::Bytes(bytes)) => Argument::Bytes(bytes.clone()),
            (ParamKind::Enum, Value::Enum(symbol)) => Argument::Enum(self.resolve_enum(symbol)?),
            (kind, value) => {
                return Err(shape_error(
                    invocation,
                    format!(
                        "argument {} expects {}, found {}",
                        index + 1,
                        kind.describe(),
                        value.describe()
                    ),
                ));
            }
        };
        Ok(argument)
    }

    /// Any value can be read: paths, nested calls, enums and literals
    fn bind_getter(&self, value: &Value) -> Result<Box<dyn Getter<Ctx>>, BindError> {
        let getter: Box<dyn Getter<Ctx>> = match value {
            Value::Invocation(inv) => Box::new(Call(self.bind_invocation(inv)?)),
            Value::Path(path) => Box::new(PathGetter(self.resolve_path(path)?)),
            Value::Enum(symbol) => Box::new(Literal(Val::Int(self.resolve_enum(symbol)?))),
            Value::Bytes(bytes) => Box::new(Literal(Val::Bytes(bytes.clone()))),
            Value::String(s) => Box::new(Literal(Val::String(s.clone()))),
            Value::Float(f) => Box::new(Literal(Val::Float(*f))),
            Value::Int(i) => Box::new(Literal(Val::Int(*i))),
            Value::Bool(b) => Box::new(Literal(Val::Bool(*b))),
            Value::Nil => Box::new(Literal(Val::Nil)),
        };
        Ok(getter)
    }

    fn resolve_path(&self, path: &Path) -> Result<Box<dyn GetSetter<Ctx>>, BindError> {
        self.paths
            .resolve(path)
            .map_err(|reason| BindError::UnknownPath {
                path: path.to_tql(),
                reason,
                span: path.span,
            })
    }

    fn resolve_enum(&self, symbol: &EnumSymbol) -> Result<i64, BindError> {
        self.enums
            .resolve(&symbol.name)
            .ok_or_else(|| BindError::UnknownEnumSymbol {
                symbol: symbol.name.clone(),
                span: symbol.span,
            })
    }

    // === Conditions ===

    pub fn bind_condition(&self, expr: &BooleanExpression) -> Result<Condition<Ctx>, BindError> {
        let terms = expr
            .terms()
            .map(|term| self.bind_term(term))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(collapse(terms, Condition::Any))
    }

    fn bind_term(&self, term: &Term) -> Result<Condition<Ctx>, BindError> {
        let values = term
            .values()
            .map(|value| self.bind_boolean_value(value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(collapse(values, Condition::All))
    }

    fn bind_boolean_value(&self, value: &BooleanValue) -> Result<Condition<Ctx>, BindError> {
        match value {
            BooleanValue::Comparison(cmp) => Ok(Condition::Compare {
                left: self.bind_getter(&cmp.left)?,
                op: cmp.op,
                right: self.bind_getter(&cmp.right)?,
            }),
            BooleanValue::Constant(b) => Ok(Condition::Constant(*b)),
            BooleanValue::SubExpr(expr) => self.bind_condition(expr),
        }
    }
}

/// A single operand needs no `All`/`Any` wrapper
fn collapse<Ctx>(
    mut operands: Vec<Condition<Ctx>>,
    wrap: fn(Vec<Condition<Ctx>>) -> Condition<Ctx>,
) -> Condition<Ctx> {
    if operands.len() == 1 {
        if let Some(only) = operands.pop() {
            return only;
        }
    }
    wrap(operands)
}

fn shape_error(invocation: &Invocation, reason: String) -> BindError {
    BindError::ArgumentShape {
        function: invocation.function.clone(),
        reason,
        span: invocation.span,
    }
}
