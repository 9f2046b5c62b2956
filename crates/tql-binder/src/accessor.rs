//! Accessors over the caller's telemetry context
//!
//! `Ctx` is whatever record type the caller runs queries against. Path
//! resolvers hand back [`GetSetter`]s; the binder turns literals and nested
//! calls into [`Getter`]s as well.

use crate::{ExprFunc, Val};

/// Reads a value out of the context
pub trait Getter<Ctx>: Send + Sync {
    fn get(&self, ctx: &mut Ctx) -> Val;
}

/// Writes a value into the context
pub trait Setter<Ctx>: Send + Sync {
    fn set(&self, ctx: &mut Ctx, value: Val);
}

/// Both directions; what a path resolves to
pub trait GetSetter<Ctx>: Getter<Ctx> + Setter<Ctx> {}

impl<Ctx, T: Getter<Ctx> + Setter<Ctx>> GetSetter<Ctx> for T {}

/// A constant from the statement text
pub(crate) struct Literal(pub(crate) Val);

impl<Ctx> Getter<Ctx> for Literal {
    fn get(&self, _ctx: &mut Ctx) -> Val {
        self.0.clone()
    }
}

/// A nested invocation used as a value
pub(crate) struct Call<Ctx>(pub(crate) ExprFunc<Ctx>);

impl<Ctx> Getter<Ctx> for Call<Ctx> {
    fn get(&self, ctx: &mut Ctx) -> Val {
        (self.0)(ctx)
    }
}

/// A resolved path used only for reading
pub(crate) struct PathGetter<Ctx>(pub(crate) Box<dyn GetSetter<Ctx>>);

impl<Ctx> Getter<Ctx> for PathGetter<Ctx> {
    fn get(&self, ctx: &mut Ctx) -> Val {
        self.0.get(ctx)
    }
}

/// A resolved path used only for writing
pub(crate) struct PathSetter<Ctx>(pub(crate) Box<dyn GetSetter<Ctx>>);

impl<Ctx> Setter<Ctx> for PathSetter<Ctx> {
    fn set(&self, ctx: &mut Ctx, value: Val) {
        self.0.set(ctx, value)
    }
}
