//! Path and enum resolution supplied by the caller

use std::collections::HashMap;

use tql_ast::Path;

use crate::GetSetter;

/// Maps a parsed path onto an accessor over the telemetry context
pub trait PathResolver<Ctx>: Send + Sync {
    /// Resolve `path`, or explain why it is not supported
    fn resolve(&self, path: &Path) -> Result<Box<dyn GetSetter<Ctx>>, String>;
}

impl<Ctx, F> PathResolver<Ctx> for F
where
    F: Fn(&Path) -> Result<Box<dyn GetSetter<Ctx>>, String> + Send + Sync,
{
    fn resolve(&self, path: &Path) -> Result<Box<dyn GetSetter<Ctx>>, String> {
        self(path)
    }
}

/// Maps an uppercase symbol to its numeric value
pub trait EnumResolver: Send + Sync {
    fn resolve(&self, symbol: &str) -> Option<i64>;
}

impl EnumResolver for HashMap<String, i64> {
    fn resolve(&self, symbol: &str) -> Option<i64> {
        self.get(symbol).copied()
    }
}

impl<F> EnumResolver for F
where
    F: Fn(&str) -> Option<i64> + Send + Sync,
{
    fn resolve(&self, symbol: &str) -> Option<i64> {
        self(symbol)
    }
}
