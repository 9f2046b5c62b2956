//! Batch compilation of statement lists

use tql_parser::{parse_with, ParserConfig};
use tracing::{debug, warn};

use crate::{
    Binder, CompileError, EnumResolver, FunctionRegistry, PathResolver, Query, QueryError,
    StatementError,
};

/// Compile every statement with the default parser settings
///
/// Either every statement compiles and the queries come back in input order,
/// or none are returned and the error lists each failure.
pub fn compile<Ctx: 'static, S: AsRef<str>>(
    statements: &[S],
    functions: &FunctionRegistry<Ctx>,
    paths: &dyn PathResolver<Ctx>,
    enums: &dyn EnumResolver,
) -> Result<Vec<Query<Ctx>>, CompileError> {
    compile_with(statements, functions, paths, enums, &ParserConfig::default())
}

pub fn compile_with<Ctx: 'static, S: AsRef<str>>(
    statements: &[S],
    functions: &FunctionRegistry<Ctx>,
    paths: &dyn PathResolver<Ctx>,
    enums: &dyn EnumResolver,
    config: &ParserConfig,
) -> Result<Vec<Query<Ctx>>, CompileError> {
    let binder = Binder::new(functions, paths, enums);
    let mut queries = Vec::with_capacity(statements.len());
    let mut errors = Vec::new();

    for (index, statement) in statements.iter().enumerate() {
        let statement = statement.as_ref();
        debug!(index, statement, "compiling statement");

        match compile_statement(statement, &binder, config) {
            Ok(query) => queries.push(query),
            Err(error) => {
                warn!(index, statement, code = error_code(&error), %error, "statement failed");
                errors.push(StatementError {
                    index,
                    statement: statement.to_string(),
                    error,
                });
            }
        }
    }

    if !errors.is_empty() {
        debug!(failed = errors.len(), total = statements.len(), "batch rejected");
        return Err(CompileError::new(errors));
    }

    debug!(count = queries.len(), "batch compiled");
    Ok(queries)
}

/// Parse and bind one statement
pub fn compile_statement<Ctx: 'static>(
    statement: &str,
    binder: &Binder<'_, Ctx>,
    config: &ParserConfig,
) -> Result<Query<Ctx>, QueryError> {
    let parsed = parse_with(statement, config)?;
    Ok(binder.bind(&parsed)?)
}

fn error_code(error: &QueryError) -> &'static str {
    match error {
        QueryError::Parse(_) => "E-PARSE",
        QueryError::Bind(e) => e.code(),
    }
}
