///
/// Scalar function tables and their registration.
///
/// Each extension declares a `&'static [ScalarFunction]` in the order its
/// functions are registered. `register_all` walks the table and stops at
/// the first failure, so a failed load never continues past a broken
/// registration.
///

use std::os::raw::c_int;

use rusqlite::Connection;
use rusqlite::functions::{Context, FunctionFlags};
use tracing::debug;

use crate::error::HostFuncError;
use crate::value::HostValue;

pub type ScalarFn = fn(&Context<'_>) -> Result<HostValue, HostFuncError>;

#[derive(Clone, Copy)]
pub struct ScalarFunction {
    pub name: &'static str,
    pub n_arg: c_int,
    pub func: ScalarFn,
}

impl ScalarFunction {
    pub const fn new(name: &'static str, n_arg: c_int, func: ScalarFn) -> Self {
        Self { name, n_arg, func }
    }

    pub fn flags() -> FunctionFlags {
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC
    }

    /// Register this function on `conn`, replacing any function SQLite
    /// already knows under the same name and arity.
    pub fn register(&self, conn: &Connection) -> Result<(), HostFuncError> {
        let Self { name, n_arg, func } = *self;
        conn.create_scalar_function(name, n_arg, Self::flags(), move |ctx| {
            check_argument_count(name, n_arg, ctx.len())?;
            func(ctx).map_err(rusqlite::Error::from)
        })
        .map_err(|source| HostFuncError::Registration {
            function: name,
            n_arg,
            source,
        })?;
        debug!(function = name, n_arg, "registered scalar function");
        Ok(())
    }
}

impl std::fmt::Debug for ScalarFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarFunction")
            .field("name", &self.name)
            .field("n_arg", &self.n_arg)
            .finish_non_exhaustive()
    }
}

/// Register every function in `functions`, in order.
pub fn register_all(conn: &Connection, functions: &[ScalarFunction]) -> Result<(), HostFuncError> {
    for function in functions {
        function.register(conn)?;
    }
    Ok(())
}

/// `register_all` as an extension load sees it: the first failure comes
/// back as the `rusqlite::Error` whose code the entry point returns.
pub fn register_for_host(conn: &Connection, functions: &[ScalarFunction]) -> rusqlite::Result<()> {
    register_all(conn, functions).map_err(rusqlite::Error::from)
}

pub fn check_argument_count(
    function: &'static str,
    expected: c_int,
    got: usize,
) -> Result<(), HostFuncError> {
    if usize::try_from(expected).ok() == Some(got) {
        Ok(())
    } else {
        Err(HostFuncError::ArgumentCount {
            function,
            expected: usize::try_from(expected).unwrap_or(0),
            got,
        })
    }
}
