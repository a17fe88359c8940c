///
/// Error types shared by the hostfuncs extensions.
///
/// A missing value is never an error: functions return `HostValue::Null`
/// for that. Errors here are the cases SQLite must see as a failed call
/// or a failed extension load.
///

use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostFuncError {
    #[error("{function}() takes {expected} argument(s) but {got} were supplied")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("out of memory copying the result of {function}()")]
    OutOfMemory { function: &'static str },

    #[error("failed to register {function}/{n_arg}: {source}")]
    Registration {
        function: &'static str,
        n_arg: i32,
        #[source]
        source: rusqlite::Error,
    },
}

impl From<HostFuncError> for rusqlite::Error {
    fn from(err: HostFuncError) -> Self {
        match err {
            HostFuncError::ArgumentCount { .. } => rusqlite::Error::SqliteFailure(
                ffi::Error::new(ffi::SQLITE_ERROR),
                Some(err.to_string()),
            ),
            // A message would make sqlite3_result_error overwrite the code
            // with SQLITE_ERROR, so NOMEM travels alone.
            HostFuncError::OutOfMemory { .. } => {
                rusqlite::Error::SqliteFailure(ffi::Error::new(ffi::SQLITE_NOMEM), None)
            }
            HostFuncError::Registration { source, .. } => source,
        }
    }
}
