///
/// Loadable-extension entry support.
///
/// Each extension crate exports `sqlite3_<name>_init` and forwards to
/// `init_extension` with its function table. SQLite derives that symbol
/// name from the shared library's file name.
///

use std::os::raw::{c_char, c_int};

use rusqlite::{Connection, ffi, to_sqlite_error};
use tracing::{debug, warn};

use crate::registry::{ScalarFunction, register_for_host};

/// Bind the host connection and register `functions` on it.
///
/// Returns `SQLITE_OK` when every function registered. Otherwise returns
/// the status of the first failure and stores its message in
/// `pz_err_msg`; functions after the failing one are not registered.
///
/// # Safety
///
/// `db`, `pz_err_msg` and `p_api` must be the pointers SQLite passed to
/// the extension entry point.
pub unsafe fn init_extension(
    db: *mut ffi::sqlite3,
    pz_err_msg: *mut *mut c_char,
    p_api: *mut ffi::sqlite3_api_routines,
    functions: &[ScalarFunction],
) -> c_int {
    if p_api.is_null() {
        return ffi::SQLITE_ERROR;
    }

    let outcome = unsafe { Connection::extension_init2(db, p_api) }
        .and_then(|conn| register_for_host(&conn, functions));

    match outcome {
        Ok(()) => {
            debug!(count = functions.len(), "extension initialized");
            ffi::SQLITE_OK
        }
        Err(err) => {
            warn!(error = %err, "extension initialization failed");
            unsafe { to_sqlite_error(&err, pz_err_msg) }
        }
    }
}
