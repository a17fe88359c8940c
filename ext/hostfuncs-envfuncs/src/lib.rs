//!
//! envfuncs - Environment Variable Functions
//!
//! ## Functions
//!
//! - `getenv(name)` - Value of the environment variable `name`, or NULL
//!
//! `getenv(NULL)` produces no result. Any other argument is read as text
//! and looked up byte for byte; case sensitivity is whatever the OS does.
//! Keys the OS can never bind (empty, or containing `=` or NUL) are NULL.
//!

use hostfuncs_core::rusqlite::Connection;
use hostfuncs_core::rusqlite::functions::Context;
use hostfuncs_core::{
    HostFuncError, HostValue, ScalarFunction, os_str_from_bytes, register_all, value_as_text,
};
use tracing::trace;

pub const FUNCTIONS: &[ScalarFunction] = &[ScalarFunction::new("getenv", 1, getenv)];

pub fn register(conn: &Connection) -> Result<(), HostFuncError> {
    register_all(conn, FUNCTIONS)
}

fn getenv(ctx: &Context<'_>) -> Result<HostValue, HostFuncError> {
    let Some(key) = value_as_text(ctx.get_raw(0)) else {
        return Ok(HostValue::Null);
    };
    if !is_bindable_key(&key) {
        trace!("getenv: unbindable key");
        return Ok(HostValue::Null);
    }

    let value = std::env::var_os(os_str_from_bytes(&key));
    HostValue::text_or_null("getenv", value.as_ref().map(|v| os_bytes(v)))
}

fn is_bindable_key(key: &[u8]) -> bool {
    !key.is_empty() && !key.contains(&b'=') && !key.contains(&0)
}

#[cfg(unix)]
fn os_bytes(s: &std::ffi::OsStr) -> &[u8] {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes()
}

#[cfg(not(unix))]
fn os_bytes(s: &std::ffi::OsStr) -> &[u8] {
    s.to_str().map(str::as_bytes).unwrap_or_default()
}

#[cfg(feature = "loadable_extension")]
mod extension {
    use std::os::raw::{c_char, c_int};

    use hostfuncs_core::{ffi, init_extension};

    /// Entry point SQLite calls after loading `libenvfuncs`.
    ///
    /// # Safety
    ///
    /// Must only be called by SQLite's extension loader.
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn sqlite3_envfuncs_init(
        db: *mut ffi::sqlite3,
        pz_err_msg: *mut *mut c_char,
        p_api: *mut ffi::sqlite3_api_routines,
    ) -> c_int {
        unsafe { init_extension(db, pz_err_msg, p_api, super::FUNCTIONS) }
    }
}
