//!
//! sysvalfuncs - Process Identity Functions
//!
//! ## Functions
//!
//! - `getuid()` - Real user ID
//! - `geteuid()` - Effective user ID
//! - `getgid()` - Real group ID
//! - `getegid()` - Effective group ID
//! - `getlogin()` - Login name of the controlling terminal, NULL on failure
//! - `getcwd()` - Current working directory, NULL on failure
//!
//! Ids are returned as 64-bit integers so large unsigned ids stay positive.
//! Text results are exactly the OS-supplied bytes, without NUL padding.
//!

#[cfg(not(unix))]
compile_error!("sysvalfuncs requires a POSIX host");

mod login;

use hostfuncs_core::rusqlite::Connection;
use hostfuncs_core::rusqlite::functions::Context;
use hostfuncs_core::{HostFuncError, HostValue, ScalarFunction, os_string_into_bytes, register_all};

pub use login::login_name;

/// Registration order matches the order the functions are documented in.
pub const FUNCTIONS: &[ScalarFunction] = &[
    ScalarFunction::new("getuid", 0, getuid),
    ScalarFunction::new("geteuid", 0, geteuid),
    ScalarFunction::new("getgid", 0, getgid),
    ScalarFunction::new("getegid", 0, getegid),
    ScalarFunction::new("getlogin", 0, getlogin),
    ScalarFunction::new("getcwd", 0, getcwd),
];

pub fn register(conn: &Connection) -> Result<(), HostFuncError> {
    register_all(conn, FUNCTIONS)
}

fn getuid(_ctx: &Context<'_>) -> Result<HostValue, HostFuncError> {
    Ok(HostValue::Integer(i64::from(unsafe { libc::getuid() })))
}

fn geteuid(_ctx: &Context<'_>) -> Result<HostValue, HostFuncError> {
    Ok(HostValue::Integer(i64::from(unsafe { libc::geteuid() })))
}

fn getgid(_ctx: &Context<'_>) -> Result<HostValue, HostFuncError> {
    Ok(HostValue::Integer(i64::from(unsafe { libc::getgid() })))
}

fn getegid(_ctx: &Context<'_>) -> Result<HostValue, HostFuncError> {
    Ok(HostValue::Integer(i64::from(unsafe { libc::getegid() })))
}

fn getlogin(_ctx: &Context<'_>) -> Result<HostValue, HostFuncError> {
    let name = login_name()?;
    HostValue::text_or_null("getlogin", name.as_deref())
}

fn getcwd(_ctx: &Context<'_>) -> Result<HostValue, HostFuncError> {
    match current_dir() {
        Some(path) => HostValue::text("getcwd", &path),
        None => Ok(HostValue::Null),
    }
}

/// Current working directory as raw bytes, `None` if getcwd(3) fails.
pub fn current_dir() -> Option<Vec<u8>> {
    match std::env::current_dir() {
        Ok(path) => Some(os_string_into_bytes(path.into_os_string())),
        Err(err) => {
            tracing::trace!(error = %err, "getcwd failed");
            None
        }
    }
}

#[cfg(feature = "loadable_extension")]
mod extension {
    use std::os::raw::{c_char, c_int};

    use hostfuncs_core::{ffi, init_extension};

    /// Entry point SQLite calls after loading `libsysvalfuncs`.
    ///
    /// # Safety
    ///
    /// Must only be called by SQLite's extension loader.
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn sqlite3_sysvalfuncs_init(
        db: *mut ffi::sqlite3,
        pz_err_msg: *mut *mut c_char,
        p_api: *mut ffi::sqlite3_api_routines,
    ) -> c_int {
        unsafe { init_extension(db, pz_err_msg, p_api, super::FUNCTIONS) }
    }
}
