//!
//! hostfuncs-core - Shared Registration Layer
//!
//! The pieces every hostfuncs extension is built from:
//!
//! - `ScalarFunction` tables registered in order by `register_all`
//! - `HostValue`, the per-call result buffer handed to SQLite
//! - `HostFuncError` and its mapping onto SQLite result codes
//! - `init_extension`, the body of a loadable-extension entry point
//!   (only with the `loadable_extension` feature)
//!
//! Without `loadable_extension` the same tables can be registered on any
//! `rusqlite::Connection`, which is how the CLI and the tests host them.
//!

pub mod error;
pub mod registry;
pub mod text;
pub mod value;

#[cfg(feature = "loadable_extension")]
pub mod entry;

pub use error::HostFuncError;
pub use registry::{
    ScalarFn, ScalarFunction, check_argument_count, register_all, register_for_host,
};
pub use text::{os_str_from_bytes, os_string_into_bytes, value_as_text};
pub use value::HostValue;

#[cfg(feature = "loadable_extension")]
pub use entry::init_extension;

pub use rusqlite;
pub use rusqlite::ffi;
