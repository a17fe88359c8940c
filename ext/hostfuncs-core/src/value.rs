///
/// Per-call result values.
///
/// A `HostValue` lives for one function invocation. Text is handed to
/// SQLite as a borrowed slice, which rusqlite passes with SQLITE_TRANSIENT,
/// so SQLite copies it before the buffer is dropped.
///

use rusqlite::ToSql;
use rusqlite::types::{ToSqlOutput, ValueRef};

use crate::error::HostFuncError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostValue {
    Null,
    Integer(i64),
    Text(Vec<u8>),
}

impl HostValue {
    /// Copy `bytes` into a precisely-sized result buffer.
    ///
    /// Allocation failure is reported as `OutOfMemory` for `function`
    /// instead of aborting the host process.
    pub fn text(function: &'static str, bytes: &[u8]) -> Result<Self, HostFuncError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(bytes.len())
            .map_err(|_| HostFuncError::OutOfMemory { function })?;
        buf.extend_from_slice(bytes);
        Ok(HostValue::Text(buf))
    }

    /// `Null` when the OS query produced nothing, text otherwise.
    pub fn text_or_null(
        function: &'static str,
        bytes: Option<&[u8]>,
    ) -> Result<Self, HostFuncError> {
        match bytes {
            Some(bytes) => Self::text(function, bytes),
            None => Ok(HostValue::Null),
        }
    }
}

impl ToSql for HostValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            HostValue::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            HostValue::Integer(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            HostValue::Text(bytes) => ToSqlOutput::Borrowed(ValueRef::Text(bytes)),
        })
    }
}
