///
/// CLI error types.
///
/// Everything that makes `hostfuncs` exit non-zero: configuration,
/// opening the database, registering functions and running SQL.
///

use std::path::PathBuf;

use hostfuncs_core::HostFuncError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to open database {database}: {source}")]
    Open {
        database: String,
        source: rusqlite::Error,
    },

    #[error("{0}")]
    Register(#[from] HostFuncError),

    #[error("SQL error in `{sql}`: {source}")]
    Sql {
        sql: String,
        source: rusqlite::Error,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
