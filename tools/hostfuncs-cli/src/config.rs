///
/// CLI configuration.
///
/// Read from an optional TOML file; command-line flags override it.
///
/// ```toml
/// database = "state.db"
/// separator = "|"
/// null_value = ""
///
/// [extensions]
/// envfuncs = true
/// sysvalfuncs = true
/// ```
///

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::CliError;

pub const MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: Option<PathBuf>,
    pub separator: String,
    pub null_value: String,
    pub extensions: Extensions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Extensions {
    pub envfuncs: bool,
    pub sysvalfuncs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            separator: "|".to_string(),
            null_value: String::new(),
            extensions: Extensions::default(),
        }
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            envfuncs: true,
            sysvalfuncs: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn database_name(&self) -> String {
        match &self.database {
            Some(path) => path.to_string_lossy().into_owned(),
            None => MEMORY_DATABASE.to_string(),
        }
    }
}
