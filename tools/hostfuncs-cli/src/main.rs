///
/// hostfuncs CLI - Run SQL with the hostfuncs functions registered
///
/// Opens a database (in-memory unless configured), registers envfuncs and
/// sysvalfuncs, runs each SQL argument and prints the rows. With no SQL
/// arguments, each non-empty line of stdin is run as a statement.
///
/// Logging goes to stderr, filtered by `HOSTFUNCS_LOG` (default `warn`).
///

mod config;
mod errors;
mod output;

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rusqlite::Connection;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{Config, Extensions};
use errors::CliError;
use output::{RowFormat, run_statement};

#[derive(Parser)]
#[command(name = "hostfuncs")]
#[command(author, version, about = "Run SQL with getenv(), getuid() and friends", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database file (default: in-memory)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Do not register getenv()
    #[arg(long)]
    no_envfuncs: bool,

    /// Do not register the process identity functions
    #[arg(long)]
    no_sysvalfuncs: bool,

    /// Column separator
    #[arg(long)]
    separator: Option<String>,

    /// Text printed for NULL values
    #[arg(long)]
    null_value: Option<String>,

    /// Log registration and statements at debug level
    #[arg(short, long)]
    verbose: bool,

    /// SQL statements to run, in order
    sql: Vec<String>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(database) = &self.database {
            config.database = Some(database.clone());
        }
        if let Some(separator) = &self.separator {
            config.separator = separator.clone();
        }
        if let Some(null_value) = &self.null_value {
            config.null_value = null_value.clone();
        }
        if self.no_envfuncs {
            config.extensions.envfuncs = false;
        }
        if self.no_sysvalfuncs {
            config.extensions.sysvalfuncs = false;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("HOSTFUNCS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    cli.apply(&mut config);

    let conn = open_database(&config)?;
    register_extensions(&conn, config.extensions)?;

    let statements = if cli.sql.is_empty() {
        read_statements(std::io::stdin().lock())?
    } else {
        cli.sql.clone()
    };

    let format = RowFormat {
        separator: &config.separator,
        null_value: &config.null_value,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for sql in &statements {
        let rows = run_statement(&conn, sql, &format, &mut out)?;
        debug!(sql = %sql, rows, "statement finished");
    }
    out.flush()?;
    Ok(())
}

fn open_database(config: &Config) -> Result<Connection, CliError> {
    let database = config.database_name();
    let conn = match &config.database {
        Some(path) => Connection::open(path),
        None => Connection::open_in_memory(),
    }
    .map_err(|source| CliError::Open {
        database: database.clone(),
        source,
    })?;
    info!(database = %database, "opened database");
    Ok(conn)
}

fn register_extensions(conn: &Connection, extensions: Extensions) -> Result<(), CliError> {
    if extensions.envfuncs {
        envfuncs::register(conn)?;
    }
    if extensions.sysvalfuncs {
        sysvalfuncs::register(conn)?;
    }
    Ok(())
}

fn read_statements<R: BufRead>(input: R) -> Result<Vec<String>, CliError> {
    let mut statements = Vec::new();
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            statements.push(trimmed.to_string());
        }
    }
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "hostfuncs",
            "--separator",
            ",",
            "--no-sysvalfuncs",
            "SELECT 1",
        ]);
        let mut config = Config {
            separator: ";".to_string(),
            null_value: "-".to_string(),
            ..Config::default()
        };
        cli.apply(&mut config);
        assert_eq!(config.separator, ",");
        assert_eq!(config.null_value, "-");
        assert!(config.extensions.envfuncs);
        assert!(!config.extensions.sysvalfuncs);
        assert_eq!(cli.sql, ["SELECT 1"]);
    }

    #[test]
    fn test_read_statements_skips_blank_lines() {
        let input = b"SELECT 1\n\n   \n  SELECT getuid()  \n" as &[u8];
        assert_eq!(
            read_statements(input).unwrap(),
            ["SELECT 1", "SELECT getuid()"]
        );
    }

    #[test]
    fn test_register_extensions_respects_selection() {
        let conn = Connection::open_in_memory().unwrap();
        register_extensions(
            &conn,
            Extensions {
                envfuncs: false,
                sysvalfuncs: true,
            },
        )
        .unwrap();
        assert!(conn.prepare("SELECT getuid()").is_ok());
        assert!(conn.prepare("SELECT getenv('HOME')").is_err());
    }
}
