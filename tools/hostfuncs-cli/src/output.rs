///
/// Row formatting for query results.
///

use std::io::Write;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, Statement};

use crate::errors::CliError;

pub struct RowFormat<'a> {
    pub separator: &'a str,
    pub null_value: &'a str,
}

impl RowFormat<'_> {
    pub fn value(&self, value: ValueRef<'_>) -> String {
        match value {
            ValueRef::Null => self.null_value.to_string(),
            ValueRef::Integer(i) => i.to_string(),
            ValueRef::Real(f) => f.to_string(),
            ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            ValueRef::Blob(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
                format!("x'{hex}'")
            }
        }
    }
}

/// Run one statement and write each result row as a line.
pub fn run_statement<W: Write>(
    conn: &Connection,
    sql: &str,
    format: &RowFormat<'_>,
    out: &mut W,
) -> Result<usize, CliError> {
    let sql_error = |source: rusqlite::Error| CliError::Sql {
        sql: sql.to_string(),
        source,
    };
    let mut stmt = conn.prepare(sql).map_err(sql_error)?;
    write_rows(&mut stmt, format, out).map_err(|err| match err {
        RowError::Sql(source) => sql_error(source),
        RowError::Io(err) => CliError::Io(err),
    })
}

enum RowError {
    Sql(rusqlite::Error),
    Io(std::io::Error),
}

fn write_rows<W: Write>(
    stmt: &mut Statement<'_>,
    format: &RowFormat<'_>,
    out: &mut W,
) -> Result<usize, RowError> {
    let columns = stmt.column_count();
    let mut rows = stmt.query([]).map_err(RowError::Sql)?;
    let mut count = 0;
    while let Some(row) = rows.next().map_err(RowError::Sql)? {
        let mut fields = Vec::with_capacity(columns);
        for i in 0..columns {
            fields.push(format.value(row.get_ref(i).map_err(RowError::Sql)?));
        }
        writeln!(out, "{}", fields.join(format.separator)).map_err(RowError::Io)?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAT: RowFormat<'static> = RowFormat {
        separator: "|",
        null_value: "NULL",
    };

    fn run(conn: &Connection, sql: &str) -> String {
        let mut out = Vec::new();
        run_statement(conn, sql, &FORMAT, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(FORMAT.value(ValueRef::Null), "NULL");
        assert_eq!(FORMAT.value(ValueRef::Integer(-7)), "-7");
        assert_eq!(FORMAT.value(ValueRef::Real(2.5)), "2.5");
        assert_eq!(FORMAT.value(ValueRef::Text(b"bar")), "bar");
        assert_eq!(FORMAT.value(ValueRef::Blob(&[0xde, 0xad])), "x'dead'");
    }

    #[test]
    fn test_rows_and_columns() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run(&conn, "SELECT 1, NULL, 'a' UNION ALL SELECT 2, 3, 'b'"), "1|NULL|a\n2|3|b\n");
    }

    #[test]
    fn test_statement_without_rows() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run(&conn, "CREATE TABLE t (x)"), "");
        assert_eq!(run(&conn, "SELECT count(*) FROM t"), "0\n");
    }

    #[test]
    fn test_sql_error_names_statement() {
        let conn = Connection::open_in_memory().unwrap();
        let mut out = Vec::new();
        let err = run_statement(&conn, "SELECT nope()", &FORMAT, &mut out).unwrap_err();
        assert!(err.to_string().contains("SELECT nope()"));
        assert!(err.to_string().contains("no such function"));
    }
}
