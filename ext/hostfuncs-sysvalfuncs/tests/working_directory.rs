//!
//! # Integration tests for getcwd()
//!
//! These change the process working directory, so they live in their own
//! test binary and run as a single test.
//!

use rusqlite::Connection;
use tempfile::TempDir;

fn getcwd(conn: &Connection) -> Option<String> {
    conn.query_row("SELECT getcwd()", [], |r| r.get(0))
        .expect("getcwd() query")
}

#[test]
fn test_getcwd_follows_the_process_working_directory() {
    let conn = Connection::open_in_memory().expect("open in-memory database");
    sysvalfuncs::register(&conn).expect("register sysvalfuncs");

    let original = std::env::current_dir().expect("current dir");
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let x = temp_dir.path().canonicalize().unwrap().join("x");
    std::fs::create_dir(&x).unwrap();

    std::env::set_current_dir(&x).unwrap();
    assert_eq!(getcwd(&conn).as_deref(), x.to_str());

    // A fresh statement sees the new directory after another chdir.
    let nested = x.join("nested");
    std::fs::create_dir(&nested).unwrap();
    std::env::set_current_dir(&nested).unwrap();
    assert_eq!(getcwd(&conn).as_deref(), nested.to_str());

    if cfg!(target_os = "linux") {
        // getcwd(3) reports ENOENT once the directory is unlinked.
        std::fs::remove_dir(&nested).unwrap();
        assert!(getcwd(&conn).is_none());
    }

    std::env::set_current_dir(&original).unwrap();
    assert_eq!(getcwd(&conn).as_deref(), original.to_str());
}
