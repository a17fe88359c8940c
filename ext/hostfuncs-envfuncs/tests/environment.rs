//!
//! # Integration tests for envfuncs
//!
//! Every binding in the test process's environment must come back
//! unchanged through SQL, and unbound keys must come back NULL.
//!

#![cfg(unix)]

use std::os::unix::ffi::OsStrExt;

use rusqlite::Connection;
use rusqlite::types::{ToSqlOutput, ValueRef};

// Keys other tests in this file set concurrently.
const MUTATED_KEYS: &[&[u8]] = &[b"FOO", b"ENVFUNCS_IT_BOUND"];

fn conn() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory database");
    envfuncs::register(&conn).expect("register envfuncs");
    conn
}

#[test]
fn test_foo_bar_scenario() {
    unsafe { std::env::set_var("FOO", "bar") };
    let conn = conn();

    let foo: Option<String> = conn
        .query_row("SELECT getenv('FOO')", [], |r| r.get(0))
        .unwrap();
    assert_eq!(foo.as_deref(), Some("bar"));

    let missing: Option<String> = conn
        .query_row("SELECT getenv('MISSING')", [], |r| r.get(0))
        .unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_every_bound_key_round_trips() {
    let conn = conn();
    let mut stmt = conn.prepare("SELECT getenv(?1)").unwrap();

    for (key, value) in std::env::vars_os() {
        let key = key.as_bytes();
        if key.is_empty() || key.contains(&b'=') || MUTATED_KEYS.iter().any(|k| *k == key) {
            continue;
        }
        let got = stmt
            .query_row([ToSqlOutput::Borrowed(ValueRef::Text(key))], |r| {
                Ok(match r.get_ref(0)? {
                    ValueRef::Text(bytes) => Some(bytes.to_vec()),
                    _ => None,
                })
            })
            .unwrap();
        assert_eq!(
            got.as_deref(),
            Some(value.as_bytes()),
            "getenv({}) mismatch",
            String::from_utf8_lossy(key)
        );
    }
}

#[test]
fn test_bound_and_unbound_keys_in_one_query() {
    unsafe { std::env::set_var("ENVFUNCS_IT_BOUND", "1") };
    let conn = conn();
    let (bound, unbound): (Option<String>, Option<String>) = conn
        .query_row(
            "SELECT getenv('ENVFUNCS_IT_BOUND'), getenv('ENVFUNCS_IT_UNBOUND')",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(bound.as_deref(), Some("1"));
    assert!(unbound.is_none());
}
