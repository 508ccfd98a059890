#![cfg(feature = "sqlite")]
use std::io::Cursor;
use std::time::Duration;

use chrono::{FixedOffset, NaiveDate};
use rusqlite::Connection;
use serde_json::json;
use sql_forwarding::prelude::*;

struct UppercaseText<S> {
    inner: S,
}

impl<S: PreparedStatement> ForwardingPreparedStatement for UppercaseText<S> {
    fn delegate(&mut self) -> &mut dyn PreparedStatement {
        &mut self.inner
    }

    fn set_string(&mut self, index: usize, value: &str) -> Result<(), SqlError> {
        self.delegate().set_string(index, &value.to_uppercase())
    }
}

fn create_people(conn: &Connection) -> Result<(), SqlError> {
    conn.execute_batch(
        "CREATE TABLE people (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            born TEXT,
            notes TEXT,
            photo BLOB
        );",
    )?;
    Ok(())
}

fn names(conn: &Connection) -> Result<Vec<SqlValue>, SqlError> {
    let mut stmt = SqlitePreparedStatement::prepare(conn, "SELECT name FROM people ORDER BY id")?;
    let mut rs = stmt.execute_query()?;
    let mut out = Vec::new();
    while rs.next()? {
        out.push(rs.get(1)?);
    }
    rs.close()?;
    stmt.close()?;
    Ok(out)
}

#[test]
fn decorator_rewrites_bound_text_in_memory() -> Result<(), SqlError> {
    let conn = SqliteOptions::in_memory().open()?;
    create_people(&conn)?;

    let prepared =
        SqlitePreparedStatement::prepare(&conn, "INSERT INTO people (id, name) VALUES (?1, ?2)")?;
    let mut stmt = UppercaseText { inner: prepared };
    let dyn_stmt: &mut dyn PreparedStatement = &mut stmt;
    dyn_stmt.set_i64(1, 1)?;
    dyn_stmt.set_string(2, "ada")?;
    assert_eq!(dyn_stmt.execute_update()?, 1);

    // set_object goes straight to the delegate, so it is not uppercased
    dyn_stmt.set_i64(1, 2)?;
    dyn_stmt.set_object(2, SqlValue::Text("grace".into()), None, None)?;
    assert_eq!(dyn_stmt.execute_update()?, 1);
    dyn_stmt.close()?;

    assert_eq!(
        names(&conn)?,
        vec![SqlValue::Text("ADA".into()), SqlValue::Text("grace".into())]
    );
    Ok(())
}

#[test]
fn file_backed_batch_with_typed_values() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("people.db");
    let conn = SqliteOptions::builder(path.to_string_lossy().into_owned())
        .busy_timeout(Duration::from_millis(500))
        .statement_cache_capacity(8)
        .open()?;
    create_people(&conn)?;

    let mut stmt = SqlitePreparedStatement::prepare(
        &conn,
        "INSERT INTO people (id, name, born, notes, photo) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    stmt.set_i32(1, 1)?;
    stmt.set_string(2, "ada")?;
    stmt.set_date(3, NaiveDate::from_ymd_opt(1815, 12, 10).ok_or("bad date")?, None)?;
    stmt.set_json(4, &json!({"field": "math"}))?;
    stmt.set_binary_stream(5, Box::new(Cursor::new(vec![1_u8, 2, 3, 4])), Some(2))?;
    stmt.add_batch()?;

    stmt.set_i32(1, 2)?;
    stmt.set_string(2, "alan")?;
    stmt.set_null(3, SqlType::Date)?;
    stmt.set_clob(4, Box::new(Cursor::new("codebreaker")), None)?;
    stmt.set_null(5, SqlType::Blob)?;
    stmt.add_batch()?;

    assert_eq!(stmt.execute_batch()?, vec![1, 1]);
    assert_eq!(stmt.execute_batch()?, Vec::<u64>::new());
    stmt.close()?;

    let mut query = SqlitePreparedStatement::prepare(
        &conn,
        "SELECT born, notes, photo FROM people WHERE id = ?",
    )?;
    query.set_i64(1, 1)?;
    let mut rs = query.execute_query()?;
    assert!(rs.next()?);
    assert_eq!(rs.get(1)?, SqlValue::Text("1815-12-10".into()));
    assert_eq!(rs.get(2)?, SqlValue::Text(r#"{"field":"math"}"#.into()));
    assert_eq!(rs.get(3)?, SqlValue::Blob(vec![1, 2]));
    assert!(!rs.next()?);

    query.set_i64(1, 2)?;
    let mut rs = query.execute_query()?;
    assert!(rs.next()?);
    assert_eq!(rs.get(1)?, SqlValue::Null);
    assert_eq!(rs.get(2)?, SqlValue::Text("codebreaker".into()));
    Ok(())
}

#[test]
fn execute_reports_rows_or_update_count() -> Result<(), SqlError> {
    let conn = Connection::open_in_memory()?;
    create_people(&conn)?;

    let mut insert =
        SqlitePreparedStatement::prepare(&conn, "INSERT INTO people (name) VALUES (?)")?;
    insert.set_string(1, "ada")?;
    assert!(!insert.execute()?);
    assert_eq!(insert.update_count()?, Some(1));
    assert!(insert.result_set()?.is_none());
    assert!(insert.metadata()?.is_none());

    let mut select = SqlitePreparedStatement::prepare(&conn, "SELECT id, name FROM people")?;
    assert!(select.execute()?);
    assert_eq!(select.update_count()?, None);
    let mut rs = select.result_set()?.ok_or_else(|| {
        SqlError::from(SqlErrorKind::Other("missing result set".into()))
    })?;
    assert_eq!(rs.find_column("name")?, 2);
    assert!(rs.next()?);
    assert_eq!(rs.get(2)?, SqlValue::Text("ada".into()));

    let meta = select.metadata()?.ok_or_else(|| {
        SqlError::from(SqlErrorKind::Other("missing metadata".into()))
    })?;
    assert_eq!(meta.column_count(), 2);
    Ok(())
}

#[test]
fn statement_kind_mismatches_are_execution_errors() -> Result<(), SqlError> {
    let conn = Connection::open_in_memory()?;
    create_people(&conn)?;

    let mut select = SqlitePreparedStatement::prepare(&conn, "SELECT name FROM people")?;
    let err = select.execute_update().unwrap_err();
    assert!(matches!(err.kind(), SqlErrorKind::ExecutionError(_)));

    let mut delete = SqlitePreparedStatement::prepare(&conn, "DELETE FROM people")?;
    let err = delete.execute_query().err().ok_or_else(|| {
        SqlError::from(SqlErrorKind::Other("query on DELETE succeeded".into()))
    })?;
    assert!(matches!(err.kind(), SqlErrorKind::ExecutionError(_)));
    Ok(())
}

#[test]
fn unsupported_and_invalid_bindings() -> Result<(), SqlError> {
    let conn = Connection::open_in_memory()?;
    create_people(&conn)?;
    let mut stmt =
        SqlitePreparedStatement::prepare(&conn, "UPDATE people SET notes = ?1 WHERE id = ?2")?;

    let err = stmt.set_array(1, &[SqlValue::Int(1)]).unwrap_err();
    assert!(matches!(err.kind(), SqlErrorKind::Unimplemented(_)));

    let err = stmt.set_string(0, "zero").unwrap_err();
    assert!(matches!(err.kind(), SqlErrorKind::ParameterError(_)));

    stmt.set_string(1, "note")?;
    stmt.clear_parameters()?;
    stmt.set_i64(2, 1)?;
    let err = stmt.execute_update().unwrap_err();
    assert!(matches!(err.kind(), SqlErrorKind::ParameterError(_)));
    Ok(())
}

#[test]
fn timestamps_with_offsets_keep_the_offset() -> Result<(), Box<dyn std::error::Error>> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("CREATE TABLE events (at TEXT);")?;
    let at = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .ok_or("bad timestamp")?;
    let offset = FixedOffset::east_opt(2 * 3600).ok_or("bad offset")?;

    let mut insert = SqlitePreparedStatement::prepare(&conn, "INSERT INTO events VALUES (?)")?;
    insert.set_timestamp(1, at, Some(offset))?;
    insert.execute_update()?;
    insert.set_timestamp(1, at, None)?;
    insert.execute_update()?;

    let stored: Vec<String> = conn
        .prepare("SELECT at FROM events ORDER BY rowid")?
        .query_map([], |row| row.get(0))?
        .collect::<Result<_, _>>()?;
    assert_eq!(stored, vec!["2024-03-01 09:30:00+02:00", "2024-03-01 09:30:00"]);
    Ok(())
}

#[test]
fn settings_round_trip_and_cancel_is_harmless() -> Result<(), SqlError> {
    let conn = Connection::open_in_memory()?;
    let mut stmt = SqlitePreparedStatement::prepare(&conn, "SELECT 1")?;
    assert_eq!(stmt.max_rows()?, 0);
    assert_eq!(stmt.query_timeout()?, None);
    stmt.set_query_timeout(Some(Duration::from_secs(2)))?;
    assert_eq!(stmt.query_timeout()?, Some(Duration::from_secs(2)));
    stmt.cancel()?;

    let mut rs = stmt.execute_query()?;
    assert!(rs.next()?);
    assert_eq!(rs.get(1)?, SqlValue::Int(1));
    Ok(())
}

#[test]
fn ddl_after_dml_reports_no_affected_rows() -> Result<(), SqlError> {
    let conn = Connection::open_in_memory()?;
    create_people(&conn)?;
    let mut insert = SqlitePreparedStatement::prepare(
        &conn,
        "INSERT INTO people (name) VALUES ('a'), ('b'), ('c')",
    )?;
    assert_eq!(insert.execute_update()?, 3);

    let mut create = SqlitePreparedStatement::prepare(&conn, "CREATE TABLE pets (id INTEGER)")?;
    assert_eq!(create.execute_update()?, 0);

    let mut index =
        SqlitePreparedStatement::prepare(&conn, "CREATE INDEX people_name ON people (name)")?;
    assert!(!index.execute()?);
    assert_eq!(index.update_count()?, Some(0));

    let mut delete =
        SqlitePreparedStatement::prepare(&conn, "DELETE FROM people WHERE name <> 'a'")?;
    assert_eq!(delete.execute_update()?, 2);
    Ok(())
}

fn busy_timeout_ms(conn: &Connection) -> Result<i64, SqlError> {
    Ok(conn.pragma_query_value(None, "busy_timeout", |row| row.get(0))?)
}

#[test]
fn query_timeout_does_not_leak_onto_the_connection() -> Result<(), SqlError> {
    let conn = SqliteOptions::builder(":memory:".to_string())
        .busy_timeout(Duration::from_millis(5000))
        .open()?;
    create_people(&conn)?;
    assert_eq!(busy_timeout_ms(&conn)?, 5000);

    let mut select = SqlitePreparedStatement::prepare(&conn, "SELECT 1")?;
    select.set_query_timeout(Some(Duration::from_millis(1)))?;
    let mut rs = select.execute_query()?;
    assert!(rs.next()?);
    select.close()?;
    assert_eq!(busy_timeout_ms(&conn)?, 5000);

    // the failure path restores it too
    let mut insert =
        SqlitePreparedStatement::prepare(&conn, "INSERT INTO people (id, name) VALUES (1, ?)")?;
    insert.set_query_timeout(Some(Duration::from_millis(2)))?;
    insert.set_null(1, SqlType::VarChar)?;
    let err = insert.execute_update().unwrap_err();
    assert!(matches!(err.kind(), SqlErrorKind::Sqlite(_)));
    assert_eq!(busy_timeout_ms(&conn)?, 5000);
    Ok(())
}
