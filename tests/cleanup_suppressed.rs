#![cfg(feature = "test-utils")]
use std::io;

use sql_forwarding::prelude::*;
use sql_forwarding::test_utils::{RecordingResultSet, RecordingStatement};

fn write_rows(rs: &mut dyn ResultSet) -> Result<(), SqlError> {
    while rs.next()? {}
    Err(io::Error::other("write failed").into())
}

/// Runs the query and writes the rows, closing the result set on every path.
fn export(stmt: &mut dyn PreparedStatement) -> Result<(), SqlError> {
    let mut rs = stmt.execute_query()?;
    if let Err(mut err) = write_rows(rs.as_mut()) {
        close_if_present_appending(Some(&mut *rs), Some(&mut err))?;
        return Err(err);
    }
    rs.close()
}

#[test]
fn close_failure_is_suppressed_behind_the_write_failure() {
    let mut failing = RecordingResultSet::with_rows(["id"], vec![vec![SqlValue::Int(1)]]);
    failing.fail_close("connection reset");
    let rs_log = failing.log();
    let mut stmt = RecordingStatement::new();
    stmt.queue_result_set(failing);

    let err = export(&mut stmt).unwrap_err();

    assert_eq!(err.to_string(), "write failed");
    assert_eq!(err.suppressed().len(), 1);
    assert_eq!(
        err.suppressed()[0].to_string(),
        "Connection error: connection reset"
    );
    assert_eq!(
        format!("{err:#}"),
        "write failed\n  suppressed: Connection error: connection reset"
    );
    assert_eq!(rs_log.calls().last().map(String::as_str), Some("close()"));
}

#[test]
fn handler_collects_failures_from_several_resources() {
    let mut first = RecordingResultSet::empty();
    first.fail_close("socket closed");
    let mut second = RecordingResultSet::empty();
    let mut third = RecordingResultSet::empty();
    third.fail_close("broken pipe");

    let mut seen = Vec::new();
    for rs in [&mut first, &mut second, &mut third] {
        close_if_present_handling(Some(rs), |err| seen.push(err.to_string()));
    }
    close_if_present_handling(None::<&mut RecordingResultSet>, |err| {
        seen.push(err.to_string());
    });

    assert_eq!(
        seen,
        vec![
            "Connection error: socket closed",
            "Connection error: broken pipe"
        ]
    );
}

#[test]
fn statements_can_be_cleaned_up_through_a_decorator() -> Result<(), SqlError> {
    let inner = RecordingStatement::new();
    let log = inner.log();
    let mut stmt: Box<dyn PreparedStatement> =
        Box::new(InstrumentedStatement::new("cleanup", inner));
    let mut primary = SqlError::from(SqlErrorKind::Other("aborted".into()));

    close_if_present_appending(Some(stmt.as_mut()), Some(&mut primary))?;

    assert!(primary.suppressed().is_empty());
    assert_eq!(log.calls(), vec!["close()"]);
    Ok(())
}
