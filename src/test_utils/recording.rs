use std::collections::{HashMap, VecDeque};
use std::io::Read;
use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value as JsonValue;

use crate::error::{SqlError, SqlErrorKind};
use crate::metadata::{ParameterMetaData, ResultSetMetaData};
use crate::results::MaterializedResultSet;
use crate::statement::{Closeable, PreparedStatement, ResultSet, Statement};
use crate::types::{SqlType, SqlValue};

use super::CallLog;

/// A [`PreparedStatement`] that logs every call with its arguments and returns
/// scripted results.
///
/// Like many drivers, its `set_object` binds text by calling its own
/// `set_string`, so decorators can be checked for non-virtual forwarding.
#[derive(Debug, Default)]
pub struct RecordingStatement {
    log: CallLog,
    failures: HashMap<&'static str, String>,
    update_count: u64,
    result_sets: VecDeque<RecordingResultSet>,
    current: Option<RecordingResultSet>,
    last_update_count: Option<u64>,
    metadata: Option<ResultSetMetaData>,
    parameters: ParameterMetaData,
    max_rows: u64,
    query_timeout: Option<Duration>,
    queued_batches: usize,
    closed: bool,
}

impl RecordingStatement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to this statement's call log that outlives moving the statement.
    #[must_use]
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Make every call to `operation` fail with an execution error after being logged.
    pub fn fail_on(&mut self, operation: &'static str, message: impl Into<String>) {
        self.failures.insert(operation, message.into());
    }

    /// Count returned by `execute_update` and by each batch entry.
    pub fn set_update_count(&mut self, count: u64) {
        self.update_count = count;
    }

    /// Queue a result set for the next `execute_query` or `execute`.
    pub fn queue_result_set(&mut self, result_set: RecordingResultSet) {
        self.result_sets.push_back(result_set);
    }

    pub fn set_metadata(&mut self, metadata: ResultSetMetaData) {
        self.metadata = Some(metadata);
    }

    pub fn set_parameter_metadata(&mut self, parameters: ParameterMetaData) {
        self.parameters = parameters;
    }

    fn record(&self, operation: &'static str, args: String) -> Result<(), SqlError> {
        self.log.push(format!("{operation}({args})"));
        match self.failures.get(operation) {
            Some(message) => Err(SqlErrorKind::ExecutionError(message.clone()).into()),
            None => Ok(()),
        }
    }

    fn record_stream(
        &self,
        operation: &'static str,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        let contents = drain(reader, length)?;
        self.record(operation, format!("{index}, {contents:?}, {length:?}"))
    }
}

fn drain(mut reader: Box<dyn Read>, length: Option<u64>) -> Result<String, SqlError> {
    let mut buf = Vec::new();
    match length {
        Some(limit) => reader.take(limit).read_to_end(&mut buf)?,
        None => reader.read_to_end(&mut buf)?,
    };
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

impl Closeable for RecordingStatement {
    fn close(&mut self) -> Result<(), SqlError> {
        self.record("close", String::new())?;
        self.closed = true;
        Ok(())
    }
}

impl Statement for RecordingStatement {
    fn is_closed(&mut self) -> Result<bool, SqlError> {
        self.record("is_closed", String::new())?;
        Ok(self.closed)
    }

    fn cancel(&mut self) -> Result<(), SqlError> {
        self.record("cancel", String::new())
    }

    fn max_rows(&mut self) -> Result<u64, SqlError> {
        self.record("max_rows", String::new())?;
        Ok(self.max_rows)
    }

    fn set_max_rows(&mut self, max_rows: u64) -> Result<(), SqlError> {
        self.record("set_max_rows", format!("{max_rows}"))?;
        self.max_rows = max_rows;
        Ok(())
    }

    fn query_timeout(&mut self) -> Result<Option<Duration>, SqlError> {
        self.record("query_timeout", String::new())?;
        Ok(self.query_timeout)
    }

    fn set_query_timeout(&mut self, timeout: Option<Duration>) -> Result<(), SqlError> {
        self.record("set_query_timeout", format!("{timeout:?}"))?;
        self.query_timeout = timeout;
        Ok(())
    }

    fn result_set(&mut self) -> Result<Option<Box<dyn ResultSet>>, SqlError> {
        self.record("result_set", String::new())?;
        Ok(self
            .current
            .take()
            .map(|rs| Box::new(rs) as Box<dyn ResultSet>))
    }

    fn update_count(&mut self) -> Result<Option<u64>, SqlError> {
        self.record("update_count", String::new())?;
        Ok(self.last_update_count)
    }

    fn execute_batch(&mut self) -> Result<Vec<u64>, SqlError> {
        self.record("execute_batch", String::new())?;
        let counts = vec![self.update_count; self.queued_batches];
        self.queued_batches = 0;
        Ok(counts)
    }

    fn clear_batch(&mut self) -> Result<(), SqlError> {
        self.record("clear_batch", String::new())?;
        self.queued_batches = 0;
        Ok(())
    }
}

impl PreparedStatement for RecordingStatement {
    fn set_null(&mut self, index: usize, sql_type: SqlType) -> Result<(), SqlError> {
        self.record("set_null", format!("{index}, {sql_type:?}"))
    }

    fn set_null_named(
        &mut self,
        index: usize,
        sql_type: SqlType,
        type_name: &str,
    ) -> Result<(), SqlError> {
        self.record(
            "set_null_named",
            format!("{index}, {sql_type:?}, {type_name:?}"),
        )
    }

    fn set_bool(&mut self, index: usize, value: bool) -> Result<(), SqlError> {
        self.record("set_bool", format!("{index}, {value}"))
    }

    fn set_i8(&mut self, index: usize, value: i8) -> Result<(), SqlError> {
        self.record("set_i8", format!("{index}, {value}"))
    }

    fn set_i16(&mut self, index: usize, value: i16) -> Result<(), SqlError> {
        self.record("set_i16", format!("{index}, {value}"))
    }

    fn set_i32(&mut self, index: usize, value: i32) -> Result<(), SqlError> {
        self.record("set_i32", format!("{index}, {value}"))
    }

    fn set_i64(&mut self, index: usize, value: i64) -> Result<(), SqlError> {
        self.record("set_i64", format!("{index}, {value}"))
    }

    fn set_f32(&mut self, index: usize, value: f32) -> Result<(), SqlError> {
        self.record("set_f32", format!("{index}, {value:?}"))
    }

    fn set_f64(&mut self, index: usize, value: f64) -> Result<(), SqlError> {
        self.record("set_f64", format!("{index}, {value:?}"))
    }

    fn set_string(&mut self, index: usize, value: &str) -> Result<(), SqlError> {
        self.record("set_string", format!("{index}, {value:?}"))
    }

    fn set_nstring(&mut self, index: usize, value: &str) -> Result<(), SqlError> {
        self.record("set_nstring", format!("{index}, {value:?}"))
    }

    fn set_bytes(&mut self, index: usize, value: &[u8]) -> Result<(), SqlError> {
        self.record("set_bytes", format!("{index}, {value:?}"))
    }

    fn set_json(&mut self, index: usize, value: &JsonValue) -> Result<(), SqlError> {
        self.record("set_json", format!("{index}, {value}"))
    }

    fn set_array(&mut self, index: usize, values: &[SqlValue]) -> Result<(), SqlError> {
        self.record("set_array", format!("{index}, {values:?}"))
    }

    fn set_date(
        &mut self,
        index: usize,
        value: NaiveDate,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError> {
        self.record("set_date", format!("{index}, {value}, {offset:?}"))
    }

    fn set_time(
        &mut self,
        index: usize,
        value: NaiveTime,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError> {
        self.record("set_time", format!("{index}, {value}, {offset:?}"))
    }

    fn set_timestamp(
        &mut self,
        index: usize,
        value: NaiveDateTime,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError> {
        self.record("set_timestamp", format!("{index}, {value}, {offset:?}"))
    }

    fn set_ascii_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.record_stream("set_ascii_stream", index, reader, length)
    }

    fn set_binary_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.record_stream("set_binary_stream", index, reader, length)
    }

    fn set_character_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.record_stream("set_character_stream", index, reader, length)
    }

    fn set_ncharacter_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.record_stream("set_ncharacter_stream", index, reader, length)
    }

    fn set_blob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.record_stream("set_blob", index, reader, length)
    }

    fn set_clob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.record_stream("set_clob", index, reader, length)
    }

    fn set_nclob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.record_stream("set_nclob", index, reader, length)
    }

    fn set_object(
        &mut self,
        index: usize,
        value: SqlValue,
        target_type: Option<SqlType>,
        scale_or_length: Option<u32>,
    ) -> Result<(), SqlError> {
        self.record(
            "set_object",
            format!("{index}, {value:?}, {target_type:?}, {scale_or_length:?}"),
        )?;
        match (&value, target_type) {
            (SqlValue::Text(text), None) => self.set_string(index, text),
            (SqlValue::Text(text), Some(ty)) if ty.is_textual() => self.set_string(index, text),
            _ => Ok(()),
        }
    }

    fn clear_parameters(&mut self) -> Result<(), SqlError> {
        self.record("clear_parameters", String::new())
    }

    fn execute_query(&mut self) -> Result<Box<dyn ResultSet>, SqlError> {
        self.record("execute_query", String::new())?;
        let rs = self
            .result_sets
            .pop_front()
            .unwrap_or_else(RecordingResultSet::empty);
        Ok(Box::new(rs))
    }

    fn execute_update(&mut self) -> Result<u64, SqlError> {
        self.record("execute_update", String::new())?;
        Ok(self.update_count)
    }

    fn execute(&mut self) -> Result<bool, SqlError> {
        self.record("execute", String::new())?;
        match self.result_sets.pop_front() {
            Some(rs) => {
                self.current = Some(rs);
                self.last_update_count = None;
                Ok(true)
            }
            None => {
                self.current = None;
                self.last_update_count = Some(self.update_count);
                Ok(false)
            }
        }
    }

    fn add_batch(&mut self) -> Result<(), SqlError> {
        self.record("add_batch", String::new())?;
        self.queued_batches += 1;
        Ok(())
    }

    fn metadata(&mut self) -> Result<Option<ResultSetMetaData>, SqlError> {
        self.record("metadata", String::new())?;
        Ok(self.metadata.clone())
    }

    fn parameter_metadata(&mut self) -> Result<ParameterMetaData, SqlError> {
        self.record("parameter_metadata", String::new())?;
        Ok(self.parameters.clone())
    }
}

/// A [`ResultSet`] over in-memory rows that logs calls and can be told to fail on close.
#[derive(Debug)]
pub struct RecordingResultSet {
    log: CallLog,
    inner: MaterializedResultSet,
    close_failure: Option<String>,
}

impl RecordingResultSet {
    #[must_use]
    pub fn empty() -> Self {
        Self::from_inner(MaterializedResultSet::new(ResultSetMetaData::default()))
    }

    pub fn with_rows<I, S>(labels: I, rows: Vec<Vec<SqlValue>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inner =
            MaterializedResultSet::with_capacity(ResultSetMetaData::from_labels(labels), rows.len());
        for row in rows {
            inner.push_row(row);
        }
        Self::from_inner(inner)
    }

    fn from_inner(inner: MaterializedResultSet) -> Self {
        Self {
            log: CallLog::new(),
            inner,
            close_failure: None,
        }
    }

    #[must_use]
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Make every `close` fail with a connection error.
    pub fn fail_close(&mut self, message: impl Into<String>) {
        self.close_failure = Some(message.into());
    }
}

impl Closeable for RecordingResultSet {
    fn close(&mut self) -> Result<(), SqlError> {
        self.log.push("close()".to_string());
        if let Some(message) = &self.close_failure {
            return Err(SqlErrorKind::ConnectionError(message.clone()).into());
        }
        self.inner.close()
    }
}

impl ResultSet for RecordingResultSet {
    fn next(&mut self) -> Result<bool, SqlError> {
        self.log.push("next()".to_string());
        self.inner.next()
    }

    fn get(&mut self, column: usize) -> Result<SqlValue, SqlError> {
        self.log.push(format!("get({column})"));
        self.inner.get(column)
    }

    fn find_column(&mut self, label: &str) -> Result<usize, SqlError> {
        self.log.push(format!("find_column({label:?})"));
        self.inner.find_column(label)
    }

    fn metadata(&mut self) -> Result<ResultSetMetaData, SqlError> {
        self.log.push("metadata()".to_string());
        self.inner.metadata()
    }

    fn is_closed(&mut self) -> Result<bool, SqlError> {
        self.log.push("is_closed()".to_string());
        self.inner.is_closed()
    }
}
