//! The statement capability set.
//!
//! Parameter and column indices are 1-based throughout. Overloads that differ
//! only by an optional length hint, calendar offset or SQL type tag are folded
//! into `Option` arguments.

use std::io::Read;
use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value as JsonValue;

use crate::error::SqlError;
use crate::metadata::{ParameterMetaData, ResultSetMetaData};
use crate::types::{SqlType, SqlValue};

/// A database resource that holds engine-side state until closed.
pub trait Closeable {
    /// Release the resource. Closing an already closed resource is a no-op.
    ///
    /// # Errors
    /// Returns [`SqlError`] if the engine fails to release the resource.
    fn close(&mut self) -> Result<(), SqlError>;
}

/// A forward-only cursor over query results.
pub trait ResultSet: Closeable {
    /// Advance to the next row, returning `false` once the rows are exhausted.
    fn next(&mut self) -> Result<bool, SqlError>;

    /// Read the 1-based column of the current row.
    fn get(&mut self, column: usize) -> Result<SqlValue, SqlError>;

    /// Resolve a column label to its 1-based index.
    fn find_column(&mut self, label: &str) -> Result<usize, SqlError>;

    fn metadata(&mut self) -> Result<ResultSetMetaData, SqlError>;

    fn is_closed(&mut self) -> Result<bool, SqlError>;
}

/// Operations shared by every statement.
pub trait Statement: Closeable {
    fn is_closed(&mut self) -> Result<bool, SqlError>;

    /// Ask the engine to abandon the running statement.
    fn cancel(&mut self) -> Result<(), SqlError>;

    /// Row limit applied to result sets; 0 means unlimited.
    fn max_rows(&mut self) -> Result<u64, SqlError>;

    fn set_max_rows(&mut self, max_rows: u64) -> Result<(), SqlError>;

    fn query_timeout(&mut self) -> Result<Option<Duration>, SqlError>;

    fn set_query_timeout(&mut self, timeout: Option<Duration>) -> Result<(), SqlError>;

    /// The result of the last [`PreparedStatement::execute`], if it produced rows.
    fn result_set(&mut self) -> Result<Option<Box<dyn ResultSet>>, SqlError>;

    /// The update count of the last [`PreparedStatement::execute`], if it produced one.
    fn update_count(&mut self) -> Result<Option<u64>, SqlError>;

    /// Run every queued batch entry in order, returning one count per entry.
    fn execute_batch(&mut self) -> Result<Vec<u64>, SqlError>;

    fn clear_batch(&mut self) -> Result<(), SqlError>;
}

/// A precompiled statement with positional parameters.
pub trait PreparedStatement: Statement {
    fn set_null(&mut self, index: usize, sql_type: SqlType) -> Result<(), SqlError>;

    /// Bind NULL for a user-defined or reference type named `type_name`.
    fn set_null_named(
        &mut self,
        index: usize,
        sql_type: SqlType,
        type_name: &str,
    ) -> Result<(), SqlError>;

    fn set_bool(&mut self, index: usize, value: bool) -> Result<(), SqlError>;

    fn set_i8(&mut self, index: usize, value: i8) -> Result<(), SqlError>;

    fn set_i16(&mut self, index: usize, value: i16) -> Result<(), SqlError>;

    fn set_i32(&mut self, index: usize, value: i32) -> Result<(), SqlError>;

    fn set_i64(&mut self, index: usize, value: i64) -> Result<(), SqlError>;

    fn set_f32(&mut self, index: usize, value: f32) -> Result<(), SqlError>;

    fn set_f64(&mut self, index: usize, value: f64) -> Result<(), SqlError>;

    fn set_string(&mut self, index: usize, value: &str) -> Result<(), SqlError>;

    /// Bind a national character set string.
    fn set_nstring(&mut self, index: usize, value: &str) -> Result<(), SqlError>;

    fn set_bytes(&mut self, index: usize, value: &[u8]) -> Result<(), SqlError>;

    fn set_json(&mut self, index: usize, value: &JsonValue) -> Result<(), SqlError>;

    fn set_array(&mut self, index: usize, values: &[SqlValue]) -> Result<(), SqlError>;

    /// Bind a date, interpreted in `offset` when given.
    fn set_date(
        &mut self,
        index: usize,
        value: NaiveDate,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError>;

    fn set_time(
        &mut self,
        index: usize,
        value: NaiveTime,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError>;

    fn set_timestamp(
        &mut self,
        index: usize,
        value: NaiveDateTime,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError>;

    /// Bind ASCII text read from `reader`, at most `length` bytes when given.
    fn set_ascii_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError>;

    fn set_binary_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError>;

    /// Bind UTF-8 text read from `reader`.
    fn set_character_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError>;

    fn set_ncharacter_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError>;

    fn set_blob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError>;

    fn set_clob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError>;

    fn set_nclob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError>;

    /// Bind an arbitrary value, optionally converted to `target_type` first.
    ///
    /// `scale_or_length` is the number of fractional digits for decimal targets and
    /// the length for stream or text targets; it is ignored otherwise.
    fn set_object(
        &mut self,
        index: usize,
        value: SqlValue,
        target_type: Option<SqlType>,
        scale_or_length: Option<u32>,
    ) -> Result<(), SqlError>;

    fn clear_parameters(&mut self) -> Result<(), SqlError>;

    fn execute_query(&mut self) -> Result<Box<dyn ResultSet>, SqlError>;

    /// Run a DML statement, returning the affected row count.
    fn execute_update(&mut self) -> Result<u64, SqlError>;

    /// Run any statement, returning `true` when it produced a result set.
    fn execute(&mut self) -> Result<bool, SqlError>;

    /// Queue the currently bound parameters as one batch entry.
    fn add_batch(&mut self) -> Result<(), SqlError>;

    /// Shape of the rows this statement returns, `None` if it returns none.
    fn metadata(&mut self) -> Result<Option<ResultSetMetaData>, SqlError>;

    fn parameter_metadata(&mut self) -> Result<ParameterMetaData, SqlError>;
}
