use std::io::Read;
use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use rusqlite::types::Value;
use rusqlite::{Connection, ToSql};
use serde_json::Value as JsonValue;
use tracing::trace;

use crate::error::SqlError;
use crate::metadata::{ParameterMetaData, ResultSetMetaData};
use crate::results::MaterializedResultSet;
use crate::statement::{Closeable, PreparedStatement, ResultSet, Statement};
use crate::types::{SqlType, SqlValue};

use super::params::{
    coerce, read_ascii, read_bytes, read_text, sql_value_to_sqlite, sqlite_value_to_sql_value,
};

/// A prepared `SQLite` statement that borrows its connection.
///
/// Parameters are staged per slot and converted when bound, so conversion errors
/// surface from the `set_*` call. The compiled statement itself lives in
/// `rusqlite`'s statement cache and is looked up on each execution.
///
/// Result sets are materialized in full (capped by `max_rows`) before being
/// returned.
#[derive(Debug)]
pub struct SqlitePreparedStatement<'conn> {
    conn: &'conn Connection,
    sql: String,
    bindings: Vec<Option<Value>>,
    batch: Vec<Vec<Value>>,
    current: Option<MaterializedResultSet>,
    last_update_count: Option<u64>,
    max_rows: u64,
    query_timeout: Option<Duration>,
    closed: bool,
}

impl<'conn> SqlitePreparedStatement<'conn> {
    /// Compile `sql` on `conn` and return a statement ready for binding.
    ///
    /// # Errors
    /// Returns the `SQLite` error if the statement does not compile.
    pub fn prepare(conn: &'conn Connection, sql: impl Into<String>) -> Result<Self, SqlError> {
        let sql = sql.into();
        // warm the cache so executions don't re-prepare.
        let parameter_count = conn.prepare_cached(&sql)?.parameter_count();
        trace!(%sql, parameter_count, "prepared sqlite statement");
        Ok(Self {
            conn,
            sql,
            bindings: vec![None; parameter_count],
            batch: Vec::new(),
            current: None,
            last_update_count: None,
            max_rows: 0,
            query_timeout: None,
            closed: false,
        })
    }

    /// Access the raw SQL string of the prepared statement.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    fn ensure_open(&self) -> Result<(), SqlError> {
        if self.closed {
            Err(SqlError::closed("prepared statement"))
        } else {
            Ok(())
        }
    }

    fn bind_with(
        &mut self,
        index: usize,
        convert: impl FnOnce() -> Result<Value, SqlError>,
    ) -> Result<(), SqlError> {
        self.ensure_open()?;
        let count = self.bindings.len();
        let slot = index
            .checked_sub(1)
            .filter(|slot| *slot < count)
            .ok_or_else(|| {
                SqlError::parameter(format!(
                    "parameter index out of range: {index} (statement has {count} parameters)"
                ))
            })?;
        self.bindings[slot] = Some(convert()?);
        Ok(())
    }

    fn bind_value(&mut self, index: usize, value: SqlValue) -> Result<(), SqlError> {
        self.bind_with(index, || sql_value_to_sqlite(&value))
    }

    fn collect_params(&self) -> Result<Vec<Value>, SqlError> {
        self.bindings
            .iter()
            .enumerate()
            .map(|(slot, value)| {
                value.clone().ok_or_else(|| {
                    SqlError::parameter(format!("no value specified for parameter {}", slot + 1))
                })
            })
            .collect()
    }

    /// Run `step` with this statement's query timeout as the connection's busy
    /// timeout, restoring the previous busy timeout afterwards.
    fn with_query_timeout<T>(
        &self,
        step: impl FnOnce() -> Result<T, SqlError>,
    ) -> Result<T, SqlError> {
        let Some(timeout) = self.query_timeout else {
            return step();
        };
        let previous_ms: i64 =
            self.conn
                .pragma_query_value(None, "busy_timeout", |row| row.get(0))?;
        self.conn.busy_timeout(timeout)?;
        let outcome = step();
        let previous = Duration::from_millis(u64::try_from(previous_ms).unwrap_or(0));
        match (outcome, self.conn.busy_timeout(previous)) {
            (outcome, Ok(())) => outcome,
            (Ok(_), Err(restore)) => Err(restore.into()),
            (Err(mut err), Err(restore)) => {
                err.add_suppressed(restore.into());
                Err(err)
            }
        }
    }

    fn total_changes(&self) -> Result<i64, SqlError> {
        Ok(self
            .conn
            .query_row("SELECT total_changes()", [], |row| row.get(0))?)
    }

    fn query_rows(&self, params: &[Value]) -> Result<MaterializedResultSet, SqlError> {
        self.with_query_timeout(|| self.materialize(params))
    }

    fn materialize(&self, params: &[Value]) -> Result<MaterializedResultSet, SqlError> {
        let mut stmt = self.conn.prepare_cached(&self.sql)?;
        if stmt.column_count() == 0 {
            return Err(SqlError::execution("statement does not return a result set"));
        }
        let labels: Vec<String> = stmt
            .column_names()
            .iter()
            .map(std::string::ToString::to_string)
            .collect();
        let column_count = labels.len();
        let mut result_set = MaterializedResultSet::new(ResultSetMetaData::from_labels(labels));

        let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        let mut rows = stmt.query(&param_refs[..])?;
        while let Some(row) = rows.next()? {
            if self.max_rows > 0 && result_set.len() as u64 >= self.max_rows {
                break;
            }
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(sqlite_value_to_sql_value(row.get_ref(i)?));
            }
            result_set.push_row(values);
        }
        trace!(sql = %self.sql, rows = result_set.len(), "sqlite query materialized");
        Ok(result_set)
    }

    fn run_update(&self, params: &[Value]) -> Result<u64, SqlError> {
        self.with_query_timeout(|| self.step_update(params))
    }

    // sqlite3_changes() is left untouched by DDL, so only trust it when the
    // connection-wide total moved.
    fn step_update(&self, params: &[Value]) -> Result<u64, SqlError> {
        let mut stmt = self.conn.prepare_cached(&self.sql)?;
        if stmt.column_count() > 0 {
            return Err(SqlError::execution(
                "statement returns a result set; use execute_query",
            ));
        }
        let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        let before = self.total_changes()?;
        let reported = stmt.execute(&param_refs[..])?;
        let changed = if self.total_changes()? == before {
            0
        } else {
            reported as u64
        };
        trace!(sql = %self.sql, changed, "sqlite update executed");
        Ok(changed)
    }

    fn returns_rows(&self) -> Result<bool, SqlError> {
        Ok(self.conn.prepare_cached(&self.sql)?.column_count() > 0)
    }
}

impl Closeable for SqlitePreparedStatement<'_> {
    fn close(&mut self) -> Result<(), SqlError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.bindings.clear();
        self.batch.clear();
        self.current = None;
        trace!(sql = %self.sql, "closed sqlite statement");
        Ok(())
    }
}

impl Statement for SqlitePreparedStatement<'_> {
    fn is_closed(&mut self) -> Result<bool, SqlError> {
        Ok(self.closed)
    }

    fn cancel(&mut self) -> Result<(), SqlError> {
        self.ensure_open()?;
        self.conn.get_interrupt_handle().interrupt();
        Ok(())
    }

    fn max_rows(&mut self) -> Result<u64, SqlError> {
        self.ensure_open()?;
        Ok(self.max_rows)
    }

    fn set_max_rows(&mut self, max_rows: u64) -> Result<(), SqlError> {
        self.ensure_open()?;
        self.max_rows = max_rows;
        Ok(())
    }

    fn query_timeout(&mut self) -> Result<Option<Duration>, SqlError> {
        self.ensure_open()?;
        Ok(self.query_timeout)
    }

    /// `SQLite` has no per-statement timeout; the value is the connection's busy
    /// timeout while this statement executes and the previous one is restored after.
    fn set_query_timeout(&mut self, timeout: Option<Duration>) -> Result<(), SqlError> {
        self.ensure_open()?;
        self.query_timeout = timeout;
        Ok(())
    }

    fn result_set(&mut self) -> Result<Option<Box<dyn ResultSet>>, SqlError> {
        self.ensure_open()?;
        Ok(self
            .current
            .take()
            .map(|rs| Box::new(rs) as Box<dyn ResultSet>))
    }

    fn update_count(&mut self) -> Result<Option<u64>, SqlError> {
        self.ensure_open()?;
        Ok(self.last_update_count)
    }

    /// Entries run in order outside any transaction; the first failure stops the
    /// batch and earlier entries stay applied. The batch is emptied either way.
    fn execute_batch(&mut self) -> Result<Vec<u64>, SqlError> {
        self.ensure_open()?;
        let entries = std::mem::take(&mut self.batch);
        let mut counts = Vec::with_capacity(entries.len());
        for params in &entries {
            counts.push(self.run_update(params)?);
        }
        Ok(counts)
    }

    fn clear_batch(&mut self) -> Result<(), SqlError> {
        self.ensure_open()?;
        self.batch.clear();
        Ok(())
    }
}

impl PreparedStatement for SqlitePreparedStatement<'_> {
    fn set_null(&mut self, index: usize, _sql_type: SqlType) -> Result<(), SqlError> {
        self.bind_with(index, || Ok(Value::Null))
    }

    fn set_null_named(
        &mut self,
        index: usize,
        _sql_type: SqlType,
        _type_name: &str,
    ) -> Result<(), SqlError> {
        self.bind_with(index, || Ok(Value::Null))
    }

    fn set_bool(&mut self, index: usize, value: bool) -> Result<(), SqlError> {
        self.bind_with(index, || Ok(Value::Integer(i64::from(value))))
    }

    fn set_i8(&mut self, index: usize, value: i8) -> Result<(), SqlError> {
        self.bind_with(index, || Ok(Value::Integer(i64::from(value))))
    }

    fn set_i16(&mut self, index: usize, value: i16) -> Result<(), SqlError> {
        self.bind_with(index, || Ok(Value::Integer(i64::from(value))))
    }

    fn set_i32(&mut self, index: usize, value: i32) -> Result<(), SqlError> {
        self.bind_with(index, || Ok(Value::Integer(i64::from(value))))
    }

    fn set_i64(&mut self, index: usize, value: i64) -> Result<(), SqlError> {
        self.bind_with(index, || Ok(Value::Integer(value)))
    }

    fn set_f32(&mut self, index: usize, value: f32) -> Result<(), SqlError> {
        self.bind_with(index, || Ok(Value::Real(f64::from(value))))
    }

    fn set_f64(&mut self, index: usize, value: f64) -> Result<(), SqlError> {
        self.bind_with(index, || Ok(Value::Real(value)))
    }

    fn set_string(&mut self, index: usize, value: &str) -> Result<(), SqlError> {
        self.bind_with(index, || Ok(Value::Text(value.to_owned())))
    }

    fn set_nstring(&mut self, index: usize, value: &str) -> Result<(), SqlError> {
        // SQLite text is always Unicode
        self.bind_with(index, || Ok(Value::Text(value.to_owned())))
    }

    fn set_bytes(&mut self, index: usize, value: &[u8]) -> Result<(), SqlError> {
        self.bind_with(index, || Ok(Value::Blob(value.to_vec())))
    }

    fn set_json(&mut self, index: usize, value: &JsonValue) -> Result<(), SqlError> {
        self.bind_with(index, || Ok(Value::Text(value.to_string())))
    }

    fn set_array(&mut self, index: usize, _values: &[SqlValue]) -> Result<(), SqlError> {
        self.bind_with(index, || {
            Err(SqlError::unimplemented(
                "array parameters are not supported by SQLite",
            ))
        })
    }

    /// Dates carry no time of day, so `offset` does not change the stored value.
    fn set_date(
        &mut self,
        index: usize,
        value: NaiveDate,
        _offset: Option<FixedOffset>,
    ) -> Result<(), SqlError> {
        self.bind_value(index, SqlValue::Date(value))
    }

    fn set_time(
        &mut self,
        index: usize,
        value: NaiveTime,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError> {
        match offset {
            Some(offset) => self.bind_with(index, || {
                Ok(Value::Text(format!("{}{offset}", value.format("%T%.f"))))
            }),
            None => self.bind_value(index, SqlValue::Time(value)),
        }
    }

    fn set_timestamp(
        &mut self,
        index: usize,
        value: NaiveDateTime,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError> {
        match offset {
            Some(offset) => {
                let pinned = offset
                    .from_local_datetime(&value)
                    .single()
                    .ok_or_else(|| SqlError::parameter(format!("invalid local time {value}")))?;
                self.bind_value(index, SqlValue::TimestampTz(pinned))
            }
            None => self.bind_value(index, SqlValue::Timestamp(value)),
        }
    }

    fn set_ascii_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.bind_with(index, move || read_ascii(reader, length).map(Value::Text))
    }

    fn set_binary_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.bind_with(index, move || read_bytes(reader, length).map(Value::Blob))
    }

    fn set_character_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.bind_with(index, move || read_text(reader, length).map(Value::Text))
    }

    fn set_ncharacter_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.bind_with(index, move || read_text(reader, length).map(Value::Text))
    }

    fn set_blob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.bind_with(index, move || read_bytes(reader, length).map(Value::Blob))
    }

    fn set_clob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.bind_with(index, move || read_text(reader, length).map(Value::Text))
    }

    fn set_nclob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.bind_with(index, move || read_text(reader, length).map(Value::Text))
    }

    fn set_object(
        &mut self,
        index: usize,
        value: SqlValue,
        target_type: Option<SqlType>,
        scale_or_length: Option<u32>,
    ) -> Result<(), SqlError> {
        self.bind_with(index, move || {
            let value = match target_type {
                Some(target) => coerce(value, target, scale_or_length)?,
                None => value,
            };
            sql_value_to_sqlite(&value)
        })
    }

    fn clear_parameters(&mut self) -> Result<(), SqlError> {
        self.ensure_open()?;
        self.bindings.iter_mut().for_each(|slot| *slot = None);
        Ok(())
    }

    fn execute_query(&mut self) -> Result<Box<dyn ResultSet>, SqlError> {
        self.ensure_open()?;
        let params = self.collect_params()?;
        Ok(Box::new(self.query_rows(&params)?))
    }

    fn execute_update(&mut self) -> Result<u64, SqlError> {
        self.ensure_open()?;
        let params = self.collect_params()?;
        self.run_update(&params)
    }

    fn execute(&mut self) -> Result<bool, SqlError> {
        self.ensure_open()?;
        let params = self.collect_params()?;
        let returns_rows = self.returns_rows()?;
        if returns_rows {
            self.current = Some(self.query_rows(&params)?);
            self.last_update_count = None;
        } else {
            let changed = self.run_update(&params)?;
            self.current = None;
            self.last_update_count = Some(changed);
        }
        Ok(returns_rows)
    }

    fn add_batch(&mut self) -> Result<(), SqlError> {
        self.ensure_open()?;
        let params = self.collect_params()?;
        self.batch.push(params);
        Ok(())
    }

    fn metadata(&mut self) -> Result<Option<ResultSetMetaData>, SqlError> {
        self.ensure_open()?;
        let stmt = self.conn.prepare_cached(&self.sql)?;
        if stmt.column_count() == 0 {
            return Ok(None);
        }
        Ok(Some(ResultSetMetaData::from_labels(stmt.column_names())))
    }

    fn parameter_metadata(&mut self) -> Result<ParameterMetaData, SqlError> {
        self.ensure_open()?;
        let stmt = self.conn.prepare_cached(&self.sql)?;
        let names = (1..=stmt.parameter_count())
            .map(|i| stmt.parameter_name(i).map(str::to_string))
            .collect();
        Ok(ParameterMetaData::new(names))
    }
}
