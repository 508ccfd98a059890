//! A [`PreparedStatement`] decorator that forwards every call to a delegate.
//!
//! Implement [`ForwardingPreparedStatement::delegate`] and override only the
//! operations whose behavior should change; every type implementing the trait is
//! a [`PreparedStatement`] through the blanket impl at the bottom of this module.
//!
//! ```rust
//! use sql_forwarding::prelude::*;
//!
//! struct Uppercasing<S> {
//!     inner: S,
//! }
//!
//! impl<S: PreparedStatement> ForwardingPreparedStatement for Uppercasing<S> {
//!     fn delegate(&mut self) -> &mut dyn PreparedStatement {
//!         &mut self.inner
//!     }
//!
//!     fn set_string(&mut self, index: usize, value: &str) -> Result<(), SqlError> {
//!         self.delegate().set_string(index, &value.to_uppercase())
//!     }
//! }
//! ```
//!
//! **Warning:** forwarding is indiscriminate. Overriding one operation does not
//! change other operations that the delegate implements in terms of it: the
//! default `set_object` calls the delegate's `set_object`, never this wrapper's
//! `set_string`.

use std::io::Read;
use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value as JsonValue;

use crate::error::SqlError;
use crate::metadata::{ParameterMetaData, ResultSetMetaData};
use crate::statement::{Closeable, PreparedStatement, ResultSet, Statement};
use crate::types::{SqlType, SqlValue};

/// Decorator contract for prepared statements.
///
/// `delegate` is called afresh on every forwarded operation and must keep
/// returning the same statement unless the implementer deliberately swaps it.
pub trait ForwardingPreparedStatement {
    /// The statement every non-overridden call is sent to.
    fn delegate(&mut self) -> &mut dyn PreparedStatement;

    fn close(&mut self) -> Result<(), SqlError> {
        self.delegate().close()
    }

    fn is_closed(&mut self) -> Result<bool, SqlError> {
        self.delegate().is_closed()
    }

    fn cancel(&mut self) -> Result<(), SqlError> {
        self.delegate().cancel()
    }

    fn max_rows(&mut self) -> Result<u64, SqlError> {
        self.delegate().max_rows()
    }

    fn set_max_rows(&mut self, max_rows: u64) -> Result<(), SqlError> {
        self.delegate().set_max_rows(max_rows)
    }

    fn query_timeout(&mut self) -> Result<Option<Duration>, SqlError> {
        self.delegate().query_timeout()
    }

    fn set_query_timeout(&mut self, timeout: Option<Duration>) -> Result<(), SqlError> {
        self.delegate().set_query_timeout(timeout)
    }

    fn result_set(&mut self) -> Result<Option<Box<dyn ResultSet>>, SqlError> {
        self.delegate().result_set()
    }

    fn update_count(&mut self) -> Result<Option<u64>, SqlError> {
        self.delegate().update_count()
    }

    fn execute_batch(&mut self) -> Result<Vec<u64>, SqlError> {
        self.delegate().execute_batch()
    }

    fn clear_batch(&mut self) -> Result<(), SqlError> {
        self.delegate().clear_batch()
    }

    fn set_null(&mut self, index: usize, sql_type: SqlType) -> Result<(), SqlError> {
        self.delegate().set_null(index, sql_type)
    }

    fn set_null_named(
        &mut self,
        index: usize,
        sql_type: SqlType,
        type_name: &str,
    ) -> Result<(), SqlError> {
        self.delegate().set_null_named(index, sql_type, type_name)
    }

    fn set_bool(&mut self, index: usize, value: bool) -> Result<(), SqlError> {
        self.delegate().set_bool(index, value)
    }

    fn set_i8(&mut self, index: usize, value: i8) -> Result<(), SqlError> {
        self.delegate().set_i8(index, value)
    }

    fn set_i16(&mut self, index: usize, value: i16) -> Result<(), SqlError> {
        self.delegate().set_i16(index, value)
    }

    fn set_i32(&mut self, index: usize, value: i32) -> Result<(), SqlError> {
        self.delegate().set_i32(index, value)
    }

    fn set_i64(&mut self, index: usize, value: i64) -> Result<(), SqlError> {
        self.delegate().set_i64(index, value)
    }

    fn set_f32(&mut self, index: usize, value: f32) -> Result<(), SqlError> {
        self.delegate().set_f32(index, value)
    }

    fn set_f64(&mut self, index: usize, value: f64) -> Result<(), SqlError> {
        self.delegate().set_f64(index, value)
    }

    fn set_string(&mut self, index: usize, value: &str) -> Result<(), SqlError> {
        self.delegate().set_string(index, value)
    }

    fn set_nstring(&mut self, index: usize, value: &str) -> Result<(), SqlError> {
        self.delegate().set_nstring(index, value)
    }

    fn set_bytes(&mut self, index: usize, value: &[u8]) -> Result<(), SqlError> {
        self.delegate().set_bytes(index, value)
    }

    fn set_json(&mut self, index: usize, value: &JsonValue) -> Result<(), SqlError> {
        self.delegate().set_json(index, value)
    }

    fn set_array(&mut self, index: usize, values: &[SqlValue]) -> Result<(), SqlError> {
        self.delegate().set_array(index, values)
    }

    fn set_date(
        &mut self,
        index: usize,
        value: NaiveDate,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError> {
        self.delegate().set_date(index, value, offset)
    }

    fn set_time(
        &mut self,
        index: usize,
        value: NaiveTime,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError> {
        self.delegate().set_time(index, value, offset)
    }

    fn set_timestamp(
        &mut self,
        index: usize,
        value: NaiveDateTime,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError> {
        self.delegate().set_timestamp(index, value, offset)
    }

    fn set_ascii_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.delegate().set_ascii_stream(index, reader, length)
    }

    fn set_binary_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.delegate().set_binary_stream(index, reader, length)
    }

    fn set_character_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.delegate().set_character_stream(index, reader, length)
    }

    fn set_ncharacter_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.delegate().set_ncharacter_stream(index, reader, length)
    }

    fn set_blob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.delegate().set_blob(index, reader, length)
    }

    fn set_clob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.delegate().set_clob(index, reader, length)
    }

    fn set_nclob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        self.delegate().set_nclob(index, reader, length)
    }

    fn set_object(
        &mut self,
        index: usize,
        value: SqlValue,
        target_type: Option<SqlType>,
        scale_or_length: Option<u32>,
    ) -> Result<(), SqlError> {
        self.delegate()
            .set_object(index, value, target_type, scale_or_length)
    }

    fn clear_parameters(&mut self) -> Result<(), SqlError> {
        self.delegate().clear_parameters()
    }

    fn execute_query(&mut self) -> Result<Box<dyn ResultSet>, SqlError> {
        self.delegate().execute_query()
    }

    fn execute_update(&mut self) -> Result<u64, SqlError> {
        self.delegate().execute_update()
    }

    fn execute(&mut self) -> Result<bool, SqlError> {
        self.delegate().execute()
    }

    fn add_batch(&mut self) -> Result<(), SqlError> {
        self.delegate().add_batch()
    }

    fn metadata(&mut self) -> Result<Option<ResultSetMetaData>, SqlError> {
        self.delegate().metadata()
    }

    fn parameter_metadata(&mut self) -> Result<ParameterMetaData, SqlError> {
        self.delegate().parameter_metadata()
    }
}

// The blanket impls route through the decorator's own (possibly overridden)
// methods, so callers holding a `dyn PreparedStatement` see the overrides.

impl<T: ForwardingPreparedStatement> Closeable for T {
    fn close(&mut self) -> Result<(), SqlError> {
        ForwardingPreparedStatement::close(self)
    }
}

impl<T: ForwardingPreparedStatement> Statement for T {
    fn is_closed(&mut self) -> Result<bool, SqlError> {
        ForwardingPreparedStatement::is_closed(self)
    }

    fn cancel(&mut self) -> Result<(), SqlError> {
        ForwardingPreparedStatement::cancel(self)
    }

    fn max_rows(&mut self) -> Result<u64, SqlError> {
        ForwardingPreparedStatement::max_rows(self)
    }

    fn set_max_rows(&mut self, max_rows: u64) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_max_rows(self, max_rows)
    }

    fn query_timeout(&mut self) -> Result<Option<Duration>, SqlError> {
        ForwardingPreparedStatement::query_timeout(self)
    }

    fn set_query_timeout(&mut self, timeout: Option<Duration>) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_query_timeout(self, timeout)
    }

    fn result_set(&mut self) -> Result<Option<Box<dyn ResultSet>>, SqlError> {
        ForwardingPreparedStatement::result_set(self)
    }

    fn update_count(&mut self) -> Result<Option<u64>, SqlError> {
        ForwardingPreparedStatement::update_count(self)
    }

    fn execute_batch(&mut self) -> Result<Vec<u64>, SqlError> {
        ForwardingPreparedStatement::execute_batch(self)
    }

    fn clear_batch(&mut self) -> Result<(), SqlError> {
        ForwardingPreparedStatement::clear_batch(self)
    }
}

impl<T: ForwardingPreparedStatement> PreparedStatement for T {
    fn set_null(&mut self, index: usize, sql_type: SqlType) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_null(self, index, sql_type)
    }

    fn set_null_named(
        &mut self,
        index: usize,
        sql_type: SqlType,
        type_name: &str,
    ) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_null_named(self, index, sql_type, type_name)
    }

    fn set_bool(&mut self, index: usize, value: bool) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_bool(self, index, value)
    }

    fn set_i8(&mut self, index: usize, value: i8) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_i8(self, index, value)
    }

    fn set_i16(&mut self, index: usize, value: i16) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_i16(self, index, value)
    }

    fn set_i32(&mut self, index: usize, value: i32) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_i32(self, index, value)
    }

    fn set_i64(&mut self, index: usize, value: i64) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_i64(self, index, value)
    }

    fn set_f32(&mut self, index: usize, value: f32) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_f32(self, index, value)
    }

    fn set_f64(&mut self, index: usize, value: f64) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_f64(self, index, value)
    }

    fn set_string(&mut self, index: usize, value: &str) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_string(self, index, value)
    }

    fn set_nstring(&mut self, index: usize, value: &str) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_nstring(self, index, value)
    }

    fn set_bytes(&mut self, index: usize, value: &[u8]) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_bytes(self, index, value)
    }

    fn set_json(&mut self, index: usize, value: &JsonValue) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_json(self, index, value)
    }

    fn set_array(&mut self, index: usize, values: &[SqlValue]) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_array(self, index, values)
    }

    fn set_date(
        &mut self,
        index: usize,
        value: NaiveDate,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_date(self, index, value, offset)
    }

    fn set_time(
        &mut self,
        index: usize,
        value: NaiveTime,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_time(self, index, value, offset)
    }

    fn set_timestamp(
        &mut self,
        index: usize,
        value: NaiveDateTime,
        offset: Option<FixedOffset>,
    ) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_timestamp(self, index, value, offset)
    }

    fn set_ascii_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_ascii_stream(self, index, reader, length)
    }

    fn set_binary_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_binary_stream(self, index, reader, length)
    }

    fn set_character_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_character_stream(self, index, reader, length)
    }

    fn set_ncharacter_stream(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_ncharacter_stream(self, index, reader, length)
    }

    fn set_blob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_blob(self, index, reader, length)
    }

    fn set_clob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_clob(self, index, reader, length)
    }

    fn set_nclob(
        &mut self,
        index: usize,
        reader: Box<dyn Read>,
        length: Option<u64>,
    ) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_nclob(self, index, reader, length)
    }

    fn set_object(
        &mut self,
        index: usize,
        value: SqlValue,
        target_type: Option<SqlType>,
        scale_or_length: Option<u32>,
    ) -> Result<(), SqlError> {
        ForwardingPreparedStatement::set_object(self, index, value, target_type, scale_or_length)
    }

    fn clear_parameters(&mut self) -> Result<(), SqlError> {
        ForwardingPreparedStatement::clear_parameters(self)
    }

    fn execute_query(&mut self) -> Result<Box<dyn ResultSet>, SqlError> {
        ForwardingPreparedStatement::execute_query(self)
    }

    fn execute_update(&mut self) -> Result<u64, SqlError> {
        ForwardingPreparedStatement::execute_update(self)
    }

    fn execute(&mut self) -> Result<bool, SqlError> {
        ForwardingPreparedStatement::execute(self)
    }

    fn add_batch(&mut self) -> Result<(), SqlError> {
        ForwardingPreparedStatement::add_batch(self)
    }

    fn metadata(&mut self) -> Result<Option<ResultSetMetaData>, SqlError> {
        ForwardingPreparedStatement::metadata(self)
    }

    fn parameter_metadata(&mut self) -> Result<ParameterMetaData, SqlError> {
        ForwardingPreparedStatement::parameter_metadata(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingStatement, RecordingResultSet};

    struct Passthrough {
        inner: RecordingStatement,
    }

    impl ForwardingPreparedStatement for Passthrough {
        fn delegate(&mut self) -> &mut dyn PreparedStatement {
            &mut self.inner
        }
    }

    struct Uppercasing {
        inner: RecordingStatement,
    }

    impl ForwardingPreparedStatement for Uppercasing {
        fn delegate(&mut self) -> &mut dyn PreparedStatement {
            &mut self.inner
        }

        fn set_string(&mut self, index: usize, value: &str) -> Result<(), SqlError> {
            self.delegate().set_string(index, &value.to_uppercase())
        }
    }

    #[test]
    fn binds_forward_with_identical_arguments() -> Result<(), SqlError> {
        let inner = RecordingStatement::new();
        let log = inner.log();
        let mut wrapper = Passthrough { inner };
        let stmt: &mut dyn PreparedStatement = &mut wrapper;

        stmt.set_i32(1, 42)?;
        stmt.set_null(2, SqlType::VarChar)?;
        stmt.set_null_named(3, SqlType::Other, "point")?;
        stmt.set_bytes(4, &[1, 2, 3])?;
        stmt.set_object(5, SqlValue::Float(1.5), Some(SqlType::Decimal), Some(2))?;
        stmt.clear_parameters()?;

        assert_eq!(
            log.calls(),
            vec![
                "set_i32(1, 42)",
                "set_null(2, VarChar)",
                "set_null_named(3, Other, \"point\")",
                "set_bytes(4, [1, 2, 3])",
                "set_object(5, Float(1.5), Some(Decimal), Some(2))",
                "clear_parameters()",
            ]
        );
        Ok(())
    }

    #[test]
    fn results_come_back_unchanged() -> Result<(), SqlError> {
        let mut inner = RecordingStatement::new();
        inner.set_update_count(7);
        inner.queue_result_set(RecordingResultSet::with_rows(
            ["id"],
            vec![vec![SqlValue::Int(9)]],
        ));
        let mut wrapper = Passthrough { inner };
        let stmt: &mut dyn PreparedStatement = &mut wrapper;

        assert_eq!(stmt.execute_update()?, 7);
        let mut rs = stmt.execute_query()?;
        assert!(rs.next()?);
        assert_eq!(rs.get(1)?, SqlValue::Int(9));
        Ok(())
    }

    #[test]
    fn delegate_failures_propagate_verbatim() {
        let mut inner = RecordingStatement::new();
        inner.fail_on("execute_update", "constraint violated");
        let mut wrapper = Passthrough { inner };
        let stmt: &mut dyn PreparedStatement = &mut wrapper;

        let err = stmt.execute_update().unwrap_err();
        assert_eq!(err.to_string(), "SQL execution error: constraint violated");
        assert!(err.suppressed().is_empty());
    }

    #[test]
    fn override_applies_to_the_overridden_operation() -> Result<(), SqlError> {
        let inner = RecordingStatement::new();
        let log = inner.log();
        let mut wrapper = Uppercasing { inner };
        let stmt: &mut dyn PreparedStatement = &mut wrapper;

        stmt.set_string(1, "abc")?;
        stmt.execute_update()?;

        assert_eq!(log.calls(), vec!["set_string(1, \"ABC\")", "execute_update()"]);
        Ok(())
    }

    #[test]
    fn forwarding_is_not_virtual() -> Result<(), SqlError> {
        let inner = RecordingStatement::new();
        let log = inner.log();
        let mut wrapper = Uppercasing { inner };
        let stmt: &mut dyn PreparedStatement = &mut wrapper;

        // The recording delegate implements set_object for text by calling its own
        // set_string; the wrapper's override must not be reached.
        stmt.set_object(1, SqlValue::Text("abc".into()), None, None)?;

        assert_eq!(
            log.calls(),
            vec![
                "set_object(1, Text(\"abc\"), None, None)",
                "set_string(1, \"abc\")",
            ]
        );
        Ok(())
    }

    struct Switching {
        primary: RecordingStatement,
        fallback: RecordingStatement,
        use_fallback: bool,
    }

    impl ForwardingPreparedStatement for Switching {
        fn delegate(&mut self) -> &mut dyn PreparedStatement {
            if self.use_fallback {
                &mut self.fallback
            } else {
                &mut self.primary
            }
        }
    }

    #[test]
    fn delegate_is_consulted_on_every_call() -> Result<(), SqlError> {
        let primary = RecordingStatement::new();
        let fallback = RecordingStatement::new();
        let (primary_log, fallback_log) = (primary.log(), fallback.log());
        let mut wrapper = Switching {
            primary,
            fallback,
            use_fallback: false,
        };

        PreparedStatement::set_bool(&mut wrapper, 1, true)?;
        wrapper.use_fallback = true;
        PreparedStatement::set_bool(&mut wrapper, 1, false)?;

        assert_eq!(primary_log.calls(), vec!["set_bool(1, true)"]);
        assert_eq!(fallback_log.calls(), vec!["set_bool(1, false)"]);
        Ok(())
    }

    #[test]
    fn every_operation_reaches_the_delegate_unchanged() -> Result<(), SqlError> {
        use std::io::Cursor;

        use chrono::NaiveDate;
        use serde_json::json;

        use crate::metadata::ColumnMetaData;

        let mut inner = RecordingStatement::new();
        inner.set_update_count(2);
        let columns = ResultSetMetaData::new(vec![
            ColumnMetaData::new("id").with_declared_type("INTEGER"),
        ]);
        inner.set_metadata(columns.clone());
        let parameters = ParameterMetaData::new(vec![Some(":id".into()), None]);
        inner.set_parameter_metadata(parameters.clone());
        let log = inner.log();
        let mut wrapper = Passthrough { inner };
        let stmt: &mut dyn PreparedStatement = &mut wrapper;

        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let at = day.and_hms_opt(9, 30, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        stmt.set_i8(1, -8)?;
        stmt.set_i16(2, 16)?;
        stmt.set_i64(3, 64)?;
        stmt.set_f32(4, 0.5)?;
        stmt.set_f64(5, 2.25)?;
        stmt.set_nstring(6, "wide")?;
        stmt.set_json(7, &json!({"a": 1}))?;
        stmt.set_array(8, &[SqlValue::Int(1), SqlValue::Null])?;
        stmt.set_date(9, day, None)?;
        stmt.set_time(10, at.time(), Some(plus_two))?;
        stmt.set_timestamp(11, at, None)?;
        stmt.set_ascii_stream(12, Box::new(Cursor::new("ascii")), None)?;
        stmt.set_binary_stream(13, Box::new(Cursor::new("binary")), Some(3))?;
        stmt.set_character_stream(14, Box::new(Cursor::new("chars")), None)?;
        stmt.set_ncharacter_stream(15, Box::new(Cursor::new("nchars")), Some(1))?;
        stmt.set_blob(16, Box::new(Cursor::new("blob")), None)?;
        stmt.set_clob(17, Box::new(Cursor::new("clob")), None)?;
        stmt.set_nclob(18, Box::new(Cursor::new("nclob")), Some(2))?;

        assert!(!stmt.is_closed()?);
        stmt.cancel()?;
        stmt.set_max_rows(10)?;
        assert_eq!(stmt.max_rows()?, 10);
        stmt.set_query_timeout(Some(Duration::from_secs(3)))?;
        assert_eq!(stmt.query_timeout()?, Some(Duration::from_secs(3)));
        assert_eq!(stmt.metadata()?, Some(columns));
        assert_eq!(stmt.parameter_metadata()?, parameters);
        stmt.add_batch()?;
        stmt.clear_batch()?;
        stmt.add_batch()?;
        assert_eq!(stmt.execute_batch()?, vec![2]);
        assert!(!stmt.execute()?);
        assert_eq!(stmt.update_count()?, Some(2));
        assert!(stmt.result_set()?.is_none());
        stmt.close()?;
        assert!(stmt.is_closed()?);

        assert_eq!(
            log.calls(),
            vec![
                "set_i8(1, -8)",
                "set_i16(2, 16)",
                "set_i64(3, 64)",
                "set_f32(4, 0.5)",
                "set_f64(5, 2.25)",
                "set_nstring(6, \"wide\")",
                "set_json(7, {\"a\":1})",
                "set_array(8, [Int(1), Null])",
                "set_date(9, 2024-03-01, None)",
                "set_time(10, 09:30:00, Some(+02:00))",
                "set_timestamp(11, 2024-03-01 09:30:00, None)",
                "set_ascii_stream(12, \"ascii\", None)",
                "set_binary_stream(13, \"bin\", Some(3))",
                "set_character_stream(14, \"chars\", None)",
                "set_ncharacter_stream(15, \"n\", Some(1))",
                "set_blob(16, \"blob\", None)",
                "set_clob(17, \"clob\", None)",
                "set_nclob(18, \"nc\", Some(2))",
                "is_closed()",
                "cancel()",
                "set_max_rows(10)",
                "max_rows()",
                "set_query_timeout(Some(3s))",
                "query_timeout()",
                "metadata()",
                "parameter_metadata()",
                "add_batch()",
                "clear_batch()",
                "add_batch()",
                "execute_batch()",
                "execute()",
                "update_count()",
                "result_set()",
                "close()",
                "is_closed()",
            ]
        );
        Ok(())
    }
}
