use std::collections::HashMap;
use std::sync::Arc;

use crate::error::SqlError;
use crate::metadata::ResultSetMetaData;
use crate::statement::{Closeable, ResultSet};
use crate::types::SqlValue;

use super::row::{Row, build_column_index};

/// A result set whose rows were fully read before being handed out.
///
/// The cursor starts before the first row. Columns are 1-based through the
/// [`ResultSet`] trait and 0-based on [`Row`].
#[derive(Debug, Clone)]
pub struct MaterializedResultSet {
    metadata: Arc<ResultSetMetaData>,
    column_index: Arc<HashMap<String, usize>>,
    rows: Vec<Row>,
    // 0 = before first row, n = on row n, len + 1 = after last
    position: usize,
    closed: bool,
}

impl MaterializedResultSet {
    #[must_use]
    pub fn new(metadata: ResultSetMetaData) -> Self {
        Self::with_capacity(metadata, 0)
    }

    /// Create a new result set with a known row capacity
    #[must_use]
    pub fn with_capacity(metadata: ResultSetMetaData, capacity: usize) -> Self {
        let column_index = build_column_index(metadata.columns.iter().map(|c| c.label.as_str()));
        Self {
            metadata: Arc::new(metadata),
            column_index,
            rows: Vec::with_capacity(capacity),
            position: 0,
            closed: false,
        }
    }

    /// Append a row. Values beyond the column count are kept but unreachable by label.
    pub fn push_row(&mut self, values: Vec<SqlValue>) {
        self.rows.push(Row::new(values, Arc::clone(&self.column_index)));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn ensure_open(&self) -> Result<(), SqlError> {
        if self.closed {
            Err(SqlError::closed("result set"))
        } else {
            Ok(())
        }
    }

    fn current_row(&self) -> Result<&Row, SqlError> {
        if self.position == 0 || self.position > self.rows.len() {
            return Err(SqlError::execution("result set is not positioned on a row"));
        }
        Ok(&self.rows[self.position - 1])
    }
}

impl Closeable for MaterializedResultSet {
    fn close(&mut self) -> Result<(), SqlError> {
        self.closed = true;
        self.rows.clear();
        Ok(())
    }
}

impl ResultSet for MaterializedResultSet {
    fn next(&mut self) -> Result<bool, SqlError> {
        self.ensure_open()?;
        if self.position <= self.rows.len() {
            self.position += 1;
        }
        Ok(self.position <= self.rows.len())
    }

    fn get(&mut self, column: usize) -> Result<SqlValue, SqlError> {
        self.ensure_open()?;
        let row = self.current_row()?;
        column
            .checked_sub(1)
            .and_then(|i| row.get_by_index(i))
            .cloned()
            .ok_or_else(|| SqlError::parameter(format!("column index out of range: {column}")))
    }

    fn find_column(&mut self, label: &str) -> Result<usize, SqlError> {
        self.ensure_open()?;
        self.column_index
            .get(label)
            .map(|i| i + 1)
            .ok_or_else(|| SqlError::parameter(format!("no such column: {label}")))
    }

    fn metadata(&mut self) -> Result<ResultSetMetaData, SqlError> {
        self.ensure_open()?;
        Ok(self.metadata.as_ref().clone())
    }

    fn is_closed(&mut self) -> Result<bool, SqlError> {
        Ok(self.closed)
    }
}
