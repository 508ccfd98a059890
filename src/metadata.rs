//! Plain-data descriptions of result columns and statement parameters.

use serde::{Deserialize, Serialize};

/// One column of a result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetaData {
    /// The column label as reported by the engine
    pub label: String,
    /// The declared type, when the engine exposes one
    pub declared_type: Option<String>,
}

impl ColumnMetaData {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            declared_type: None,
        }
    }

    #[must_use]
    pub fn with_declared_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }
}

/// Columns of a result set, addressed 1-based like statement parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSetMetaData {
    pub columns: Vec<ColumnMetaData>,
}

impl ResultSetMetaData {
    #[must_use]
    pub fn new(columns: Vec<ColumnMetaData>) -> Self {
        Self { columns }
    }

    /// Build metadata from bare labels.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: labels.into_iter().map(ColumnMetaData::new).collect(),
        }
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get a column by its 1-based index
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&ColumnMetaData> {
        index.checked_sub(1).and_then(|i| self.columns.get(i))
    }

    /// Find the 1-based index of the first column with this label
    #[must_use]
    pub fn find(&self, label: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|col| col.label == label)
            .map(|i| i + 1)
    }
}

/// Parameters of a prepared statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMetaData {
    /// Parameter names (`:name`, `$1`, ...), `None` for anonymous `?` slots
    pub names: Vec<Option<String>>,
}

impl ParameterMetaData {
    #[must_use]
    pub fn new(names: Vec<Option<String>>) -> Self {
        Self { names }
    }

    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.names.len()
    }

    /// Name of the 1-based parameter, if it has one
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.names.get(i))
            .and_then(|name| name.as_deref())
    }
}
