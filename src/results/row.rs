use std::collections::HashMap;
use std::sync::Arc;

use crate::types::SqlValue;

/// A single materialized row.
///
/// The label-to-index map is shared by every row of the same result set.
#[derive(Debug, Clone)]
pub struct Row {
    values: Vec<SqlValue>,
    column_index: Arc<HashMap<String, usize>>,
}

impl Row {
    pub(crate) fn new(values: Vec<SqlValue>, column_index: Arc<HashMap<String, usize>>) -> Self {
        Self {
            values,
            column_index,
        }
    }

    /// Get a value from the row by column label
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&SqlValue> {
        self.column_index
            .get(label)
            .and_then(|&idx| self.values.get(idx))
    }

    /// Get a value from the row by 0-based position
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }
}

/// Map labels to 0-based positions. Duplicate labels resolve to the first column.
pub(crate) fn build_column_index<'a, I>(labels: I) -> Arc<HashMap<String, usize>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index = HashMap::new();
    for (i, label) in labels.into_iter().enumerate() {
        index.entry(label.to_string()).or_insert(i);
    }
    Arc::new(index)
}
