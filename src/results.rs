//! In-memory result sets for delegates that materialize rows up front.

mod result_set;
mod row;

pub use result_set::MaterializedResultSet;
pub use row::Row;
