// SQLite module - a `PreparedStatement` delegate backed by `rusqlite`
//
// - config: connection options and builder
// - params: value conversion between `SqlValue` and SQLite values
// - prepared: the statement implementation

pub mod config;
pub mod params;
pub mod prepared;

pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use params::{coerce, sqlite_value_to_sql_value, sql_value_to_sqlite};
pub use prepared::SqlitePreparedStatement;
