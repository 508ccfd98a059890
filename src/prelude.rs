//! Convenient imports for common functionality.
//!
//! ```rust
//! use sql_forwarding::prelude::*;
//! ```

pub use crate::cleanup::{close_if_present_appending, close_if_present_handling};
pub use crate::error::{SqlError, SqlErrorKind};
pub use crate::forwarding::ForwardingPreparedStatement;
pub use crate::instrumented::InstrumentedStatement;
pub use crate::metadata::{ColumnMetaData, ParameterMetaData, ResultSetMetaData};
pub use crate::results::{MaterializedResultSet, Row};
pub use crate::statement::{Closeable, PreparedStatement, ResultSet, Statement};
pub use crate::types::{SqlType, SqlValue};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteOptions, SqliteOptionsBuilder, SqlitePreparedStatement};
