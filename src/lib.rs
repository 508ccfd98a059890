//! Forwarding decorators for prepared SQL statements, plus cleanup helpers that
//! keep the first failure and record close failures as suppressed.
//!
//! The driver-facing surface is the [`statement`] traits. A decorator implements
//! [`ForwardingPreparedStatement`], names its delegate, and overrides only the
//! calls it wants to change. Everything else reaches the delegate unchanged.
//!
//! The `sqlite` feature (on by default) adds a `rusqlite`-backed statement that
//! decorators can wrap. `test-utils` exposes recording fakes for downstream
//! tests.

pub mod cleanup;
pub mod error;
pub mod forwarding;
pub mod instrumented;
pub mod metadata;
pub mod prelude;
pub mod results;
pub mod statement;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use cleanup::{close_if_present_appending, close_if_present_handling};
pub use error::{SqlError, SqlErrorKind};
pub use forwarding::ForwardingPreparedStatement;
pub use instrumented::InstrumentedStatement;
pub use statement::{Closeable, PreparedStatement, ResultSet, Statement};
pub use types::{SqlType, SqlValue};
