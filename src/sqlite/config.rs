use std::time::Duration;

use rusqlite::Connection;

use crate::error::{SqlError, SqlErrorKind};

/// Options for opening a `SQLite` connection that statements will borrow.
#[derive(Debug, Clone)]
pub struct SqliteOptions {
    pub db_path: String,
    pub busy_timeout: Option<Duration>,
    pub statement_cache_capacity: usize,
}

impl SqliteOptions {
    /// Default capacity of `rusqlite`'s prepared statement cache.
    pub const DEFAULT_STATEMENT_CACHE_CAPACITY: usize = 16;

    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            db_path,
            busy_timeout: None,
            statement_cache_capacity: Self::DEFAULT_STATEMENT_CACHE_CAPACITY,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(":memory:".to_string())
    }

    #[must_use]
    pub fn builder(db_path: String) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }

    /// Open a connection configured with these options.
    ///
    /// # Errors
    /// Returns [`SqlErrorKind::ConnectionError`] if the database cannot be opened, or
    /// the `SQLite` error if applying the busy timeout fails.
    pub fn open(&self) -> Result<Connection, SqlError> {
        let conn = if self.db_path == ":memory:" {
            Connection::open_in_memory()
        } else {
            Connection::open(&self.db_path)
        }
        .map_err(|e| {
            SqlErrorKind::ConnectionError(format!("failed to open {}: {e}", self.db_path))
        })?;

        if let Some(timeout) = self.busy_timeout {
            conn.busy_timeout(timeout)?;
        }
        conn.set_prepared_statement_cache_capacity(self.statement_cache_capacity);
        tracing::debug!(db_path = %self.db_path, "opened sqlite connection");
        Ok(conn)
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.opts.busy_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn statement_cache_capacity(mut self, capacity: usize) -> Self {
        self.opts.statement_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Build the options and open a connection with them.
    ///
    /// # Errors
    /// See [`SqliteOptions::open`].
    pub fn open(self) -> Result<Connection, SqlError> {
        self.finish().open()
    }
}
