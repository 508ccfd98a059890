use std::fmt;

use thiserror::Error;

/// The cause carried by a [`SqlError`].
#[derive(Debug, Error)]
pub enum SqlErrorKind {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Statement is closed: {0}")]
    StatementClosed(String),

    #[error("Unimplemented feature: {0}")]
    Unimplemented(String),

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("Other database error: {0}")]
    Other(String),
}

/// A database failure plus the failures suppressed while cleaning up after it.
///
/// The kind is always the dominant cause. Failures raised while tearing down
/// resources are appended with [`SqlError::add_suppressed`] and never replace
/// it. `Display` prints only the dominant cause; the alternate form (`{:#}`)
/// also lists the suppressed failures in the order they were recorded.
#[derive(Debug)]
pub struct SqlError {
    kind: SqlErrorKind,
    suppressed: Vec<SqlError>,
}

impl SqlError {
    #[must_use]
    pub fn new(kind: SqlErrorKind) -> Self {
        Self {
            kind,
            suppressed: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &SqlErrorKind {
        &self.kind
    }

    #[must_use]
    pub fn into_kind(self) -> SqlErrorKind {
        self.kind
    }

    /// Record `error` as secondary to this one.
    pub fn add_suppressed(&mut self, error: SqlError) {
        self.suppressed.push(error);
    }

    /// Failures recorded with [`SqlError::add_suppressed`], oldest first.
    #[must_use]
    pub fn suppressed(&self) -> &[SqlError] {
        &self.suppressed
    }

    pub(crate) fn parameter(message: impl Into<String>) -> Self {
        SqlErrorKind::ParameterError(message.into()).into()
    }

    pub(crate) fn execution(message: impl Into<String>) -> Self {
        SqlErrorKind::ExecutionError(message.into()).into()
    }

    pub(crate) fn closed(what: impl Into<String>) -> Self {
        SqlErrorKind::StatementClosed(what.into()).into()
    }

    pub(crate) fn unimplemented(feature: impl Into<String>) -> Self {
        SqlErrorKind::Unimplemented(feature.into()).into()
    }
}

impl fmt::Display for SqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if f.alternate() {
            for err in &self.suppressed {
                write!(f, "\n  suppressed: {err}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for SqlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<SqlErrorKind> for SqlError {
    fn from(kind: SqlErrorKind) -> Self {
        SqlError::new(kind)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for SqlError {
    fn from(err: rusqlite::Error) -> Self {
        SqlError::new(SqlErrorKind::Sqlite(err))
    }
}

impl From<std::io::Error> for SqlError {
    fn from(err: std::io::Error) -> Self {
        SqlError::new(SqlErrorKind::Io(err))
    }
}
