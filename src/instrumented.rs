use std::time::Instant;

use tracing::{debug, warn};

use crate::error::SqlError;
use crate::forwarding::ForwardingPreparedStatement;
use crate::statement::{PreparedStatement, ResultSet};

/// Decorator that emits a `tracing` event for every execution of the wrapped
/// statement. Binding and metadata calls are forwarded untouched.
///
/// ```rust
/// use sql_forwarding::InstrumentedStatement;
/// use sql_forwarding::prelude::*;
///
/// fn wrap<S: PreparedStatement + 'static>(stmt: S) -> Box<dyn PreparedStatement> {
///     Box::new(InstrumentedStatement::new("load_user", stmt))
/// }
/// ```
#[derive(Debug)]
pub struct InstrumentedStatement<S> {
    label: String,
    inner: S,
}

impl<S: PreparedStatement> InstrumentedStatement<S> {
    pub fn new(label: impl Into<String>, inner: S) -> Self {
        Self {
            label: label.into(),
            inner,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn observe<T>(
        &mut self,
        operation: &'static str,
        run: impl FnOnce(&mut S) -> Result<T, SqlError>,
        describe: impl FnOnce(&T) -> u64,
    ) -> Result<T, SqlError> {
        let started = Instant::now();
        let outcome = run(&mut self.inner);
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &outcome {
            Ok(value) => {
                let rows = describe(value);
                debug!(
                    statement = %self.label,
                    operation,
                    elapsed_ms,
                    rows,
                    "statement executed"
                );
            }
            Err(err) => warn!(
                statement = %self.label,
                operation,
                elapsed_ms,
                error = %err,
                "statement failed"
            ),
        }
        outcome
    }
}

impl<S: PreparedStatement> ForwardingPreparedStatement for InstrumentedStatement<S> {
    fn delegate(&mut self) -> &mut dyn PreparedStatement {
        &mut self.inner
    }

    fn execute_query(&mut self) -> Result<Box<dyn ResultSet>, SqlError> {
        self.observe("execute_query", |s| s.execute_query(), |_| 0)
    }

    fn execute_update(&mut self) -> Result<u64, SqlError> {
        self.observe("execute_update", |s| s.execute_update(), |count| *count)
    }

    fn execute(&mut self) -> Result<bool, SqlError> {
        self.observe("execute", |s| s.execute(), |_| 0)
    }

    fn execute_batch(&mut self) -> Result<Vec<u64>, SqlError> {
        self.observe(
            "execute_batch",
            |s| s.execute_batch(),
            |counts| counts.iter().copied().fold(0, u64::saturating_add),
        )
    }
}
