//! Closing statements and result sets on error paths.
//!
//! When a statement fails, its resources still need releasing, and releasing them
//! can fail too. These helpers make sure a failure raised during teardown never
//! replaces the failure that caused the teardown.
//!
//! ```rust
//! use sql_forwarding::cleanup::close_if_present_appending;
//! use sql_forwarding::prelude::*;
//!
//! fn load(stmt: &mut dyn PreparedStatement) -> Result<Vec<SqlValue>, SqlError> {
//!     let mut rs = stmt.execute_query()?;
//!     let mut out = Vec::new();
//!     loop {
//!         match rs.next().and_then(|more| if more { rs.get(1).map(Some) } else { Ok(None) }) {
//!             Ok(Some(value)) => out.push(value),
//!             Ok(None) => break,
//!             Err(mut err) => {
//!                 close_if_present_appending(Some(&mut *rs), Some(&mut err))?;
//!                 return Err(err);
//!             }
//!         }
//!     }
//!     rs.close()?;
//!     Ok(out)
//! }
//! ```

use tracing::debug;

use crate::error::{SqlError, SqlErrorKind};
use crate::statement::Closeable;

/// Close `resource` if present, passing any failure to `handler` instead of returning it.
///
/// `handler` runs at most once, and only when closing fails. An absent resource is a
/// no-op.
pub fn close_if_present_handling<R, F>(resource: Option<&mut R>, handler: F)
where
    R: Closeable + ?Sized,
    F: FnOnce(SqlError),
{
    let Some(resource) = resource else {
        return;
    };
    if let Err(err) = resource.close() {
        debug!(error = %err, "close failed during cleanup");
        handler(err);
    }
}

/// Close `resource` if present, recording any failure as suppressed on `primary`.
///
/// `primary` stays the dominant failure; the close failure is appended to
/// [`SqlError::suppressed`]. An absent resource is a no-op.
///
/// # Errors
/// Returns [`SqlErrorKind::Precondition`] when `primary` is `None`. The resource is
/// not touched in that case. Close failures are never returned.
pub fn close_if_present_appending<R>(
    resource: Option<&mut R>,
    primary: Option<&mut SqlError>,
) -> Result<(), SqlError>
where
    R: Closeable + ?Sized,
{
    let Some(primary) = primary else {
        return Err(SqlErrorKind::Precondition(
            "a primary failure is required to record close failures against".into(),
        )
        .into());
    };
    close_if_present_handling(resource, |err| primary.add_suppressed(err));
    Ok(())
}
