//! Span creation helpers for cell operations.
//!
//! Telemetry concerns are kept out of the cell logic: each instrumented
//! operation has a span helper here, and the cell enters or instruments with it.
//!
//! Usage pattern:
//! ```rust,ignore
//! let value = spans::refresh(name, ttl).in_scope(|| refresh.refresh())?;
//! ```

use std::time::Duration;

use tracing::Span;

/// Create span covering one invocation of a cell's refresh function.
///
/// Parent: whatever span the caller of `get` is in
/// Children: spans opened by the user-supplied producer
#[inline]
pub(crate) fn refresh(cell: &str, ttl: Duration) -> Span {
    tracing::debug_span!("ttlcell.refresh", cell = %cell, ttl = ?ttl,)
}
