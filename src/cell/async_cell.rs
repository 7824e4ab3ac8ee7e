// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Async TTL cell

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::Instrument;

use super::state::{log_refresh, CellState};
use super::{CellOptions, TtlCellBuilder};
use crate::config::CellConfig;
use crate::errors::ConfigError;
use crate::refresh::AsyncRefresh;
use crate::spans;

/// Caches the last successful result of an async producer for a fixed TTL
///
/// Same contract as [`crate::TtlCell`], for tasks: the cell's
/// [`tokio::sync::Mutex`] is held across the producer's `.await`, so tasks that
/// read an expired cell queue behind a single refresh instead of starting their
/// own. Dropping a `get` future mid-refresh cancels that refresh and leaves the
/// cell as it was.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use ttlcell::AsyncTtlCell;
///
/// # #[tokio::main]
/// # async fn main() {
/// let cell = AsyncTtlCell::new(Duration::from_secs(30), || async {
///     Ok::<_, String>("quote")
/// });
///
/// assert_eq!(cell.get().await, Ok("quote"));
/// # }
/// ```
pub struct AsyncTtlCell<R: AsyncRefresh> {
    options: CellOptions,
    refresh: R,
    state: Mutex<CellState<R::Value>>,
}

impl<R> AsyncTtlCell<R>
where
    R: AsyncRefresh,
    R::Value: Clone,
{
    /// Creates a cell that serves `refresh`'s output for `ttl` after each success
    pub fn new(ttl: Duration, refresh: R) -> Self {
        TtlCellBuilder::new(ttl).build_async(refresh)
    }

    /// Creates a cell from a validated configuration, using the system clock
    pub fn from_config(config: &CellConfig, refresh: R) -> Result<Self, ConfigError> {
        Ok(TtlCellBuilder::from_config(config)?.build_async(refresh))
    }

    pub(crate) fn with_options(options: CellOptions, refresh: R) -> Self {
        Self {
            options,
            refresh,
            state: Mutex::new(CellState::new()),
        }
    }

    /// Returns the cached value, refreshing it first if it has expired
    ///
    /// Fails only when a refresh was needed and the producer failed; the error
    /// is the producer's, unchanged.
    pub async fn get(&self) -> Result<R::Value, R::Error> {
        let mut state = self.state.lock().await;
        let now = self.options.clock.now();

        if let Some(value) = state.fresh(now) {
            return Ok(value);
        }

        log_refresh(&self.options.name, self.options.ttl, state.expiration());
        let value = self
            .refresh
            .refresh()
            .instrument(spans::refresh(&self.options.name, self.options.ttl))
            .await?;

        Ok(state.store(value, now, self.options.ttl))
    }

    /// Instant the cached value expires, or `None` before the first successful refresh
    ///
    /// Waits for any refresh in progress. Never refreshes.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.expires_at()
    }

    /// The TTL this cell was built with
    pub fn ttl(&self) -> Duration {
        self.options.ttl
    }

    /// The label attached to this cell's refresh notices
    pub fn name(&self) -> &str {
        &self.options.name
    }
}

impl<R: AsyncRefresh> fmt::Debug for AsyncTtlCell<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncTtlCell")
            .field("name", &self.options.name)
            .field("ttl", &self.options.ttl)
            .field("clock", &self.options.clock)
            .finish_non_exhaustive()
    }
}
