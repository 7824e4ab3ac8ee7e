// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Blocking TTL cell

use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::state::{log_refresh, CellState};
use super::{CellOptions, TtlCellBuilder};
use crate::config::CellConfig;
use crate::errors::ConfigError;
use crate::refresh::Refresh;
use crate::spans;

/// Caches the last successful result of a blocking producer for a fixed TTL
///
/// The producer runs lazily: never at construction, and afterwards only when
/// [`get`](Self::get) finds the cached value expired. Each `get` holds the
/// cell's mutex for its whole duration, including the producer call, so a
/// cell shared between threads runs at most one refresh at a time and every
/// caller waiting behind it sees its result.
///
/// A failed refresh leaves the previous value and expiration in place, so the
/// next `get` tries again.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
/// use std::time::Duration;
/// use ttlcell::TtlCell;
///
/// let cell = Arc::new(TtlCell::new(Duration::from_secs(60), || {
///     Ok::<_, String>(Arc::new(vec![1, 2, 3]))
/// }));
///
/// let worker = {
///     let cell = Arc::clone(&cell);
///     thread::spawn(move || cell.get().map(|v| v.len()))
/// };
/// assert_eq!(worker.join().unwrap(), Ok(3));
/// ```
pub struct TtlCell<R: Refresh> {
    options: CellOptions,
    refresh: R,
    state: Mutex<CellState<R::Value>>,
}

impl<R> TtlCell<R>
where
    R: Refresh,
    R::Value: Clone,
{
    /// Creates a cell that serves `refresh`'s output for `ttl` after each success
    ///
    /// A zero TTL serves a value only for reads at the exact instant it was refreshed.
    pub fn new(ttl: Duration, refresh: R) -> Self {
        TtlCellBuilder::new(ttl).build(refresh)
    }

    /// Creates a cell from a validated configuration, using the system clock
    pub fn from_config(config: &CellConfig, refresh: R) -> Result<Self, ConfigError> {
        Ok(TtlCellBuilder::from_config(config)?.build(refresh))
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
    pub fn get(&self) -> Result<R::Value, R::Error> {
        let mut state = self.lock_state();
        let now = self.options.clock.now();

        if let Some(value) = state.fresh(now) {
            return Ok(value);
        }

        log_refresh(&self.options.name, self.options.ttl, state.expiration());
        let value = spans::refresh(&self.options.name, self.options.ttl)
            .in_scope(|| self.refresh.refresh())?;

        Ok(state.store(value, now, self.options.ttl))
    }

    /// Instant the cached value expires, or `None` before the first successful refresh
    ///
    /// Waits for any refresh in progress. Never refreshes.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.lock_state().expires_at()
    }

    /// The TTL this cell was built with
    pub fn ttl(&self) -> Duration {
        self.options.ttl
    }

    /// The label attached to this cell's refresh notices
    pub fn name(&self) -> &str {
        &self.options.name
    }

    // State is written only after a successful refresh, so a guard poisoned by a
    // panicking producer still holds a consistent value and expiration.
    fn lock_state(&self) -> std::sync::MutexGuard<'_, CellState<R::Value>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Refresh> fmt::Debug for TtlCell<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCell")
            .field("name", &self.options.name)
            .field("ttl", &self.options.ttl)
            .field("clock", &self.options.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use chrono::TimeDelta;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn manual_cell<R>(ttl: Duration, refresh: R) -> (TtlCell<R>, ManualClock)
    where
        R: Refresh,
        R::Value: Clone,
    {
        let clock = ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        let cell = TtlCellBuilder::new(ttl)
            .clock(Arc::new(clock.clone()))
            .build(refresh);
        (cell, clock)
    }

    #[test]
    fn test_construction_does_not_refresh() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let (cell, _clock) = manual_cell(Duration::from_secs(1), move || {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(())
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(cell.expires_at(), None);
    }

    #[test]
    fn test_expiration_is_refresh_start_plus_ttl() {
        let (cell, clock) = manual_cell(Duration::from_millis(100), || Ok::<_, ()>(1));
        let refreshed_at = clock.now();

        cell.get().unwrap();

        assert_eq!(
            cell.expires_at(),
            Some(refreshed_at + TimeDelta::milliseconds(100))
        );
    }

    #[test]
    fn test_failed_refresh_keeps_previous_expiration() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let (cell, clock) = manual_cell(Duration::from_millis(100), move || {
            match counted.fetch_add(1, Ordering::SeqCst) {
                0 => Ok("first"),
                _ => Err("unavailable"),
            }
        });

        assert_eq!(cell.get(), Ok("first"));
        let expiration = cell.expires_at();

        clock.advance(Duration::from_millis(150));
        assert_eq!(cell.get(), Err("unavailable"));
        assert_eq!(cell.expires_at(), expiration);

        // Still expired, so the next read retries
        assert_eq!(cell.get(), Err("unavailable"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_zero_ttl_refreshes_whenever_clock_moves() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let (cell, clock) = manual_cell(Duration::ZERO, move || {
            Ok::<_, ()>(counted.fetch_add(1, Ordering::SeqCst) + 1)
        });

        assert_eq!(cell.get(), Ok(1));
        assert_eq!(cell.get(), Ok(1));
        clock.advance(Duration::from_nanos(1));
        assert_eq!(cell.get(), Ok(2));
    }

    #[test]
    fn test_clock_going_backwards_serves_cached_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let (cell, clock) = manual_cell(Duration::from_secs(1), move || {
            Ok::<_, ()>(counted.fetch_add(1, Ordering::SeqCst) + 1)
        });

        cell.get().unwrap();
        clock.set(clock.now() - TimeDelta::hours(1));

        assert_eq!(cell.get(), Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_refresh_does_not_wedge_cell() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let (cell, _clock) = manual_cell(Duration::from_secs(1), move || {
            if counted.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("producer blew up");
            }
            Ok::<_, ()>("recovered")
        });

        let panicked = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| cell.get()));
        assert!(panicked.is_err());

        assert_eq!(cell.expires_at(), None);
        assert_eq!(cell.get(), Ok("recovered"));
    }

    #[test]
    fn test_debug_omits_value() {
        let (cell, _clock) = manual_cell(Duration::from_secs(1), || Ok::<_, ()>("secret"));
        cell.get().unwrap();

        let debug = format!("{cell:?}");
        assert!(debug.contains("ttl_cell"));
        assert!(!debug.contains("secret"));
    }
}
