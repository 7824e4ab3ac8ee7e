// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Wall-clock sources for expiry checks
//!
//! Cells read the current instant through a [`Clock`] so that expiry can be
//! driven deterministically in tests:
//!
//! - [`SystemClock`]: the real wall clock (default)
//! - [`ManualClock`]: a clock that only moves when told to
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use ttlcell::{ManualClock, TtlCellBuilder};
//!
//! let clock = ManualClock::default();
//! let cell = TtlCellBuilder::new(Duration::from_secs(5))
//!     .clock(Arc::new(clock.clone()))
//!     .build(|| Ok::<_, String>(42));
//!
//! assert_eq!(cell.get(), Ok(42));
//! clock.advance(Duration::from_secs(6));
//! assert_eq!(cell.get(), Ok(42));
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current wall-clock instant
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns the current instant
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that stands still until advanced
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and give another to the cell under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward by `by`, saturating at the end of the representable range
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = saturating_add(*now, by);
    }

    /// Jumps the clock to `instant`, which may be in the past
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Adds a std duration to an instant, clamping to [`DateTime::<Utc>::MAX_UTC`] on overflow
pub(crate) fn saturating_add(instant: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(by)
        .ok()
        .and_then(|delta| instant.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
