// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Lock-protected state shared by the blocking and async cells

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::clock::saturating_add;

/// `strftime` pattern used when reporting the expiration being replaced
pub const EXPIRATION_FORMAT: &str = "%b %e %H:%M:%S";

/// A cached value together with the instant it goes stale
#[derive(Debug, Clone)]
struct Cached<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

/// Everything a read may mutate, guarded as one unit by the owning cell's lock
#[derive(Debug)]
pub(crate) struct CellState<T> {
    cached: Option<Cached<T>>,
}

impl<T: Clone> CellState<T> {
    pub(crate) fn new() -> Self {
        Self { cached: None }
    }

    /// Returns the cached value unless `now` is strictly after its expiration
    pub(crate) fn fresh(&self, now: DateTime<Utc>) -> Option<T> {
        self.cached
            .as_ref()
            .filter(|cached| now <= cached.expires_at)
            .map(|cached| cached.value.clone())
    }

    /// Expiration of the current value, or the zero instant before the first refresh
    pub(crate) fn expiration(&self) -> DateTime<Utc> {
        self.expires_at().unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub(crate) fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.cached.as_ref().map(|cached| cached.expires_at)
    }

    /// Replaces value and expiration together after a successful refresh
    pub(crate) fn store(&mut self, value: T, refreshed_at: DateTime<Utc>, ttl: Duration) -> T {
        let returned = value.clone();
        self.cached = Some(Cached {
            value,
            expires_at: saturating_add(refreshed_at, ttl),
        });
        returned
    }
}

/// Emits the one notice logged per refresh attempt
pub(crate) fn log_refresh(cell: &str, ttl: Duration, expiration: DateTime<Utc>) {
    info!(
        cell = cell,
        ttl = ?ttl,
        expiration = %expiration.format(EXPIRATION_FORMAT),
        "Cache invalid, refreshing"
    );
}
