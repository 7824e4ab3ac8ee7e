// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::Duration;

use super::{AsyncTtlCell, CellOptions, TtlCell};
use crate::clock::Clock;
use crate::config::CellConfig;
use crate::errors::ConfigError;
use crate::refresh::{AsyncRefresh, Refresh};

/// Builder for [`TtlCell`] and [`AsyncTtlCell`]
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use ttlcell::TtlCellBuilder;
///
/// let cell = TtlCellBuilder::new(Duration::from_secs(10))
///     .name("exchange_rate")
///     .build(|| Ok::<f64, String>(1.08));
///
/// assert_eq!(cell.name(), "exchange_rate");
/// assert_eq!(cell.get(), Ok(1.08));
/// ```
#[derive(Debug, Clone)]
pub struct TtlCellBuilder {
    options: CellOptions,
}

impl TtlCellBuilder {
    /// Start a builder for a cell with the given TTL, the default name and the system clock
    pub fn new(ttl: Duration) -> Self {
        Self {
            options: CellOptions::new(ttl),
        }
    }

    /// Start a builder from a validated configuration
    pub fn from_config(config: &CellConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.ttl).name(config.name.clone()))
    }

    /// Set the label attached to refresh notices
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.options.name = name.into();
        self
    }

    /// Replace the wall clock used for expiry checks
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.options.clock = clock;
        self
    }

    /// Build a blocking cell around `refresh`
    pub fn build<R>(self, refresh: R) -> TtlCell<R>
    where
        R: Refresh,
        R::Value: Clone,
    {
        TtlCell::with_options(self.options, refresh)
    }

    /// Build an async cell around `refresh`
    pub fn build_async<R>(self, refresh: R) -> AsyncTtlCell<R>
    where
        R: AsyncRefresh,
        R::Value: Clone,
    {
        AsyncTtlCell::with_options(self.options, refresh)
    }
}
