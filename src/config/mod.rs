//! Configuration for TTL cells
//!
//! A [`CellConfig`] carries the settings a cell needs besides its refresh
//! function. It can be built in code or deserialized alongside the rest of an
//! application's settings.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use ttlcell::CellConfig;
//! use std::time::Duration;
//!
//! let config = CellConfig::default();
//! assert_eq!(config.ttl, Duration::from_secs(60));
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use ttlcell::CellConfigBuilder;
//! use std::time::Duration;
//!
//! let config = CellConfigBuilder::new()
//!     .name("fx_rates")
//!     .ttl(Duration::from_millis(1500))
//!     .build();
//! assert!(config.validate().is_ok());
//! ```
//!
//! # Example: Deserializing
//!
//! The TTL is written in whole milliseconds under `ttl_ms`; `name` is optional.
//!
//! ```rust
//! use ttlcell::CellConfig;
//! use std::time::Duration;
//!
//! let config: CellConfig = serde_json::from_str(r#"{ "name": "fx_rates", "ttl_ms": 250 }"#).unwrap();
//! assert_eq!(config.ttl, Duration::from_millis(250));
//! ```

use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub mod constants;

use constants::{DEFAULT_CELL_NAME, DEFAULT_TTL};

/// Settings for a single TTL cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellConfig {
    /// Label attached to this cell's refresh notices
    /// Default: `"ttl_cell"`
    #[serde(default = "default_name")]
    pub name: String,

    /// How long a refreshed value is served before the next read refreshes it
    /// Default: 60 seconds
    #[serde(rename = "ttl_ms", with = "ttl_millis")]
    pub ttl: Duration,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            ttl: DEFAULT_TTL,
        }
    }
}

impl CellConfig {
    /// Checks that this configuration can back a cell
    ///
    /// A zero TTL is valid. A TTL too large to add to a wall-clock instant is not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if TimeDelta::from_std(self.ttl).is_err() {
            return Err(ConfigError::ttl_out_of_range(self.ttl));
        }
        Ok(())
    }
}

fn default_name() -> String {
    DEFAULT_CELL_NAME.to_string()
}

/// Builder for [`CellConfig`]
///
/// Starts from [`CellConfig::default`].
///
/// # Example
///
/// ```rust
/// use ttlcell::CellConfigBuilder;
/// use std::time::Duration;
///
/// let config = CellConfigBuilder::new().ttl(Duration::from_secs(5)).build();
/// assert_eq!(config.name, "ttl_cell");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CellConfigBuilder {
    config: CellConfig,
}

impl CellConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell name used in diagnostics
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the time-to-live of refreshed values
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.config.ttl = ttl;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CellConfig {
        self.config
    }
}

mod ttl_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
