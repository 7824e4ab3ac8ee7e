//! Error types for cell configuration.

use std::time::Duration;

/// Errors that can occur when validating a [`crate::CellConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The cell name is empty or only whitespace.
    #[error("Cell name must not be empty")]
    EmptyName,

    /// The TTL is too large to add to a wall-clock instant.
    #[error("TTL of {ttl:?} exceeds the representable time range")]
    TtlOutOfRange {
        /// The rejected TTL
        ttl: Duration,
    },
}

impl ConfigError {
    /// Create a `TtlOutOfRange` error for `ttl`.
    pub(crate) fn ttl_out_of_range(ttl: Duration) -> Self {
        ConfigError::TtlOutOfRange { ttl }
    }
}
