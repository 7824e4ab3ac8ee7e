//! Error types for the ttlcell library.
//!
//! Cells never define an error of their own for reads: [`crate::TtlCell::get`]
//! and [`crate::AsyncTtlCell::get`] return the refresh function's error exactly
//! as produced. The only crate-defined failures come from configuration:
//!
//! - [`ConfigError`] - a [`crate::CellConfig`] that cannot back a cell
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use ttlcell::{ConfigError, CellConfigBuilder, TtlCell};
//!
//! let config = CellConfigBuilder::new().name("  ").ttl(Duration::from_secs(1)).build();
//!
//! match TtlCell::from_config(&config, || Ok::<_, String>(1)) {
//!     Err(ConfigError::EmptyName) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

mod config;

pub use config::ConfigError;
