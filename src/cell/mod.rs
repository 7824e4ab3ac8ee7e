//! TTL cells
//!
//! Both cells follow the same read protocol:
//!
//! 1. Take the cell's lock for the whole read
//! 2. Serve the cached value if the clock has not passed its expiration
//! 3. Otherwise log a refresh notice and run the producer
//! 4. On success store the value with `expiration = now + ttl`; on failure
//!    return the producer's error and leave the previous state in place
//!
//! [`TtlCell`] blocks the calling thread; [`AsyncTtlCell`] awaits.

use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::constants::DEFAULT_CELL_NAME;

mod async_cell;
mod blocking;
mod builder;
mod state;

pub use async_cell::AsyncTtlCell;
pub use blocking::TtlCell;
pub use builder::TtlCellBuilder;
pub use state::EXPIRATION_FORMAT;

/// Construction-time settings, immutable for the life of a cell
#[derive(Debug, Clone)]
pub(crate) struct CellOptions {
    pub(crate) name: String,
    pub(crate) ttl: Duration,
    pub(crate) clock: Arc<dyn Clock>,
}

impl CellOptions {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            name: DEFAULT_CELL_NAME.to_string(),
            ttl,
            clock: Arc::new(SystemClock),
        }
    }
}
