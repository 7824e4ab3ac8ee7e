//! Single-value TTL memoization cells.
//!
//! A cell wraps an expensive, fallible producer function and caches its last
//! successful result for a fixed time-to-live. Reads are lazy: the producer runs
//! only when a caller asks for the value after it has expired, and every read
//! holds the cell's lock for its full duration, so concurrent callers that hit
//! an expired value share a single refresh.
//!
//! - [`TtlCell`]: blocking cell for threaded code
//! - [`AsyncTtlCell`]: the same contract for async tasks, refreshing through a future
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use ttlcell::TtlCell;
//!
//! let cell = TtlCell::new(Duration::from_secs(30), || {
//!     Ok::<_, std::io::Error>(std::env::var("HOME").unwrap_or_default())
//! });
//!
//! // First read runs the producer, later reads inside the TTL reuse its result
//! let home = cell.get()?;
//! assert_eq!(cell.get()?, home);
//! # Ok::<(), std::io::Error>(())
//! ```

mod cell;
pub mod clock;
pub mod config;
mod errors;
mod refresh;
mod spans;

pub use cell::{AsyncTtlCell, TtlCell, TtlCellBuilder, EXPIRATION_FORMAT};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CellConfig, CellConfigBuilder};
pub use errors::ConfigError;
pub use refresh::{AsyncRefresh, Refresh};
