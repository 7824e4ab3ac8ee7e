//! Default configuration values

use std::time::Duration;

/// Name given to cells that are not explicitly labelled
pub const DEFAULT_CELL_NAME: &str = "ttl_cell";

/// TTL used by [`crate::CellConfig::default`]
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);
