//! Output Systems
//!
//! Metrics, grid snapshots and the move log.

pub mod metrics;
pub mod move_log;
pub mod snapshot;

pub use metrics::{oracle_flags, Metrics};
pub use move_log::MoveLogger;
pub use snapshot::{generate_snapshot, write_snapshot};
