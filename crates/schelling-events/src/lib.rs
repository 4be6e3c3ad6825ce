//! Shared record types and serialization for the segregation simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine in `schelling-core` produces them; reporting tools consume them.

pub mod agent_type;
pub mod moves;
pub mod snapshot;
pub mod summary;

pub use agent_type::AgentType;
pub use moves::MoveRecord;
pub use snapshot::{generate_snapshot_id, AgentSnapshot, CellSnapshot, GridSnapshot};
pub use summary::RunSummary;
