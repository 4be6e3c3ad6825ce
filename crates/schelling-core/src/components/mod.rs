//! Simulation Components
//!
//! Agents and the occupancy grid they live on.

pub mod agent;
pub mod occupancy;

pub use agent::*;
pub use occupancy::*;
