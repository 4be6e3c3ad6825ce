//! Simulation Systems
//!
//! Happiness bookkeeping and the move engine that drives it.

pub mod happiness;
pub mod movement;

pub use happiness::{evaluate, HappinessTracker};
