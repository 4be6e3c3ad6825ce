//! Agent Types
//!
//! The two populations of the model.

use serde::{Deserialize, Serialize};

/// Which of the two populations an agent belongs to.
///
/// Minority agents are type `0` and are placed first during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    Minority,
    Majority,
}
