//! Move Records
//!
//! One relocation of an unhappy agent.

use serde::{Deserialize, Serialize};

/// A single executed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based move number within the run
    pub sequence: u64,
    pub agent_id: usize,
    /// Node the agent left
    pub from: usize,
    /// Node the agent moved to
    pub to: usize,
}

impl MoveRecord {
    pub fn new(sequence: u64, agent_id: usize, from: usize, to: usize) -> Self {
        Self {
            sequence,
            agent_id,
            from,
            to,
        }
    }

    /// The `(agent, destination)` pair that identifies a move for replay comparison
    pub fn key(&self) -> (usize, usize) {
        (self.agent_id, self.to)
    }
}
