//! Snapshot Types
//!
//! Serialization structs for the occupancy of every node at a point in time,
//! used by external reporting and visualization tools.

use serde::{Deserialize, Serialize};

use crate::AgentType;

/// Generates a snapshot ID from a label and the move count it was taken at.
pub fn generate_snapshot_id(label: &str, move_count: u64) -> String {
    format!("{}_{:09}", label, move_count)
}

/// The agent occupying a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: usize,
    pub agent_type: AgentType,
    pub happy: bool,
}

/// One node and its occupant, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub node: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentSnapshot>,
}

/// Full grid state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub snapshot_id: String,
    pub move_count: u64,
    pub happy_count: usize,
    pub total_agents: usize,
    pub converged: bool,
    pub cells: Vec<CellSnapshot>,
}

impl GridSnapshot {
    /// Number of cells holding an agent
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.agent.is_some()).count()
    }

    /// Number of agents of the given type
    pub fn count_of(&self, agent_type: AgentType) -> usize {
        self.cells
            .iter()
            .filter_map(|c| c.agent.as_ref())
            .filter(|a| a.agent_type == agent_type)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_id_format() {
        assert_eq!(generate_snapshot_id("final", 42), "final_000000042");
    }

    #[test]
    fn test_empty_cells_omit_agent() {
        let snapshot = GridSnapshot {
            snapshot_id: generate_snapshot_id("start", 0),
            move_count: 0,
            happy_count: 1,
            total_agents: 1,
            converged: true,
            cells: vec![
                CellSnapshot { node: 0, agent: None },
                CellSnapshot {
                    node: 1,
                    agent: Some(AgentSnapshot {
                        agent_id: 0,
                        agent_type: AgentType::Majority,
                        happy: true,
                    }),
                },
            ],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains(r#"{"node":0}"#));
        assert_eq!(snapshot.occupied(), 1);
        assert_eq!(snapshot.count_of(AgentType::Majority), 1);
        assert_eq!(snapshot.count_of(AgentType::Minority), 0);

        let parsed: GridSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.cells, snapshot.cells);
    }
}
