//! Snapshot Generation
//!
//! Converts the live grid into serializable snapshot records and writes them as JSON.

use schelling_events::{generate_snapshot_id, AgentSnapshot, CellSnapshot, GridSnapshot};
use std::fs;
use std::io;
use std::path::Path;

use crate::simulation::Simulation;

/// Capture every node and its occupant
pub fn generate_snapshot(sim: &Simulation, label: &str) -> GridSnapshot {
    let cells = sim
        .cells()
        .map(|(node, agent)| CellSnapshot {
            node,
            agent: agent.map(|a| AgentSnapshot {
                agent_id: a.id,
                agent_type: a.agent_type,
                happy: a.happy,
            }),
        })
        .collect();

    GridSnapshot {
        snapshot_id: generate_snapshot_id(label, sim.move_count()),
        move_count: sim.move_count(),
        happy_count: sim.happy_count(),
        total_agents: sim.total_agent_count(),
        converged: sim.is_converged(),
        cells,
    }
}

/// Write a snapshot as pretty-printed JSON
pub fn write_snapshot(path: impl AsRef<Path>, snapshot: &GridSnapshot) -> io::Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)
}
