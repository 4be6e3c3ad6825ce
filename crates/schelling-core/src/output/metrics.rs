//! Segregation Metrics
//!
//! Full-scan measurements over the current grid. These ignore the incremental
//! counters entirely, which makes them the reference the tracker is tested against.

use crate::simulation::Simulation;
use crate::systems::evaluate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Agents whose similarity is below the threshold
    pub unhappy: usize,
    /// Mean same-type neighbor fraction over all agents (isolated agents count as 1.0)
    pub avg_same: f64,
}

impl Metrics {
    pub fn measure(sim: &Simulation) -> Self {
        let threshold = sim.threshold();
        let mut unhappy = 0usize;
        let mut sum = 0.0f64;
        for agent in sim.agents() {
            let similarity = evaluate(&sim.topology, &sim.grid, &sim.agents, agent);
            sum += similarity;
            if similarity < threshold {
                unhappy += 1;
            }
        }
        let count = sim.total_agent_count();
        Self {
            unhappy,
            avg_same: if count == 0 { 0.0 } else { sum / count as f64 },
        }
    }

    pub fn unhappy_fraction(&self, total_agents: usize) -> f64 {
        if total_agents == 0 {
            0.0
        } else {
            self.unhappy as f64 / total_agents as f64
        }
    }
}

/// Happy flag of every agent recomputed from scratch, indexed by agent id
pub fn oracle_flags(sim: &Simulation) -> Vec<bool> {
    let threshold = sim.threshold();
    sim.agents()
        .map(|agent| evaluate(&sim.topology, &sim.grid, &sim.agents, agent) >= threshold)
        .collect()
}
