//! Happiness Tracker
//!
//! Keeps every agent's happy flag, the global happy count and the unhappy set
//! consistent without rescanning the population. Callers recount only the agents
//! whose neighborhood occupancy changed.

use crate::components::{Agent, AgentId, AgentStore, OccupancyGrid};
use crate::index_set::IndexSet;
use crate::topology::Topology;

/// Fraction of occupied neighbors sharing `agent`'s type.
///
/// An agent with no occupied neighbors scores `1.0`.
pub fn evaluate(topology: &Topology, grid: &OccupancyGrid, agents: &AgentStore, agent: &Agent) -> f64 {
    let mut occupied = 0usize;
    let mut same = 0usize;
    for &node in topology.neighbors(agent.position) {
        if let Some(other) = grid.occupant(node) {
            occupied += 1;
            if agents.get(other).agent_type == agent.agent_type {
                same += 1;
            }
        }
    }
    if occupied == 0 {
        1.0
    } else {
        same as f64 / occupied as f64
    }
}

#[derive(Debug, Clone)]
pub struct HappinessTracker {
    threshold: f64,
    happy_count: usize,
    unhappy: IndexSet,
}

impl HappinessTracker {
    pub fn new(threshold: f64, agent_count: usize) -> Self {
        Self {
            threshold,
            happy_count: 0,
            unhappy: IndexSet::with_capacity(agent_count),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn happy_count(&self) -> usize {
        self.happy_count
    }

    pub fn unhappy(&self) -> &IndexSet {
        &self.unhappy
    }

    pub fn unhappy_count(&self) -> usize {
        self.unhappy.len()
    }

    fn verdict(&self, similarity: f64) -> bool {
        similarity >= self.threshold
    }

    /// First evaluation of a freshly placed agent. Call once per agent during setup.
    pub fn initial_count(
        &mut self,
        topology: &Topology,
        grid: &OccupancyGrid,
        agents: &mut AgentStore,
        id: AgentId,
    ) {
        let happy = self.verdict(evaluate(topology, grid, agents, agents.get(id)));
        agents.get_mut(id).happy = happy;
        if happy {
            self.happy_count += 1;
        } else {
            self.unhappy.insert(id);
        }
    }

    /// Re-evaluate `id` against current occupancy. Returns true if its flag flipped.
    ///
    /// An unchanged verdict leaves every counter untouched, so recounting the same
    /// agent several times within one move is harmless.
    pub fn recount(
        &mut self,
        topology: &Topology,
        grid: &OccupancyGrid,
        agents: &mut AgentStore,
        id: AgentId,
    ) -> bool {
        let happy = self.verdict(evaluate(topology, grid, agents, agents.get(id)));
        let agent = agents.get_mut(id);
        if agent.happy == happy {
            return false;
        }

        agent.happy = happy;
        if happy {
            self.happy_count += 1;
            self.unhappy.remove(id);
        } else {
            self.happy_count -= 1;
            self.unhappy.insert(id);
        }
        true
    }

    /// Recount every agent sitting on a neighbor of `node`
    pub fn recount_around(
        &mut self,
        topology: &Topology,
        grid: &OccupancyGrid,
        agents: &mut AgentStore,
        node: usize,
    ) {
        for &neighbor in topology.neighbors(node) {
            if let Some(id) = grid.occupant(neighbor) {
                self.recount(topology, grid, agents, id);
            }
        }
    }
}
