//! Occupancy Grid
//!
//! Single-occupancy slot per node plus the set of vacant nodes.
//! A node is in the vacancy set iff its slot holds no agent.

use crate::components::AgentId;
use crate::index_set::IndexSet;
use crate::topology::NodeId;

#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    slots: Vec<Option<AgentId>>,
    vacancies: IndexSet,
}

impl OccupancyGrid {
    /// All nodes start vacant, in ascending order
    pub fn new(node_count: usize) -> Self {
        Self {
            slots: vec![None; node_count],
            vacancies: IndexSet::full(node_count),
        }
    }

    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    pub fn occupant(&self, node: NodeId) -> Option<AgentId> {
        self.slots[node]
    }

    pub fn is_vacant(&self, node: NodeId) -> bool {
        self.slots[node].is_none()
    }

    pub fn vacancies(&self) -> &IndexSet {
        &self.vacancies
    }

    pub fn vacancy_count(&self) -> usize {
        self.vacancies.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.len() - self.vacancies.len()
    }

    /// Put `agent` on a vacant node. Panics if the node is occupied.
    pub fn place(&mut self, node: NodeId, agent: AgentId) {
        assert!(
            self.slots[node].is_none(),
            "node {node} already holds agent {:?}",
            self.slots[node]
        );
        self.slots[node] = Some(agent);
        self.vacancies.remove(node);
    }

    /// Move the occupant of `from` onto the vacant node `to`, returning the agent.
    ///
    /// Panics if `from` is vacant or `to` is occupied.
    pub fn relocate(&mut self, from: NodeId, to: NodeId) -> AgentId {
        let agent = self.slots[from]
            .take()
            .unwrap_or_else(|| panic!("relocate from vacant node {from}"));
        self.vacancies.insert(from);
        self.place(to, agent);
        agent
    }

    /// `(node, occupant)` for every node, in node order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Option<AgentId>)> + '_ {
        self.slots.iter().copied().enumerate()
    }
}
