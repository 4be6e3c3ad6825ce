//! Agent Components
//!
//! Agents and the store that owns them for the length of a run.

use serde::{Deserialize, Serialize};

pub use schelling_events::AgentType;

use crate::topology::NodeId;

/// Dense agent index in `0..total_agent_count`
pub type AgentId = usize;

/// A single resident
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub agent_type: AgentType,
    /// Node the agent currently occupies. Kept in step with the occupancy grid.
    pub position: NodeId,
    pub happy: bool,
}

impl Agent {
    pub fn new(id: AgentId, agent_type: AgentType, position: NodeId) -> Self {
        Self {
            id,
            agent_type,
            position,
            happy: false,
        }
    }
}

/// All agents of a run, indexed by id. The population never changes size after setup.
#[derive(Debug, Clone, Default)]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            agents: Vec::with_capacity(capacity),
        }
    }

    /// Add an agent with the next free id
    pub fn spawn(&mut self, agent_type: AgentType, position: NodeId) -> AgentId {
        let id = self.agents.len();
        self.agents.push(Agent::new(id, agent_type, position));
        id
    }

    /// Panics if `id` was never spawned.
    pub fn get(&self, id: AgentId) -> &Agent {
        &self.agents[id]
    }

    pub fn get_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id]
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn count_of(&self, agent_type: AgentType) -> usize {
        self.agents
            .iter()
            .filter(|a| a.agent_type == agent_type)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_assigns_dense_ids() {
        let mut store = AgentStore::with_capacity(2);
        let a = store.spawn(AgentType::Minority, 4);
        let b = store.spawn(AgentType::Majority, 1);
        assert_eq!((a, b), (0, 1));
        assert_eq!(store.get(b).position, 1);
        assert!(!store.get(a).happy);
        assert_eq!(store.count_of(AgentType::Minority), 1);
    }
}
