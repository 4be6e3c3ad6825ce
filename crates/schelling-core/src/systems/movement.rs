//! Move Engine
//!
//! Relocates one unhappy agent to a random vacant node and recounts exactly the
//! agents whose neighborhoods changed: the mover, the occupants around the node
//! it left and the occupants around the node it entered.

use schelling_events::MoveRecord;

use crate::error::SimError;
use crate::simulation::Simulation;

impl Simulation {
    /// Execute one relocation and restore every counter before returning.
    ///
    /// Returns `Ok(None)` without touching state when no agent is unhappy.
    pub fn execute_one_move(&mut self) -> Result<Option<MoveRecord>, SimError> {
        let Some(agent_id) = self.tracker.unhappy().choose(&mut self.rng) else {
            return Ok(None);
        };
        let from = self.agents.get(agent_id).position;

        // `from` is still occupied here, so the mover never lands where it stands
        let Some(to) = self.grid.vacancies().choose(&mut self.rng) else {
            return Err(SimError::VacanciesExhausted { agent_id });
        };

        let moved = self.grid.relocate(from, to);
        debug_assert_eq!(moved, agent_id);
        self.agents.get_mut(agent_id).position = to;
        self.move_count += 1;

        let topology = &*self.topology;
        self.tracker
            .recount(topology, &self.grid, &mut self.agents, agent_id);
        self.tracker
            .recount_around(topology, &self.grid, &mut self.agents, from);
        self.tracker
            .recount_around(topology, &self.grid, &mut self.agents, to);

        let record = MoveRecord::new(self.move_count, agent_id, from, to);
        tracing::trace!(
            sequence = record.sequence,
            agent = agent_id,
            from,
            to,
            happy = self.tracker.happy_count(),
            "agent relocated"
        );
        self.last_move = Some(record);
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use crate::config::SimParams;
    use crate::output::metrics::oracle_flags;
    use crate::simulation::Simulation;
    use crate::topology::Topology;

    fn params(seed: u64) -> SimParams {
        SimParams {
            density: 0.6,
            minority_fraction: 0.4,
            homophily_threshold: 0.6,
            seed,
        }
    }

    #[test]
    fn test_move_updates_both_lookup_tables() {
        let topology = Arc::new(Topology::torus(6, 6).unwrap());
        let mut sim = Simulation::new(topology, &params(3)).unwrap();
        if sim.is_converged() {
            return;
        }

        let record = sim.execute_one_move().unwrap().unwrap();
        assert_eq!(record.sequence, 1);
        assert_eq!(sim.move_count(), 1);
        assert_ne!(record.from, record.to);
        assert_eq!(sim.agent(record.agent_id).position, record.to);
        assert_eq!(sim.grid.occupant(record.to), Some(record.agent_id));
        assert!(sim.grid.is_vacant(record.from));
        assert!(sim.grid.vacancies().contains(record.from));
        assert_eq!(sim.last_move(), Some(record));
    }

    #[test]
    fn test_flags_change_only_near_the_move() {
        let topology = Arc::new(Topology::torus(8, 8).unwrap());
        let mut sim = Simulation::new(Arc::clone(&topology), &params(11)).unwrap();

        for _ in 0..200 {
            if sim.is_converged() {
                break;
            }
            let before: Vec<bool> = sim.agents().map(|a| a.happy).collect();
            let record = sim.execute_one_move().unwrap().unwrap();

            let mut affected: HashSet<usize> = HashSet::new();
            affected.insert(record.agent_id);
            for &node in topology
                .neighbors(record.from)
                .iter()
                .chain(topology.neighbors(record.to))
            {
                if let Some(id) = sim.grid.occupant(node) {
                    affected.insert(id);
                }
            }

            for agent in sim.agents() {
                if before[agent.id] != agent.happy {
                    assert!(
                        affected.contains(&agent.id),
                        "agent {} flipped without being near move {:?}",
                        agent.id,
                        record
                    );
                }
            }
            assert_eq!(
                sim.agents().map(|a| a.happy).collect::<Vec<_>>(),
                oracle_flags(&sim)
            );
            assert_eq!(
                sim.happy_count() + sim.unhappy_count(),
                sim.total_agent_count()
            );
            if sim.happy_count() == sim.total_agent_count() {
                break;
            }
        }
    }

    #[test]
    fn test_no_move_when_everyone_is_happy() {
        let topology = Arc::new(Topology::path(10));
        let mut sim = Simulation::new(
            topology,
            &SimParams {
                homophily_threshold: 0.0,
                ..params(5)
            },
        )
        .unwrap();
        assert_eq!(sim.execute_one_move().unwrap(), None);
        assert_eq!(sim.move_count(), 0);
    }
}
