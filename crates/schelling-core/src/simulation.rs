//! Simulation Driver
//!
//! Owns every piece of mutable state for one run: the occupancy grid, the agent
//! store, the happiness tracker, the move counter and the seeded generator.
//! Independent instances share nothing but the read-only topology.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use schelling_events::MoveRecord;

use crate::components::{Agent, AgentId, AgentStore, AgentType, OccupancyGrid};
use crate::config::SimParams;
use crate::error::SimError;
use crate::systems::HappinessTracker;
use crate::topology::{NodeId, Topology};

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Every agent is happy. Terminal.
    Converged,
}

/// Progress reporting for [`Simulation::run`]
#[derive(Debug, Clone)]
pub struct ProgressOptions {
    pub enabled: bool,
    /// Log every N moves (0 = disabled)
    pub report_every_moves: u64,
    /// Or every T milliseconds (0 = disabled)
    pub report_every_ms: u64,
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            report_every_moves: 10_000,
            report_every_ms: 1_000,
        }
    }
}

impl ProgressOptions {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Outcome of a bounded run. Running out of budget is a result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Moves made during this call
    pub moves: u64,
    pub converged: bool,
    pub final_unhappy: usize,
    pub elapsed_secs: f64,
}

#[derive(Debug)]
pub struct Simulation {
    pub(crate) topology: Arc<Topology>,
    pub(crate) grid: OccupancyGrid,
    pub(crate) agents: AgentStore,
    pub(crate) tracker: HappinessTracker,
    pub(crate) rng: SmallRng,
    pub(crate) move_count: u64,
    pub(crate) phase: Phase,
    pub(crate) last_move: Option<MoveRecord>,
    params: SimParams,
}

impl Simulation {
    /// Validate parameters, place the population and count initial happiness.
    pub fn new(topology: Arc<Topology>, params: &SimParams) -> Result<Self, SimError> {
        params.validate()?;
        if topology.is_empty() {
            return Err(SimError::EmptyTopology);
        }

        let node_count = topology.node_count();
        let total = (params.density * node_count as f64).round() as usize;
        let minority = (total as f64 * params.minority_fraction).round() as usize;

        let mut rng = SmallRng::seed_from_u64(params.seed);
        let mut grid = OccupancyGrid::new(node_count);
        let mut agents = AgentStore::with_capacity(total);

        // Minority first, then majority, each on a uniformly chosen vacancy
        for index in 0..total {
            let agent_type = if index < minority {
                AgentType::Minority
            } else {
                AgentType::Majority
            };
            let Some(node) = grid.vacancies().choose(&mut rng) else {
                return Err(SimError::VacanciesExhausted { agent_id: index });
            };
            let id = agents.spawn(agent_type, node);
            grid.place(node, id);
        }

        let mut tracker = HappinessTracker::new(params.homophily_threshold, total);
        let mut order: Vec<AgentId> = (0..total).collect();
        order.shuffle(&mut rng);
        for id in order {
            tracker.initial_count(&topology, &grid, &mut agents, id);
        }

        // A saturated grid can only be accepted if nobody ever needs to move
        if grid.vacancy_count() == 0 && tracker.happy_count() < total {
            if let Some(agent_id) = tracker.unhappy().iter().next() {
                return Err(SimError::VacanciesExhausted { agent_id });
            }
        }

        let phase = if tracker.happy_count() == total {
            Phase::Converged
        } else {
            Phase::Running
        };

        tracing::debug!(
            nodes = node_count,
            agents = total,
            minority,
            happy = tracker.happy_count(),
            seed = params.seed,
            "simulation initialized"
        );

        Ok(Self {
            topology,
            grid,
            agents,
            tracker,
            rng,
            move_count: 0,
            phase,
            last_move: None,
            params: params.clone(),
        })
    }

    /// Make one move. Returns whether the simulation is converged afterwards.
    ///
    /// Once converged, further calls do nothing.
    pub fn step(&mut self) -> Result<bool, SimError> {
        if self.phase == Phase::Converged {
            return Ok(true);
        }

        self.execute_one_move()?;

        if self.tracker.happy_count() == self.agents.len() {
            self.phase = Phase::Converged;
            tracing::debug!(moves = self.move_count, "converged");
        }
        Ok(self.is_converged())
    }

    /// Step until converged or `max_moves` moves have been made by this call
    /// (`0` means no limit).
    pub fn run(
        &mut self,
        max_moves: u64,
        progress: &ProgressOptions,
    ) -> Result<RunReport, SimError> {
        self.run_with(max_moves, progress, |_| Ok(()))
    }

    /// Same as [`Simulation::run`], handing every move to `on_move` as it is made.
    pub fn run_with<F>(
        &mut self,
        max_moves: u64,
        progress: &ProgressOptions,
        mut on_move: F,
    ) -> Result<RunReport, SimError>
    where
        F: FnMut(&MoveRecord) -> io::Result<()>,
    {
        let started = Instant::now();
        let mut last_report = started;
        let mut moves = 0u64;

        while !self.is_converged() && (max_moves == 0 || moves < max_moves) {
            self.step()?;
            moves += 1;
            if let Some(record) = &self.last_move {
                on_move(record)?;
            }

            if progress.enabled {
                let due_moves =
                    progress.report_every_moves > 0 && moves % progress.report_every_moves == 0;
                let due_time = progress.report_every_ms > 0
                    && last_report.elapsed().as_millis() >= u128::from(progress.report_every_ms);
                if due_moves || due_time {
                    last_report = Instant::now();
                    self.log_progress(moves, max_moves, started);
                }
            }
        }

        let report = RunReport {
            moves,
            converged: self.is_converged(),
            final_unhappy: self.tracker.unhappy_count(),
            elapsed_secs: started.elapsed().as_secs_f64(),
        };
        if !report.converged {
            tracing::info!(
                moves,
                unhappy = report.final_unhappy,
                "did not converge within move budget"
            );
        }
        Ok(report)
    }

    fn log_progress(&self, moves: u64, max_moves: u64, started: Instant) {
        let elapsed = started.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 { moves as f64 / elapsed } else { 0.0 };
        let budget_pct = if max_moves > 0 {
            100.0 * moves as f64 / max_moves as f64
        } else {
            0.0
        };
        let total = self.agents.len().max(1);
        let unhappy_pct = 100.0 * self.tracker.unhappy_count() as f64 / total as f64;
        tracing::info!(
            moves = self.move_count,
            budget_pct,
            unhappy = self.tracker.unhappy_count(),
            unhappy_pct,
            moves_per_sec = rate,
            "progress"
        );
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_converged(&self) -> bool {
        self.phase == Phase::Converged
    }

    pub fn move_count(&self) -> u64 {
        self.move_count
    }

    pub fn happy_count(&self) -> usize {
        self.tracker.happy_count()
    }

    pub fn unhappy_count(&self) -> usize {
        self.tracker.unhappy_count()
    }

    pub fn total_agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn minority_count(&self) -> usize {
        self.agents.count_of(AgentType::Minority)
    }

    pub fn threshold(&self) -> f64 {
        self.tracker.threshold()
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The most recent move, if any
    pub fn last_move(&self) -> Option<MoveRecord> {
        self.last_move
    }

    pub fn vacancy_count(&self) -> usize {
        self.grid.vacancy_count()
    }

    pub fn occupied_count(&self) -> usize {
        self.grid.occupied_count()
    }

    /// Panics if `id` is not a valid agent id.
    pub fn agent(&self, id: AgentId) -> &Agent {
        self.agents.get(id)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Agent currently on `node`, if any
    pub fn occupant(&self, node: NodeId) -> Option<&Agent> {
        self.grid.occupant(node).map(|id| self.agents.get(id))
    }

    /// `(node, occupant)` for every node, in node order
    pub fn cells(&self) -> impl Iterator<Item = (NodeId, Option<&Agent>)> + '_ {
        self.grid
            .iter()
            .map(|(node, id)| (node, id.map(|id| self.agents.get(id))))
    }
}
