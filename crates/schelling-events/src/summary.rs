//! Run Summary
//!
//! Parameters and outcome of a single run, one JSON object per run.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub node_count: usize,
    pub total_agents: usize,
    pub minority_agents: usize,
    pub density: f64,
    pub minority_fraction: f64,
    pub homophily_threshold: f64,
    pub moves: u64,
    pub converged: bool,
    pub initial_unhappy: usize,
    pub final_unhappy: usize,
    /// Average same-type neighbor fraction before the first move
    pub initial_avg_same: f64,
    pub final_avg_same: f64,
    pub elapsed_secs: f64,
}

impl RunSummary {
    /// Fraction of agents unhappy at the end of the run
    pub fn final_unhappy_fraction(&self) -> f64 {
        if self.total_agents == 0 {
            0.0
        } else {
            self.final_unhappy as f64 / self.total_agents as f64
        }
    }
}
