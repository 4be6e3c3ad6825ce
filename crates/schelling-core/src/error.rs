//! Error Types
//!
//! Construction failures, topology validation and run-time invariant violations.

use thiserror::Error;

use crate::components::AgentId;
use crate::topology::NodeId;

/// Errors raised while building or stepping a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("density must be in (0, 1), got {0}")]
    InvalidDensity(f64),

    #[error("minority fraction must be in [0, 1], got {0}")]
    InvalidMinorityFraction(f64),

    #[error("homophily threshold must be in [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("topology has no nodes")]
    EmptyTopology,

    /// A move was needed but every node is occupied.
    #[error("no vacant node left to relocate agent {agent_id}")]
    VacanciesExhausted { agent_id: AgentId },

    /// The per-move hook given to `run_with` failed.
    #[error("failed to record move: {0}")]
    MoveLog(#[from] std::io::Error),
}

/// Errors raised while building a topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("node {node} lists neighbor {neighbor}, but the topology has {node_count} nodes")]
    NeighborOutOfRange {
        node: NodeId,
        neighbor: NodeId,
        node_count: usize,
    },

    #[error("node {0} lists itself as a neighbor")]
    SelfLoop(NodeId),

    #[error("node {node} lists neighbor {neighbor} more than once")]
    DuplicateNeighbor { node: NodeId, neighbor: NodeId },

    #[error("node {node} lists neighbor {neighbor}, but {neighbor} does not list {node}")]
    Asymmetric { node: NodeId, neighbor: NodeId },

    #[error("invalid {shape} parameters: {reason}")]
    InvalidShape { shape: &'static str, reason: String },

    #[error("failed to read adjacency file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse adjacency file: {0}")]
    Json(#[from] serde_json::Error),
}
