//! Schelling segregation on arbitrary graphs.
//!
//! Agents of two types occupy the nodes of a fixed topology and relocate to a
//! random vacancy while unhappy with the mix of their occupied neighbors. Happiness
//! is maintained incrementally: each move recounts only the mover and the agents
//! around the two nodes it touched.
//!
//! # Modules
//!
//! - [`topology`]: immutable adjacency and the fixed shapes used by the driver
//! - [`components`]: agents and the occupancy grid
//! - [`systems`]: the happiness tracker and the move engine
//! - [`simulation`]: setup, stepping and the bounded run loop
//! - [`output`]: metrics, snapshots and the move log
//! - [`config`]: TOML configuration

pub mod components;
pub mod config;
pub mod error;
pub mod index_set;
pub mod output;
pub mod simulation;
pub mod systems;
pub mod topology;

pub use components::{Agent, AgentId, AgentType};
pub use config::{Config, ConfigError, RunConfig, SimParams, TopologyConfig};
pub use error::{SimError, TopologyError};
pub use simulation::{Phase, ProgressOptions, RunReport, Simulation};
pub use topology::{NodeId, Topology};

pub use schelling_events::{GridSnapshot, MoveRecord, RunSummary};
