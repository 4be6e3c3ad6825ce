//! Configuration System
//!
//! Loads run parameters from a TOML file so experiments can be adjusted without
//! recompiling. Every section falls back to defaults when omitted.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::error::{SimError, TopologyError};
use crate::simulation::ProgressOptions;
use crate::topology::Topology;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "schelling.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimParams,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub topology: TopologyConfig,
}

/// Model parameters for one simulation instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Fraction of nodes occupied, in (0, 1)
    pub density: f64,
    /// Fraction of agents in the minority population, in [0, 1]
    pub minority_fraction: f64,
    /// Minimum same-type neighbor fraction for an agent to be happy, in [0, 1]
    pub homophily_threshold: f64,
    pub seed: u64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            density: 0.7,
            minority_fraction: 0.5,
            homophily_threshold: 0.6,
            seed: 42,
        }
    }
}

impl SimParams {
    /// Range checks. NaN fails every check.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.density > 0.0 && self.density < 1.0) {
            return Err(SimError::InvalidDensity(self.density));
        }
        if !(0.0..=1.0).contains(&self.minority_fraction) {
            return Err(SimError::InvalidMinorityFraction(self.minority_fraction));
        }
        if !(0.0..=1.0).contains(&self.homophily_threshold) {
            return Err(SimError::InvalidThreshold(self.homophily_threshold));
        }
        Ok(())
    }
}

/// Run loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Move budget for the run (0 = unbounded)
    pub max_moves: u64,
    pub report_every_moves: u64,
    pub report_every_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_moves: 1_000_000,
            report_every_moves: 10_000,
            report_every_ms: 1_000,
        }
    }
}

impl RunConfig {
    pub fn progress(&self) -> ProgressOptions {
        ProgressOptions {
            enabled: self.report_every_moves > 0 || self.report_every_ms > 0,
            report_every_moves: self.report_every_moves,
            report_every_ms: self.report_every_ms,
        }
    }
}

/// Which fixed graph to run on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologyConfig {
    Complete { nodes: usize },
    Path { nodes: usize },
    Lollipop { clique: usize, path: usize },
    Torus { width: usize, height: usize },
    /// JSON adjacency list on disk
    Adjacency { file: PathBuf },
}

impl Default for TopologyConfig {
    fn default() -> Self {
        TopologyConfig::Torus {
            width: 40,
            height: 40,
        }
    }
}

impl TopologyConfig {
    pub fn build(&self) -> Result<Arc<Topology>, TopologyError> {
        let topology = match self {
            TopologyConfig::Complete { nodes } => Topology::complete(*nodes),
            TopologyConfig::Path { nodes } => Topology::path(*nodes),
            TopologyConfig::Lollipop { clique, path } => Topology::lollipop(*clique, *path)?,
            TopologyConfig::Torus { width, height } => Topology::torus(*width, *height)?,
            TopologyConfig::Adjacency { file } => Topology::from_json_file(file)?,
        };
        Ok(Arc::new(topology))
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from the default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::from_file(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.simulation.seed, 42);
        assert!(config.simulation.validate().is_ok());
        assert_eq!(config.run.max_moves, 1_000_000);
        assert_eq!(config.topology.build().unwrap().node_count(), 1600);
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::from_str(
            r#"
            [simulation]
            density = 0.5
            seed = 7

            [topology]
            kind = "lollipop"
            clique = 5
            path = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.density, 0.5);
        assert_eq!(config.simulation.seed, 7);
        // unspecified fields keep their defaults
        assert_eq!(config.simulation.homophily_threshold, 0.6);
        assert_eq!(
            config.topology,
            TopologyConfig::Lollipop {
                clique: 5,
                path: 20
            }
        );
        assert_eq!(config.topology.build().unwrap().node_count(), 25);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        let parsed = Config::from_str(&text).unwrap();
        assert_eq!(parsed.simulation, config.simulation);
        assert_eq!(parsed.topology, config.topology);
    }

    #[test]
    fn test_unknown_topology_kind_fails() {
        let result = Config::from_str(
            r#"
            [topology]
            kind = "hypercube"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_ranges() {
        let mut params = SimParams::default();
        params.homophily_threshold = 0.0;
        assert!(params.validate().is_ok());
        params.homophily_threshold = 1.0;
        assert!(params.validate().is_ok());
        params.minority_fraction = 1.2;
        assert!(matches!(
            params.validate(),
            Err(SimError::InvalidMinorityFraction(_))
        ));
    }

    #[test]
    fn test_load_config_file() {
        // Runs only when the sample config sits next to the crate
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            let config = Config::from_file(DEFAULT_CONFIG_PATH).unwrap();
            assert!(config.simulation.validate().is_ok());
        }
    }
}
