// src/config/mod.rs

//! Simulation parameters, loadable from TOML.

use crate::core::{DEFAULT_CANDIDATE_LIMIT, DEFAULT_SHOTS, PROBABILITY_FLOOR, RouteError};
use serde::{Deserialize, Serialize};

/// Parameters of a route-assignment simulation.
///
/// Missing TOML keys take their defaults:
///
/// ```
/// use qroute::config::SimulationConfig;
///
/// let config = SimulationConfig::from_toml_str("agent_count = 5\nseed = 11").unwrap();
/// assert_eq!(config.agent_count, 5);
/// assert_eq!(config.seed, Some(11));
/// assert_eq!(config.k, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Route origin.
    pub start: String,
    /// Route destination.
    pub end: String,
    /// Candidate-path limit.
    pub k: usize,
    /// Executor shots per search.
    pub shots: u32,
    /// Number of agents.
    pub agent_count: usize,
    /// Progress gained per tick, as a fraction of a whole path.
    pub progress_step: f64,
    /// Progress-equivalent delay between consecutive agents' departures.
    pub departure_stagger: f64,
    /// Cost added per agent on an edge.
    pub congestion_penalty: f64,
    /// Probability floor of the selection combiner.
    pub probability_floor: f64,
    /// Executor seed; `None` samples from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: "A".to_string(),
            end: "D".to_string(),
            k: DEFAULT_CANDIDATE_LIMIT,
            shots: DEFAULT_SHOTS,
            agent_count: 3,
            progress_step: 0.01,
            departure_stagger: 0.2,
            congestion_penalty: 1.0,
            probability_floor: PROBABILITY_FLOOR,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, RouteError> {
        let config: SimulationConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field for range errors.
    pub fn validate(&self) -> Result<(), RouteError> {
        if self.start.is_empty() || self.end.is_empty() {
            return Err(RouteError::invalid_parameter("start/end", "endpoints must be named"));
        }
        if self.start == self.end {
            return Err(RouteError::invalid_parameter("end", "start and end must differ"));
        }
        if self.k == 0 {
            return Err(RouteError::invalid_parameter("k", "candidate limit must be positive"));
        }
        if self.shots == 0 {
            return Err(RouteError::invalid_parameter("shots", "shot count must be positive"));
        }
        if self.agent_count == 0 {
            return Err(RouteError::invalid_parameter("agent_count", "agent count must be positive"));
        }
        if !(self.progress_step.is_finite() && self.progress_step > 0.0 && self.progress_step <= 1.0) {
            return Err(RouteError::invalid_parameter(
                "progress_step",
                format!("step must lie in (0, 1], got {}", self.progress_step),
            ));
        }
        if !(self.departure_stagger.is_finite() && self.departure_stagger >= 0.0) {
            return Err(RouteError::invalid_parameter(
                "departure_stagger",
                format!("stagger must be finite and non-negative, got {}", self.departure_stagger),
            ));
        }
        if !(self.congestion_penalty.is_finite() && self.congestion_penalty >= 0.0) {
            return Err(RouteError::invalid_parameter(
                "congestion_penalty",
                format!("penalty must be finite and non-negative, got {}", self.congestion_penalty),
            ));
        }
        if !(self.probability_floor > 0.0 && self.probability_floor <= 1.0) {
            return Err(RouteError::invalid_parameter(
                "probability_floor",
                format!("floor must lie in (0, 1], got {}", self.probability_floor),
            ));
        }
        Ok(())
    }
}
