//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Identifier for a single qubit of a search register.
/// Qubit `i` carries bit `i` of the encoded basis index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Failures surfaced by path enumeration, circuit execution and the
/// route-assignment loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Start and end are disconnected.
    /// Engine stages treat this as an empty candidate set rather than a fatal error.
    #[error("No path found from {start} to {end}")]
    NoPathFound {
        /// Requested start node
        start: String,
        /// Requested end node
        end: String,
    },

    /// A caller-supplied parameter is out of range. Prior valid state is retained.
    #[error("Invalid parameter `{name}`: {message}")]
    InvalidParameter {
        /// Name of the rejected parameter
        name: String,
        /// InvalidParameter failure message
        message: String,
    },

    /// The circuit executor did not return a well-formed outcome table.
    #[error("Executor failure: {message}")]
    ExecutorFailure {
        /// ExecutorFailure failure message
        message: String,
    },

    /// A node named by the caller does not exist in the graph.
    #[error("Unknown node '{node}'")]
    UnknownNode {
        /// The missing node name
        node: String,
    },

    /// The graph or a path over it violates structural rules.
    #[error("Invalid graph: {message}")]
    InvalidGraph {
        /// InvalidGraph failure message
        message: String,
    },

    /// General error encountered while evolving a statevector.
    #[error("Simulation process error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },

    /// Configuration could not be parsed or validated.
    #[error("Configuration error: {message}")]
    Config {
        /// Config failure message
        message: String,
    },
}

impl RouteError {
    /// Creates an `InvalidParameter` error.
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        RouteError::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an `ExecutorFailure` error.
    pub fn executor(message: impl Into<String>) -> Self {
        RouteError::ExecutorFailure { message: message.into() }
    }

    /// Creates an `InvalidGraph` error.
    pub fn graph(message: impl Into<String>) -> Self {
        RouteError::InvalidGraph { message: message.into() }
    }

    /// Creates a `SimulationError`.
    pub fn simulation(message: impl Into<String>) -> Self {
        RouteError::SimulationError { message: message.into() }
    }

    /// Creates a `Config` error.
    pub fn config(message: impl Into<String>) -> Self {
        RouteError::Config { message: message.into() }
    }

    /// Creates an `UnknownNode` error.
    pub fn unknown_node(node: impl Into<String>) -> Self {
        RouteError::UnknownNode { node: node.into() }
    }

    /// Returns `true` for the disconnected-endpoints case, which callers
    /// downgrade to an empty candidate set.
    pub fn is_no_path(&self) -> bool {
        matches!(self, RouteError::NoPathFound { .. })
    }
}

impl From<toml::de::Error> for RouteError {
    fn from(err: toml::de::Error) -> Self {
        RouteError::config(err.to_string())
    }
}
