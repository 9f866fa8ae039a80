// src/graph/mod.rs

//! Directed, positively weighted road graphs and the candidate paths drawn
//! from them.

mod enumerator;
mod fixtures;
mod path;

pub use enumerator::{enumerate_candidates, k_shortest_simple_paths};
pub use path::{CandidatePath, EdgeKey};

use crate::core::RouteError;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// A directed graph whose nodes are named and whose edge weights are
/// additive, strictly positive travel costs.
///
/// Adding an edge that already exists replaces its weight, so there is at
/// most one edge per ordered node pair.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    graph: DiGraph<String, f64>,
    index: HashMap<String, NodeIndex>,
}

impl RoadGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from `(from, to, weight)` triples.
    pub fn from_edges<I, S>(edges: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = (S, S, f64)>,
        S: AsRef<str>,
    {
        let mut graph = Self::new();
        for (from, to, weight) in edges {
            graph.add_edge(from.as_ref(), to.as_ref(), weight)?;
        }
        Ok(graph)
    }

    /// Adds a node if it is not present and returns its index.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(idx) = self.index.get(name) {
            return *idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Adds or re-weights the edge `from -> to`.
    ///
    /// # Errors
    /// `RouteError::InvalidGraph` if `weight` is not finite and strictly positive.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<(), RouteError> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(RouteError::graph(format!(
                "edge {} -> {} has weight {}, weights must be finite and positive",
                from, to, weight
            )));
        }
        self.insert_edge(from, to, weight);
        Ok(())
    }

    fn insert_edge(&mut self, from: &str, to: &str, weight: f64) {
        let a = self.add_node(from);
        let b = self.add_node(to);
        self.graph.update_edge(a, b, weight);
    }

    /// Returns `true` if a node with this name exists.
    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Looks up a node index by name.
    pub fn node_index(&self, name: &str) -> Result<NodeIndex, RouteError> {
        self.index.get(name).copied().ok_or_else(|| RouteError::unknown_node(name))
    }

    /// Name of the node at `idx`.
    pub fn node_name(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    /// Weight of the edge `from -> to`, if present.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        let a = self.index.get(from)?;
        let b = self.index.get(to)?;
        self.graph.find_edge(*a, *b).map(|e| self.graph[e])
    }

    /// Node names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(move |idx| self.graph[idx].as_str())
    }

    /// Edges with their weights in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, f64)> + '_ {
        self.graph.edge_references().map(move |e| {
            (
                EdgeKey::new(self.graph[e.source()].as_str(), self.graph[e.target()].as_str()),
                *e.weight(),
            )
        })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Static cost of a path: the sum of its edge weights.
    ///
    /// # Errors
    /// `RouteError::InvalidGraph` if consecutive nodes are not joined by an edge.
    pub fn path_weight(&self, path: &CandidatePath) -> Result<f64, RouteError> {
        path.edges().try_fold(0.0, |acc, edge| {
            self.edge_weight(&edge.from, &edge.to)
                .map(|w| acc + w)
                .ok_or_else(|| RouteError::graph(format!("path uses missing edge {}", edge)))
        })
    }

    pub(crate) fn inner(&self) -> &DiGraph<String, f64> {
        &self.graph
    }
}
