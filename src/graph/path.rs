// src/graph/path.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A directed edge named by its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    /// Source node.
    pub from: String,
    /// Target node.
    pub to: String,
}

impl EdgeKey {
    /// Creates a key for `from -> to`.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// An ordered route through the graph from start to end.
///
/// Paths produced by the enumerator are simple (no repeated node). An empty
/// path stands for "no route", used when start and end are disconnected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CandidatePath {
    nodes: Vec<String>,
}

impl CandidatePath {
    /// Wraps a node sequence.
    pub fn new(nodes: Vec<String>) -> Self {
        Self { nodes }
    }

    /// Convenience constructor from string slices.
    pub fn from_names(nodes: &[&str]) -> Self {
        Self::new(nodes.iter().map(|n| n.to_string()).collect())
    }

    /// The empty, unroutable path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Nodes in travel order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Returns `true` for the unroutable path.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges traversed.
    pub fn edge_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Consecutive edges in travel order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.nodes.windows(2).map(|pair| EdgeKey::new(pair[0].as_str(), pair[1].as_str()))
    }

    /// The `i`-th edge, if the path has one.
    pub fn edge_at(&self, i: usize) -> Option<EdgeKey> {
        if i + 1 < self.nodes.len() {
            Some(EdgeKey::new(self.nodes[i].as_str(), self.nodes[i + 1].as_str()))
        } else {
            None
        }
    }

    /// Returns `true` if no node repeats.
    pub fn is_simple(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        self.nodes.iter().all(|n| seen.insert(n))
    }
}

impl fmt::Display for CandidatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            return write!(f, "<no path>");
        }
        write!(f, "{}", self.nodes.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_follow_node_order() {
        let path = CandidatePath::from_names(&["A", "B", "D"]);
        let edges: Vec<EdgeKey> = path.edges().collect();
        assert_eq!(edges, vec![EdgeKey::new("A", "B"), EdgeKey::new("B", "D")]);
        assert_eq!(path.edge_count(), 2);
        assert_eq!(path.edge_at(1), Some(EdgeKey::new("B", "D")));
        assert_eq!(path.edge_at(2), None);
    }

    #[test]
    fn test_empty_path_has_no_edges() {
        let path = CandidatePath::empty();
        assert_eq!(path.edge_count(), 0);
        assert_eq!(path.edges().count(), 0);
        assert_eq!(path.to_string(), "<no path>");
    }

    #[test]
    fn test_is_simple_detects_repeats() {
        assert!(CandidatePath::from_names(&["A", "B", "C"]).is_simple());
        assert!(!CandidatePath::from_names(&["A", "B", "A"]).is_simple());
    }
}
