// src/graph/fixtures.rs

//! Small reference networks used by demos and tests.

use super::RoadGraph;

impl RoadGraph {
    /// Four-node diamond: two routes from A to D, both costing 3.
    ///
    /// ```text
    /// A --1--> B --2--> D
    /// A --2--> C --1--> D
    /// ```
    pub fn demo() -> Self {
        Self::from_weighted(&[("A", "B", 1.0), ("A", "C", 2.0), ("B", "D", 2.0), ("C", "D", 1.0)])
    }

    /// Eight-node city block: A-D along the top street, E-H along the bottom
    /// street, avenues joining them, and two diagonal shortcuts.
    pub fn city_grid() -> Self {
        Self::from_weighted(&[
            // Streets
            ("A", "B", 1.0),
            ("B", "C", 1.0),
            ("C", "D", 1.0),
            ("E", "F", 1.0),
            ("F", "G", 1.0),
            ("G", "H", 1.0),
            // Avenues
            ("A", "E", 1.0),
            ("B", "F", 1.0),
            ("C", "G", 1.0),
            ("D", "H", 1.0),
            // Shortcuts
            ("B", "G", 2.0),
            ("F", "H", 2.0),
        ])
    }

    /// City block variant of `city_grid`: avenues cost 2 and the shortcuts
    /// run back from the top street to the bottom one.
    pub fn city_blocks() -> Self {
        Self::from_weighted(&[
            ("A", "B", 1.0),
            ("B", "C", 1.0),
            ("C", "D", 1.0),
            ("E", "F", 1.0),
            ("F", "G", 1.0),
            ("G", "H", 1.0),
            ("A", "E", 2.0),
            ("B", "F", 2.0),
            ("C", "G", 2.0),
            ("D", "H", 2.0),
            ("B", "E", 2.0),
            ("C", "F", 2.0),
            ("D", "G", 2.0),
        ])
    }

    /// Three-node chain with exactly one route from A to C.
    pub fn chain() -> Self {
        Self::from_weighted(&[("A", "B", 1.0), ("B", "C", 1.0)])
    }

    fn from_weighted(edges: &[(&str, &str, f64)]) -> Self {
        let mut graph = RoadGraph::new();
        for (from, to, weight) in edges {
            graph.insert_edge(from, to, *weight);
        }
        graph
    }
}
