// src/graph/enumerator.rs

//! Ranked candidate-path enumeration (Yen's k-shortest simple paths).

use super::{CandidatePath, RoadGraph};
use crate::core::RouteError;
use petgraph::algo::astar;
use petgraph::graph::NodeIndex;
use petgraph::visit::{EdgeFiltered, EdgeRef};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Returns up to `k` simple paths from `start` to `end`, cheapest first.
///
/// Paths of equal cost keep the order in which they were discovered, and the
/// result is stably sorted by cost once more before it is returned, so the
/// ordering is fully deterministic for a given graph.
///
/// # Errors
/// * `InvalidParameter` if `k == 0` or `start == end`.
/// * `UnknownNode` if either endpoint is not in the graph.
/// * `NoPathFound` if `end` is unreachable from `start`.
pub fn k_shortest_simple_paths(
    graph: &RoadGraph,
    start: &str,
    end: &str,
    k: usize,
) -> Result<Vec<CandidatePath>, RouteError> {
    if k == 0 {
        return Err(RouteError::invalid_parameter("k", "candidate limit must be positive"));
    }
    if start == end {
        return Err(RouteError::invalid_parameter("end", "start and end must differ"));
    }
    let source = graph.node_index(start)?;
    let target = graph.node_index(end)?;

    let first = shortest_path(graph, source, target, &HashSet::new(), &HashSet::new()).ok_or_else(|| {
        RouteError::NoPathFound {
            start: start.to_string(),
            end: end.to_string(),
        }
    })?;

    let mut accepted: Vec<(f64, Vec<NodeIndex>)> = vec![first];
    let mut pending: Vec<(f64, Vec<NodeIndex>)> = Vec::new();

    while accepted.len() < k {
        let previous = match accepted.last() {
            Some((_, nodes)) => nodes.clone(),
            None => break,
        };

        for i in 0..previous.len() - 1 {
            let spur = previous[i];
            let root = &previous[..=i];

            let removed_edges: HashSet<(NodeIndex, NodeIndex)> = accepted
                .iter()
                .filter(|(_, nodes)| nodes.len() > i + 1 && &nodes[..=i] == root)
                .map(|(_, nodes)| (nodes[i], nodes[i + 1]))
                .collect();
            let removed_nodes: HashSet<NodeIndex> = root[..i].iter().copied().collect();

            if let Some((_, spur_path)) = shortest_path(graph, spur, target, &removed_nodes, &removed_edges) {
                let mut total: Vec<NodeIndex> = root[..i].to_vec();
                total.extend(spur_path);
                let seen = accepted.iter().chain(pending.iter()).any(|(_, nodes)| *nodes == total);
                if !seen {
                    let cost = nodes_weight(graph, &total);
                    pending.push((cost, total));
                }
            }
        }

        if pending.is_empty() {
            break;
        }
        // Cheapest pending path; the earliest discovered wins a tie
        let mut best = 0;
        for (idx, (cost, _)) in pending.iter().enumerate().skip(1) {
            if *cost < pending[best].0 {
                best = idx;
            }
        }
        accepted.push(pending.remove(best));
    }

    accepted.sort_by(|a, b| a.0.total_cmp(&b.0));
    debug!(start, end, k, found = accepted.len(), "enumerated candidate paths");

    Ok(accepted
        .into_iter()
        .map(|(_, nodes)| CandidatePath::new(nodes.into_iter().map(|n| graph.node_name(n).to_string()).collect()))
        .collect())
}

/// Enumerates candidates, downgrading `NoPathFound` to an empty set.
pub fn enumerate_candidates(
    graph: &RoadGraph,
    start: &str,
    end: &str,
    k: usize,
) -> Result<Vec<CandidatePath>, RouteError> {
    match k_shortest_simple_paths(graph, start, end, k) {
        Err(err) if err.is_no_path() => {
            warn!(start, end, "no path between endpoints, candidate set is empty");
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Cheapest path avoiding the given nodes and edges (zero-heuristic A*).
fn shortest_path(
    graph: &RoadGraph,
    source: NodeIndex,
    target: NodeIndex,
    removed_nodes: &HashSet<NodeIndex>,
    removed_edges: &HashSet<(NodeIndex, NodeIndex)>,
) -> Option<(f64, Vec<NodeIndex>)> {
    let filtered = EdgeFiltered::from_fn(graph.inner(), |e| {
        !removed_nodes.contains(&e.source())
            && !removed_nodes.contains(&e.target())
            && !removed_edges.contains(&(e.source(), e.target()))
    });
    astar(&filtered, source, |n| n == target, |e| *e.weight(), |_| 0.0)
}

fn nodes_weight(graph: &RoadGraph, nodes: &[NodeIndex]) -> f64 {
    let inner = graph.inner();
    nodes
        .windows(2)
        .filter_map(|pair| inner.find_edge(pair[0], pair[1]).map(|e| inner[e]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(paths: &[CandidatePath]) -> Vec<Vec<&str>> {
        paths.iter().map(|p| p.nodes().iter().map(|n| n.as_str()).collect()).collect()
    }

    #[test]
    fn test_demo_graph_has_two_tied_routes() -> Result<(), RouteError> {
        let graph = RoadGraph::demo();
        let paths = k_shortest_simple_paths(&graph, "A", "D", 10)?;
        assert_eq!(paths.len(), 2);
        let found = names(&paths);
        assert!(found.contains(&vec!["A", "B", "D"]));
        assert!(found.contains(&vec!["A", "C", "D"]));
        for p in &paths {
            assert_eq!(graph.path_weight(p)?, 3.0);
        }
        Ok(())
    }

    #[test]
    fn test_enumeration_is_deterministic() -> Result<(), RouteError> {
        let graph = RoadGraph::city_grid();
        let first = k_shortest_simple_paths(&graph, "A", "H", 10)?;
        for _ in 0..5 {
            assert_eq!(k_shortest_simple_paths(&graph, "A", "H", 10)?, first);
        }
        Ok(())
    }

    #[test]
    fn test_paths_are_simple_and_cost_ordered() -> Result<(), RouteError> {
        let graph = RoadGraph::city_grid();
        let paths = k_shortest_simple_paths(&graph, "A", "H", 10)?;
        assert!(!paths.is_empty());
        let mut last = 0.0;
        for p in &paths {
            assert!(p.is_simple(), "path {} repeats a node", p);
            assert_eq!(p.nodes().first().map(String::as_str), Some("A"));
            assert_eq!(p.nodes().last().map(String::as_str), Some("H"));
            let cost = graph.path_weight(p)?;
            assert!(cost >= last);
            last = cost;
        }
        Ok(())
    }

    #[test]
    fn test_k_limits_result() -> Result<(), RouteError> {
        let graph = RoadGraph::city_grid();
        let paths = k_shortest_simple_paths(&graph, "A", "H", 2)?;
        assert_eq!(paths.len(), 2);
        Ok(())
    }

    #[test]
    fn test_disconnected_endpoints() {
        let graph = RoadGraph::demo();
        let err = k_shortest_simple_paths(&graph, "D", "A", 10).unwrap_err();
        assert!(err.is_no_path());
    }

    #[test]
    fn test_enumerate_candidates_turns_no_path_into_empty_set() -> Result<(), RouteError> {
        let graph = RoadGraph::demo();
        assert!(enumerate_candidates(&graph, "D", "A", 10)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_parameters() {
        let graph = RoadGraph::demo();
        assert!(matches!(
            k_shortest_simple_paths(&graph, "A", "D", 0),
            Err(RouteError::InvalidParameter { .. })
        ));
        assert!(matches!(
            k_shortest_simple_paths(&graph, "A", "A", 3),
            Err(RouteError::InvalidParameter { .. })
        ));
        assert!(matches!(
            k_shortest_simple_paths(&graph, "A", "Q", 3),
            Err(RouteError::UnknownNode { .. })
        ));
    }
}
