// src/cost/mod.rs

//! Traffic-aware path costs.
//!
//! A path's cost is the sum over its edges of the static edge weight plus a
//! penalty for every agent currently on that edge.

use crate::core::RouteError;
use crate::graph::{CandidatePath, EdgeKey, RoadGraph};
use std::collections::BTreeMap;
use std::fmt;

/// Per-edge agent counts for one simulation tick.
///
/// Edges never recorded read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CongestionTable {
    counts: BTreeMap<EdgeKey, u32>,
}

impl CongestionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more agent on `edge`.
    pub fn increment(&mut self, edge: EdgeKey) {
        *self.counts.entry(edge).or_insert(0) += 1;
    }

    /// Agents on `edge`.
    pub fn get(&self, edge: &EdgeKey) -> u32 {
        self.counts.get(edge).copied().unwrap_or(0)
    }

    /// Total agents across all edges.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|c| u64::from(*c)).sum()
    }

    /// Occupied edges in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&EdgeKey, u32)> {
        self.counts.iter().map(|(edge, count)| (edge, *count))
    }

    /// Returns `true` when no edge is occupied.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Drops every count.
    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

impl FromIterator<EdgeKey> for CongestionTable {
    fn from_iter<I: IntoIterator<Item = EdgeKey>>(iter: I) -> Self {
        let mut table = CongestionTable::new();
        for edge in iter {
            table.increment(edge);
        }
        table
    }
}

impl fmt::Display for CongestionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.counts.is_empty() {
            return write!(f, "Congestion[]");
        }
        write!(f, "Congestion[")?;
        for (i, (edge, count)) in self.counts.iter().enumerate() {
            write!(f, "{}{}={}", if i > 0 { ", " } else { "" }, edge, count)?;
        }
        write!(f, "]")
    }
}

/// Prices a path given static weights and live congestion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    penalty_per_unit: f64,
}

impl CostModel {
    /// Creates a model charging `penalty_per_unit` per agent per occupied edge.
    ///
    /// # Errors
    /// `InvalidParameter` if the penalty is negative or not finite.
    pub fn new(penalty_per_unit: f64) -> Result<Self, RouteError> {
        if !(penalty_per_unit.is_finite() && penalty_per_unit >= 0.0) {
            return Err(RouteError::invalid_parameter(
                "congestion_penalty",
                format!("penalty must be finite and non-negative, got {}", penalty_per_unit),
            ));
        }
        Ok(Self { penalty_per_unit })
    }

    /// Penalty applied per agent.
    pub fn penalty_per_unit(&self) -> f64 {
        self.penalty_per_unit
    }

    /// `sum(weight(e) + congestion[e] * penalty)` over the path's edges.
    /// The empty path costs nothing.
    ///
    /// # Errors
    /// `InvalidGraph` if the path uses an edge missing from `graph`.
    pub fn cost(&self, graph: &RoadGraph, path: &CandidatePath, congestion: &CongestionTable) -> Result<f64, RouteError> {
        path.edges().try_fold(0.0, |acc, edge| -> Result<f64, RouteError> {
            let weight = graph
                .edge_weight(&edge.from, &edge.to)
                .ok_or_else(|| RouteError::graph(format!("path uses missing edge {}", edge)))?;
            Ok(acc + weight + f64::from(congestion.get(&edge)) * self.penalty_per_unit)
        })
    }

    /// Costs of every candidate, in candidate order.
    pub fn costs(
        &self,
        graph: &RoadGraph,
        candidates: &[CandidatePath],
        congestion: &CongestionTable,
    ) -> Result<Vec<f64>, RouteError> {
        candidates.iter().map(|p| self.cost(graph, p, congestion)).collect()
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self { penalty_per_unit: 1.0 }
    }
}
