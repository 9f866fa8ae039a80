// src/selection/mod.rs

//! Combines classical cost with measured amplification into one score per path.
//!
//! `score = cost / max(count / shots, floor)`, lower is better. A path that
//! is cheap but rarely measured only loses to a dearer, strongly amplified one
//! when the probability gap outweighs the cost gap.

use crate::core::{PROBABILITY_FLOOR, RouteError};
use crate::search::OutcomeFrequencyTable;

/// Score of one candidate at one selection event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionScore {
    /// Candidate index.
    pub index: usize,
    /// Classical (traffic-aware) cost used.
    pub cost: f64,
    /// Floored probability estimate used.
    pub probability: f64,
    /// `cost / probability`.
    pub score: f64,
}

/// Merges classical costs and outcome frequencies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBiasCombiner {
    probability_floor: f64,
}

impl SelectionBiasCombiner {
    /// Creates a combiner with the given probability floor.
    ///
    /// # Errors
    /// `InvalidParameter` unless `0 < floor <= 1`.
    pub fn new(probability_floor: f64) -> Result<Self, RouteError> {
        if !(probability_floor > 0.0 && probability_floor <= 1.0) {
            return Err(RouteError::invalid_parameter(
                "probability_floor",
                format!("floor must lie in (0, 1], got {}", probability_floor),
            ));
        }
        Ok(Self { probability_floor })
    }

    /// The floor applied to probability estimates.
    pub fn probability_floor(&self) -> f64 {
        self.probability_floor
    }

    /// Floored probability estimate for `path_index`.
    pub fn probability(&self, path_index: usize, table: &OutcomeFrequencyTable, total_shots: u32) -> f64 {
        if total_shots == 0 {
            return self.probability_floor;
        }
        let p = table.get(path_index) as f64 / f64::from(total_shots);
        p.max(self.probability_floor)
    }

    /// `classical_cost / probability` for one path.
    pub fn score(&self, path_index: usize, classical_cost: f64, table: &OutcomeFrequencyTable, total_shots: u32) -> f64 {
        classical_cost / self.probability(path_index, table, total_shots)
    }

    /// Scores every candidate, in candidate order.
    pub fn rank(&self, costs: &[f64], table: &OutcomeFrequencyTable, total_shots: u32) -> Vec<SelectionScore> {
        costs
            .iter()
            .enumerate()
            .map(|(index, &cost)| {
                let probability = self.probability(index, table, total_shots);
                SelectionScore {
                    index,
                    cost,
                    probability,
                    score: cost / probability,
                }
            })
            .collect()
    }

    /// Index of the lowest score, lowest index on ties. `None` for no candidates.
    pub fn best(&self, costs: &[f64], table: &OutcomeFrequencyTable, total_shots: u32) -> Option<usize> {
        let mut best: Option<SelectionScore> = None;
        for candidate in self.rank(costs, table, total_shots) {
            if best.is_none_or(|b| candidate.score.total_cmp(&b.score).is_lt()) {
                best = Some(candidate);
            }
        }
        best.map(|b| b.index)
    }
}

impl Default for SelectionBiasCombiner {
    fn default() -> Self {
        Self {
            probability_floor: PROBABILITY_FLOOR,
        }
    }
}
