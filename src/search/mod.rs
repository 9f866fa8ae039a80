// src/search/mod.rs

//! Amplitude-amplification search over candidate-path indices.
//!
//! Candidate `i` is encoded as basis state `|i>` of a `b`-qubit register,
//! `b = max(1, ceil(log2 N))`. Every index whose classical cost equals the
//! minimum is marked, and `r` rounds of oracle + diffuser raise the chance of
//! measuring a marked index. Construction is pure (`build_search_circuit`);
//! only `AmplitudeSearch::search` touches the executor.

mod table;

pub use table::OutcomeFrequencyTable;

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{COST_TIE_TOLERANCE, MAX_QUBITS, QubitId, RouteError};
use crate::operations::Gate;
use crate::simulation::{CircuitExecutor, OutcomeCounts};
use crate::validation::validate_outcome_counts;
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Smallest register able to index `candidate_count` paths. Never below one qubit.
pub fn qubit_count(candidate_count: usize) -> usize {
    if candidate_count <= 2 {
        1
    } else {
        (usize::BITS - (candidate_count - 1).leading_zeros()) as usize
    }
}

/// Indices whose cost equals the minimum cost. Ties are all kept, in index order.
pub fn target_indices(costs: &[f64]) -> Vec<usize> {
    let min = costs.iter().copied().fold(f64::INFINITY, f64::min);
    costs
        .iter()
        .enumerate()
        .filter(|(_, c)| (**c - min).abs() <= COST_TIE_TOLERANCE)
        .map(|(i, _)| i)
        .collect()
}

/// Oracle + diffuser rounds: `max(1, floor(pi/4 * sqrt(2^b / M)))`.
///
/// The register size `2^b` is used rather than the candidate count, so
/// registers with padding indices are amplified as if fully populated.
pub fn iteration_count(num_qubits: usize, marked: usize) -> usize {
    let space = (1u64 << num_qubits.min(63)) as f64;
    let marked = marked.max(1) as f64;
    let rounds = ((PI / 4.0) * (space / marked).sqrt()).floor() as usize;
    rounds.max(1)
}

/// Appends a phase flip on each target index.
///
/// For every target, qubits whose bit is 0 are flipped, the all-ones state is
/// phase-flipped, and the flips are undone.
pub fn append_oracle(mut builder: CircuitBuilder, targets: &[usize], num_qubits: usize) -> CircuitBuilder {
    for &target in targets {
        let zero_bits: Vec<Gate> = (0..num_qubits)
            .filter(|bit| (target >> bit) & 1 == 0)
            .map(|bit| Gate::BitFlip { target: QubitId(bit) })
            .collect();
        builder = builder.add_gates(zero_bits.clone()).phase_flip_all_ones().add_gates(zero_bits);
    }
    builder
}

/// Appends inversion about the mean of the uniform superposition.
pub fn append_diffuser(builder: CircuitBuilder) -> CircuitBuilder {
    builder
        .hadamard_all()
        .bit_flip_all()
        .phase_flip_all_ones()
        .bit_flip_all()
        .hadamard_all()
}

/// A constructed search circuit and the parameters it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    /// Number of candidate paths being searched.
    pub candidate_count: usize,
    /// Register width `b`.
    pub num_qubits: usize,
    /// Marked indices.
    pub targets: Vec<usize>,
    /// Oracle + diffuser rounds `r`.
    pub iterations: usize,
    /// The full measured circuit.
    pub circuit: Circuit,
}

/// Builds the measured amplitude-amplification circuit for `candidate_count`
/// indices with the given targets marked.
///
/// # Errors
/// `InvalidParameter` when there are no candidates or targets, a target is
/// out of range, or the register would exceed `MAX_QUBITS`.
pub fn build_search_circuit(candidate_count: usize, targets: &[usize]) -> Result<SearchPlan, RouteError> {
    if candidate_count == 0 {
        return Err(RouteError::invalid_parameter("candidate_count", "nothing to search"));
    }
    if targets.is_empty() {
        return Err(RouteError::invalid_parameter("targets", "at least one index must be marked"));
    }
    if let Some(bad) = targets.iter().find(|t| **t >= candidate_count) {
        return Err(RouteError::invalid_parameter(
            "targets",
            format!("index {} is outside 0..{}", bad, candidate_count),
        ));
    }
    let num_qubits = qubit_count(candidate_count);
    if num_qubits > MAX_QUBITS {
        return Err(RouteError::invalid_parameter(
            "candidate_count",
            format!("{} candidates need {} qubits, limit is {}", candidate_count, num_qubits, MAX_QUBITS),
        ));
    }
    let iterations = iteration_count(num_qubits, targets.len());

    let mut builder = CircuitBuilder::new(num_qubits).hadamard_all();
    for _ in 0..iterations {
        builder = append_oracle(builder, targets, num_qubits);
        builder = append_diffuser(builder);
    }
    let circuit = builder.measure_all().build();

    debug!(
        candidate_count,
        num_qubits,
        marked = targets.len(),
        iterations,
        gates = circuit.len(),
        "built amplitude search circuit"
    );

    Ok(SearchPlan {
        candidate_count,
        num_qubits,
        targets: targets.to_vec(),
        iterations,
        circuit,
    })
}

/// Converts measured bit-patterns into per-index counts.
///
/// Patterns decoding to an index at or beyond `candidate_count` are padding
/// and are discarded (tallied in `discarded`); every index in
/// `0..candidate_count` ends up with an entry.
///
/// # Errors
/// `ExecutorFailure` if a pattern is not a binary number.
pub fn decode_outcomes(counts: &OutcomeCounts, candidate_count: usize) -> Result<OutcomeFrequencyTable, RouteError> {
    let mut table = OutcomeFrequencyTable::zeroed(candidate_count);
    for (bits, count) in counts.iter() {
        let index = u64::from_str_radix(bits, 2)
            .map_err(|_| RouteError::executor(format!("outcome '{}' is not a bit-pattern", bits)))?;
        match usize::try_from(index) {
            Ok(i) if i < candidate_count => table.add(i, count),
            _ => table.discard(count),
        }
    }
    if table.discarded() > 0 {
        warn!(
            discarded = table.discarded(),
            candidate_count, "discarded measurements of padding indices"
        );
    }
    Ok(table)
}

/// Result of one search invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// First minimum-cost index, independent of sampling. `None` when there
    /// were no candidates.
    pub best_index: Option<usize>,
    /// Measured frequency of each index.
    pub table: OutcomeFrequencyTable,
    /// Shots requested.
    pub shots: u32,
    /// Circuit and parameters, absent when there were no candidates.
    pub plan: Option<SearchPlan>,
}

impl SearchOutcome {
    /// Outcome of searching an empty candidate set.
    pub fn empty(shots: u32) -> Self {
        Self {
            best_index: None,
            table: OutcomeFrequencyTable::zeroed(0),
            shots,
            plan: None,
        }
    }
}

/// Runs amplitude-amplification searches through a `CircuitExecutor`.
#[derive(Debug, Clone)]
pub struct AmplitudeSearch<E> {
    executor: E,
    shots: u32,
}

impl<E: CircuitExecutor> AmplitudeSearch<E> {
    /// Creates a search requesting `shots` measurements per run.
    ///
    /// # Errors
    /// `InvalidParameter` if `shots == 0`.
    pub fn new(executor: E, shots: u32) -> Result<Self, RouteError> {
        if shots == 0 {
            return Err(RouteError::invalid_parameter("shots", "shot count must be positive"));
        }
        Ok(Self { executor, shots })
    }

    /// Shots per run.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Changes the shots requested by later runs.
    ///
    /// # Errors
    /// `InvalidParameter` if `shots == 0`; the previous value is kept.
    pub fn set_shots(&mut self, shots: u32) -> Result<(), RouteError> {
        if shots == 0 {
            return Err(RouteError::invalid_parameter("shots", "shot count must be positive"));
        }
        self.shots = shots;
        Ok(())
    }

    /// The executor in use.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Searches the candidates described by their classical costs.
    ///
    /// The returned `best_index` is the first minimum-cost index whatever
    /// the executor measures. An empty `costs` slice returns
    /// `SearchOutcome::empty` without calling the executor.
    ///
    /// # Errors
    /// * `InvalidParameter` for non-finite costs or an oversized register.
    /// * `ExecutorFailure` if the executor fails or returns a malformed table.
    pub fn search(&self, costs: &[f64]) -> Result<SearchOutcome, RouteError> {
        self.search_with_shots(costs, self.shots)
    }

    /// Like `search`, but requesting `shots` measurements for this run only.
    ///
    /// # Errors
    /// As `search`, plus `InvalidParameter` if `shots == 0`.
    pub fn search_with_shots(&self, costs: &[f64], shots: u32) -> Result<SearchOutcome, RouteError> {
        if shots == 0 {
            return Err(RouteError::invalid_parameter("shots", "shot count must be positive"));
        }
        if costs.is_empty() {
            return Ok(SearchOutcome::empty(shots));
        }
        if let Some(bad) = costs.iter().find(|c| !c.is_finite()) {
            return Err(RouteError::invalid_parameter("costs", format!("cost {} is not finite", bad)));
        }

        let targets = target_indices(costs);
        let best_index = targets.first().copied();
        let plan = build_search_circuit(costs.len(), &targets)?;

        let counts = self.executor.execute(&plan.circuit, shots).map_err(|err| match err {
            RouteError::ExecutorFailure { .. } => err,
            other => RouteError::executor(other.to_string()),
        })?;
        validate_outcome_counts(&counts, plan.num_qubits, shots)?;
        let table = decode_outcomes(&counts, costs.len())?;

        debug!(
            best_index = ?best_index,
            observed = table.observed(),
            discarded = table.discarded(),
            "amplitude search finished"
        );

        Ok(SearchOutcome {
            best_index,
            table,
            shots,
            plan: Some(plan),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Simulator;

    #[test]
    fn test_qubit_count_rounds_up() {
        let expected = [(1, 1), (2, 1), (3, 2), (4, 2), (5, 3), (8, 3), (9, 4), (16, 4), (17, 5)];
        for (n, b) in expected {
            assert_eq!(qubit_count(n), b, "qubit_count({})", n);
        }
    }

    #[test]
    fn test_iteration_count_floors_at_one() {
        assert_eq!(iteration_count(1, 1), 1);
        assert_eq!(iteration_count(1, 2), 1);
        assert_eq!(iteration_count(2, 1), 1);
        assert_eq!(iteration_count(3, 1), 2);
        assert_eq!(iteration_count(4, 1), 3);
        assert_eq!(iteration_count(4, 16), 1);
    }

    #[test]
    fn test_target_indices_keep_ties_in_order() {
        assert_eq!(target_indices(&[3.0, 2.0, 5.0, 2.0]), vec![1, 3]);
        assert_eq!(target_indices(&[1.0]), vec![0]);
        assert!(target_indices(&[]).is_empty());
    }

    #[test]
    fn test_target_indices_tolerate_float_noise() {
        assert_eq!(target_indices(&[0.1 + 0.2, 0.3]), vec![0, 1]);
    }

    #[test]
    fn test_oracle_flips_zero_bits_around_phase_flip() {
        // Index 2 = q1 set, q0 clear: only q0 is wrapped in bit flips
        let circuit = append_oracle(CircuitBuilder::new(2), &[2], 2).build();
        assert_eq!(
            circuit.gates(),
            &[
                Gate::BitFlip { target: QubitId(0) },
                Gate::ControlledPhaseFlip { controls: vec![QubitId(0)], target: QubitId(1) },
                Gate::BitFlip { target: QubitId(0) },
            ]
        );
    }

    #[test]
    fn test_single_qubit_oracle_uses_direct_phase_flip() {
        let circuit = append_oracle(CircuitBuilder::new(1), &[0], 1).build();
        assert_eq!(
            circuit.gates(),
            &[
                Gate::BitFlip { target: QubitId(0) },
                Gate::PhaseFlip { target: QubitId(0) },
                Gate::BitFlip { target: QubitId(0) },
            ]
        );
    }

    #[test]
    fn test_plan_structure() -> Result<(), RouteError> {
        let plan = build_search_circuit(5, &[3])?;
        assert_eq!(plan.num_qubits, 3);
        assert_eq!(plan.iterations, 2);
        assert_eq!(plan.circuit.num_qubits(), 3);
        assert_eq!(plan.circuit.measured_qubits().map(|q| q.len()), Some(3));
        let phase_flips = plan.circuit.count_gates(|g| matches!(g, Gate::ControlledPhaseFlip { .. }));
        // One in the oracle and one in the diffuser per round
        assert_eq!(phase_flips, 2 * plan.iterations);
        Ok(())
    }

    #[test]
    fn test_single_candidate_plan() -> Result<(), RouteError> {
        let plan = build_search_circuit(1, &[0])?;
        assert_eq!(plan.num_qubits, 1);
        assert_eq!(plan.iterations, 1);
        assert_eq!(plan.targets, vec![0]);
        Ok(())
    }

    #[test]
    fn test_plan_rejects_bad_targets() {
        assert!(build_search_circuit(0, &[0]).is_err());
        assert!(build_search_circuit(3, &[]).is_err());
        assert!(build_search_circuit(3, &[3]).is_err());
    }

    #[test]
    fn test_marked_index_is_amplified_to_certainty() -> Result<(), RouteError> {
        // Four states, one marked: a single round is exact
        let plan = build_search_circuit(4, &[2])?;
        let state = Simulator::new().final_state(&plan.circuit)?;
        assert!((state.probabilities()[2] - 1.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_decode_discards_padding_indices() -> Result<(), RouteError> {
        let counts: OutcomeCounts = [("00", 5), ("01", 3), ("10", 2), ("11", 6)].into_iter().collect();
        let table = decode_outcomes(&counts, 3)?;
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0), 5);
        assert_eq!(table.get(1), 3);
        assert_eq!(table.get(2), 2);
        assert_eq!(table.get(3), 0);
        assert_eq!(table.observed(), 10);
        assert_eq!(table.discarded(), 6);
        Ok(())
    }

    #[test]
    fn test_decode_zero_fills_unseen_indices() -> Result<(), RouteError> {
        let counts: OutcomeCounts = [("01", 8)].into_iter().collect();
        let table = decode_outcomes(&counts, 4)?;
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(0, 0), (1, 8), (2, 0), (3, 0)]);
        Ok(())
    }

    #[test]
    fn test_decode_rejects_non_binary() {
        let counts: OutcomeCounts = [("2", 8)].into_iter().collect();
        assert!(matches!(decode_outcomes(&counts, 4), Err(RouteError::ExecutorFailure { .. })));
    }

    #[test]
    fn test_zero_shots_rejected() {
        assert!(matches!(
            AmplitudeSearch::new(Simulator::new(), 0),
            Err(RouteError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_empty_costs_skip_executor() -> Result<(), RouteError> {
        let search = AmplitudeSearch::new(Simulator::new(), 64)?;
        let outcome = search.search(&[])?;
        assert_eq!(outcome.best_index, None);
        assert!(outcome.table.is_empty());
        assert!(outcome.plan.is_none());
        Ok(())
    }
}
