// tests/search_tests.rs

use qroute::search::{build_search_circuit, iteration_count, qubit_count};
use qroute::{
    AmplitudeSearch, Circuit, CircuitExecutor, CongestionTable, CostModel, Gate, OutcomeCounts, RoadGraph,
    RouteError, SelectionBiasCombiner, Simulator, enumerate_candidates,
};

fn seeded(shots: u32) -> AmplitudeSearch<Simulator> {
    AmplitudeSearch::new(Simulator::with_seed(2024), shots).expect("positive shots")
}

/// Executor that always fails.
struct BrokenExecutor;

impl CircuitExecutor for BrokenExecutor {
    fn execute(&self, _circuit: &Circuit, _shots: u32) -> Result<OutcomeCounts, RouteError> {
        Err(RouteError::simulation("backend offline"))
    }
}

/// Executor that loses shots.
struct LossyExecutor;

impl CircuitExecutor for LossyExecutor {
    fn execute(&self, circuit: &Circuit, shots: u32) -> Result<OutcomeCounts, RouteError> {
        let width = circuit.num_qubits();
        let mut counts = OutcomeCounts::new();
        counts.record("0".repeat(width), u64::from(shots / 2));
        Ok(counts)
    }
}

#[test]
fn test_empty_candidates_skip_executor() -> Result<(), RouteError> {
    let outcome = AmplitudeSearch::new(BrokenExecutor, 100)?.search(&[])?;
    assert_eq!(outcome.best_index, None);
    assert!(outcome.table.is_empty());
    assert!(outcome.plan.is_none());
    Ok(())
}

#[test]
fn test_four_candidates_single_target_is_exact() -> Result<(), RouteError> {
    let outcome = seeded(512).search(&[4.0, 2.0, 3.0, 5.0])?;
    assert_eq!(outcome.best_index, Some(1));
    assert_eq!(outcome.table.get(1), 512);
    assert_eq!(outcome.table.observed() + outcome.table.discarded(), 512);
    assert_eq!(outcome.table.discarded(), 0);
    Ok(())
}

#[test]
fn test_counts_account_for_every_shot() -> Result<(), RouteError> {
    for costs in [vec![3.0, 1.0, 2.0], vec![5.0, 4.0, 3.0, 2.0, 1.0], vec![1.0; 6]] {
        let outcome = seeded(1000).search(&costs)?;
        assert_eq!(outcome.table.len(), costs.len());
        assert_eq!(outcome.table.observed() + outcome.table.discarded(), 1000, "costs {:?}", costs);
    }
    Ok(())
}

#[test]
fn test_amplification_favours_target() -> Result<(), RouteError> {
    // N = 5, b = 3, r = 2: the target is measured about 94.5% of the time.
    let outcome = seeded(2000).search(&[5.0, 4.0, 3.0, 2.0, 1.0])?;
    assert_eq!(outcome.best_index, Some(4));
    assert!(outcome.table.relative_frequency(4) > 0.85);
    assert_eq!(outcome.table.most_frequent(), Some(4));
    Ok(())
}

#[test]
fn test_single_candidate_builds_one_qubit_circuit() -> Result<(), RouteError> {
    let outcome = seeded(1024).search(&[7.5])?;
    let plan = outcome.plan.as_ref().expect("one candidate is searched");
    assert_eq!(plan.num_qubits, 1);
    assert_eq!(plan.targets, vec![0]);
    assert_eq!(plan.iterations, 1);
    assert_eq!(outcome.table.len(), 1);
    assert_eq!(outcome.best_index, Some(0));
    // One round on one qubit leaves |0> and the padding state |1> equally
    // likely; padding shots are discarded, never mapped onto the candidate.
    assert_eq!(outcome.table.observed() + outcome.table.discarded(), 1024);
    let observed = outcome.table.observed();
    assert!((412..=612).contains(&observed), "observed {} of 1024", observed);
    assert!((412..=612).contains(&outcome.table.discarded()));
    Ok(())
}

#[test]
fn test_best_index_independent_of_sampling() -> Result<(), RouteError> {
    let costs = [3.0, 1.0, 2.0, 1.0 + 1e-12];
    for shots in [1, 10, 1000] {
        for seed in 0..5 {
            let outcome = AmplitudeSearch::new(Simulator::with_seed(seed), shots)?.search(&costs)?;
            assert_eq!(outcome.best_index, Some(1));
        }
    }
    Ok(())
}

#[test]
fn test_ties_mark_every_minimum() -> Result<(), RouteError> {
    let plan = build_search_circuit(4, &[1, 3])?;
    assert_eq!(plan.targets, vec![1, 3]);
    assert_eq!(plan.iterations, iteration_count(2, 2));
    assert_eq!(plan.iterations, 1);
    let outcome = seeded(10).search(&[2.0, 1.0, 2.0, 1.0])?;
    assert_eq!(outcome.plan.map(|p| p.targets), Some(vec![1, 3]));
    Ok(())
}

#[test]
fn test_circuit_construction_is_pure() -> Result<(), RouteError> {
    let a = build_search_circuit(6, &[2])?;
    let b = build_search_circuit(6, &[2])?;
    assert_eq!(a, b);
    assert_eq!(a.num_qubits, qubit_count(6));
    assert!(matches!(a.circuit.gates().last(), Some(Gate::Measure { .. })));
    assert_eq!(
        a.circuit.count_gates(|g| matches!(g, Gate::Hadamard { .. })),
        a.num_qubits * (1 + 2 * a.iterations)
    );
    Ok(())
}

#[test]
fn test_executor_errors_surface_as_executor_failure() {
    let err = AmplitudeSearch::new(BrokenExecutor, 16)
        .and_then(|s| s.search(&[1.0, 2.0]))
        .unwrap_err();
    assert!(matches!(err, RouteError::ExecutorFailure { .. }));

    let err = AmplitudeSearch::new(LossyExecutor, 16)
        .and_then(|s| s.search(&[1.0, 2.0]))
        .unwrap_err();
    assert!(matches!(err, RouteError::ExecutorFailure { .. }));
}

#[test]
fn test_non_finite_costs_rejected() {
    let err = seeded(8).search(&[1.0, f64::NAN]).unwrap_err();
    assert!(matches!(err, RouteError::InvalidParameter { .. }));
}

#[test]
fn test_demo_scenario_end_to_end() -> Result<(), RouteError> {
    let graph = RoadGraph::demo();
    let candidates = enumerate_candidates(&graph, "A", "D", 10)?;
    assert_eq!(candidates.len(), 2);

    let costs = CostModel::default().costs(&graph, &candidates, &CongestionTable::new())?;
    assert_eq!(costs, vec![3.0, 3.0]);

    let first = seeded(256).search(&costs)?;
    let second = AmplitudeSearch::new(Simulator::new(), 64)?.search(&costs)?;
    assert_eq!(first.best_index, Some(0));
    assert_eq!(second.best_index, first.best_index);
    assert_eq!(first.plan.as_ref().map(|p| p.targets.len()), Some(2));

    let combiner = SelectionBiasCombiner::default();
    let best = combiner.best(&costs, &first.table, first.shots);
    assert!(best.is_some());
    Ok(())
}

#[test]
fn test_no_path_gives_empty_results() -> Result<(), RouteError> {
    let graph = RoadGraph::demo();
    let candidates = enumerate_candidates(&graph, "D", "A", 10)?;
    assert!(candidates.is_empty());
    let outcome = seeded(32).search(&[])?;
    assert!(outcome.table.is_empty());
    assert_eq!(SelectionBiasCombiner::default().best(&[], &outcome.table, 32), None);
    Ok(())
}
