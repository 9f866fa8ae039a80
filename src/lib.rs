// src/lib.rs

//! `qroute` - Quantum-biased path selection for road networks
//!
//! Candidate routes between two nodes are enumerated classically, scored by
//! travel cost plus congestion, and biased by an amplitude-amplification
//! search that marks the cheapest routes. A tick-driven loop keeps a set of
//! agents travelling those routes and feeds their congestion back into
//! the costs.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod graph;
pub mod cost;
pub mod search;
pub mod selection;
pub mod traffic;
pub mod config;

// Re-export the most common types for easier top-level use
pub use crate::core::{QubitId, AmplitudeState, RouteError};
pub use operations::Gate;
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{CircuitExecutor, OutcomeCounts, Simulator};
pub use validation::{check_normalization, validate_outcome_counts};
pub use graph::{CandidatePath, EdgeKey, RoadGraph, enumerate_candidates};
pub use cost::{CongestionTable, CostModel};
pub use search::{AmplitudeSearch, OutcomeFrequencyTable, SearchOutcome, SearchPlan};
pub use selection::{SelectionBiasCombiner, SelectionScore};
pub use traffic::{Agent, AgentId, RouteAssignmentLoop, TickReport};
pub use config::SimulationConfig;

// Example 1: Two-qubit amplitude amplification
// One oracle + diffuser round on two qubits moves all amplitude onto |11>.
/// ```
/// use qroute::{CircuitBuilder, CircuitExecutor, Gate, QubitId, RouteError, Simulator};
///
/// let q0 = QubitId(0);
/// let q1 = QubitId(1);
///
/// let circuit = CircuitBuilder::new(2)
///     .hadamard_all()
///     // Oracle: phase-flip |11>
///     .add_gate(Gate::ControlledPhaseFlip { controls: vec![q0], target: q1 })
///     // Diffuser
///     .hadamard_all()
///     .bit_flip_all()
///     .phase_flip_all_ones()
///     .bit_flip_all()
///     .hadamard_all()
///     .measure_all()
///     .build();
///
/// let counts = Simulator::with_seed(1).execute(&circuit, 200)?;
/// println!("Circuit:\n{}", circuit);
/// println!("Counts:\n{}", counts);
/// assert_eq!(counts.get("11"), 200);
/// # Ok::<(), RouteError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Route selection on the diamond network
// Both routes cost 3, so both are marked and the first one is the classical best.
/// ```
/// use qroute::{RoadGraph, RouteAssignmentLoop, RouteError, SimulationConfig};
///
/// let config = SimulationConfig { agent_count: 2, seed: Some(5), ..SimulationConfig::default() };
/// let mut sim = RouteAssignmentLoop::with_simulator(RoadGraph::demo(), config)?;
///
/// assert_eq!(sim.candidates().len(), 2);
/// let outcome = sim.search_outcome().expect("initial search ran");
/// assert_eq!(outcome.best_index, Some(0));
/// assert_eq!(outcome.table.observed() + outcome.table.discarded(), 1024);
///
/// for _ in 0..10 {
///     let report = sim.tick()?;
///     assert_eq!(report.congestion_total, 2);
/// }
/// # Ok::<(), RouteError>(())
/// ```
#[doc(hidden)]
const _: () = ();
