// src/simulation/mod.rs

//! Executes `qroute::circuits::Circuit` descriptions.
//!
//! Route selection only needs *some* collaborator that turns a circuit and a
//! shot count into an outcome table; that seam is the `CircuitExecutor`
//! trait. `Simulator` is the bundled implementation, a dense statevector
//! simulator with seedable sampling.

mod results;
pub(crate) mod engine;

pub use results::OutcomeCounts;

use crate::circuits::Circuit;
use crate::core::{AmplitudeState, RouteError};
use crate::operations::Gate;
use engine::SimulationEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

/// Anything able to run a measured circuit for a number of shots.
///
/// Implementations must return a table whose counts sum to `shots` and whose
/// keys are bit-patterns as wide as the measured register; `AmplitudeSearch`
/// validates this and reports `RouteError::ExecutorFailure` otherwise.
pub trait CircuitExecutor {
    /// Runs `circuit` `shots` times and tallies the measured bit-patterns.
    fn execute(&self, circuit: &Circuit, shots: u32) -> Result<OutcomeCounts, RouteError>;
}

impl<E: CircuitExecutor + ?Sized> CircuitExecutor for &E {
    fn execute(&self, circuit: &Circuit, shots: u32) -> Result<OutcomeCounts, RouteError> {
        (**self).execute(circuit, shots)
    }
}

impl<E: CircuitExecutor + ?Sized> CircuitExecutor for Box<E> {
    fn execute(&self, circuit: &Circuit, shots: u32) -> Result<OutcomeCounts, RouteError> {
        (**self).execute(circuit, shots)
    }
}

/// Statevector executor.
///
/// With a seed every call to `execute` replays the same random stream, so
/// identical circuits yield identical tables. Without one, each call draws a
/// fresh seed from the operating system.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    seed: Option<u64>,
}

impl Simulator {
    /// Creates an unseeded simulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator whose sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Seed in use, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Evolves the register through every unitary gate of `circuit` and
    /// returns the pre-measurement amplitudes. A trailing `Measure` is ignored.
    pub fn final_state(&self, circuit: &Circuit) -> Result<AmplitudeState, RouteError> {
        Ok(self.evolve(circuit)?.state().clone())
    }

    fn evolve(&self, circuit: &Circuit) -> Result<SimulationEngine, RouteError> {
        let mut engine = SimulationEngine::init(circuit.num_qubits())?;
        let gates = circuit.gates();
        for (position, gate) in gates.iter().enumerate() {
            match gate {
                Gate::Measure { .. } if position + 1 == gates.len() => {}
                _ => engine.apply_gate(gate)?,
            }
        }
        Ok(engine)
    }
}

impl CircuitExecutor for Simulator {
    fn execute(&self, circuit: &Circuit, shots: u32) -> Result<OutcomeCounts, RouteError> {
        if shots == 0 {
            return Err(RouteError::invalid_parameter("shots", "shot count must be positive"));
        }
        let targets = circuit
            .measured_qubits()
            .ok_or_else(|| RouteError::simulation("Circuit has no trailing measurement"))?
            .to_vec();

        let engine = self.evolve(circuit)?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let counts = engine.sample(&targets, shots, &mut rng)?;
        debug!(
            qubits = circuit.num_qubits(),
            gates = circuit.len(),
            shots,
            distinct = counts.len(),
            "executed circuit"
        );
        Ok(counts)
    }
}
