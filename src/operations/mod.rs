// src/operations/mod.rs

//! Gate descriptors handed to a circuit executor.
//!
//! A `Gate` carries no behaviour of its own: it names a transformation and
//! the qubits it touches. Interpretation belongs to whichever
//! `CircuitExecutor` runs the circuit, which keeps circuit construction
//! deterministic and testable without a simulator.

use crate::core::QubitId;

/// A single step of an amplitude-amplification circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard: maps `|0>` to `|+>` and `|1>` to `|->`.
    Hadamard {
        /// Qubit the gate acts on.
        target: QubitId,
    },

    /// Bit flip (Pauli-X).
    BitFlip {
        /// Qubit the gate acts on.
        target: QubitId,
    },

    /// Phase flip (Pauli-Z): negates the `|1>` amplitude.
    PhaseFlip {
        /// Qubit the gate acts on.
        target: QubitId,
    },

    /// Multi-controlled phase flip: negates the amplitude of every basis
    /// state in which all `controls` and the `target` are `|1>`.
    /// The gate is symmetric in its qubits; the split only mirrors how it is
    /// usually drawn.
    ControlledPhaseFlip {
        /// Control qubits.
        controls: Vec<QubitId>,
        /// Target qubit.
        target: QubitId,
    },

    /// Measure the listed qubits. Must be the final gate of a circuit.
    Measure {
        /// Qubits to measure, in any order.
        targets: Vec<QubitId>,
    },
}

impl Gate {
    /// Returns every qubit mentioned by the gate.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::Hadamard { target } | Gate::BitFlip { target } | Gate::PhaseFlip { target } => {
                vec![*target]
            }
            Gate::ControlledPhaseFlip { controls, target } => {
                let mut qubits = controls.clone();
                qubits.push(*target);
                qubits
            }
            Gate::Measure { targets } => targets.clone(),
        }
    }

    /// Short symbol used by the circuit diagram.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::Hadamard { .. } => "H",
            Gate::BitFlip { .. } => "X",
            Gate::PhaseFlip { .. } => "Z",
            Gate::ControlledPhaseFlip { .. } => "Z",
            Gate::Measure { .. } => "M",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controlled_phase_flip_lists_controls_then_target() {
        let gate = Gate::ControlledPhaseFlip {
            controls: vec![QubitId(0), QubitId(1)],
            target: QubitId(2),
        };
        assert_eq!(gate.involved_qubits(), vec![QubitId(0), QubitId(1), QubitId(2)]);
    }
}
