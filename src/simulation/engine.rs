// src/simulation/engine.rs
use crate::core::{AmplitudeState, QubitId, RouteError, MAX_QUBITS};
use crate::operations::Gate;
use crate::simulation::OutcomeCounts;
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;
use std::f64::consts::FRAC_1_SQRT_2;

/// Dense statevector engine backing `Simulator`.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// Register amplitudes, dimension `2^num_qubits`.
    state: AmplitudeState,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes an `num_qubits`-wide register in `|0...0>`.
    pub(crate) fn init(num_qubits: usize) -> Result<Self, RouteError> {
        if num_qubits == 0 {
            return Err(RouteError::simulation("Cannot initialize simulation engine with zero qubits"));
        }
        if num_qubits > MAX_QUBITS {
            return Err(RouteError::invalid_parameter(
                "num_qubits",
                format!("{} qubits exceeds the executor limit of {}", num_qubits, MAX_QUBITS),
            ));
        }
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| {
            RouteError::simulation("Number of qubits too large, state vector dimension overflows usize")
        })?;

        let mut initial = vec![Complex::zero(); dim];
        initial[0] = Complex::new(1.0, 0.0);

        Ok(Self {
            state: AmplitudeState::new(initial),
            num_qubits,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: AmplitudeState) -> Result<(), RouteError> {
        if state.dim() != self.state.dim() {
            return Err(RouteError::simulation(format!(
                "Cannot set state: provided dimension {} does not match engine dimension {}",
                state.dim(),
                self.state.dim()
            )));
        }
        self.state = state;
        Ok(())
    }

    pub(crate) fn state(&self) -> &AmplitudeState {
        &self.state
    }

    /// Applies a single unitary gate to the register.
    pub(crate) fn apply_gate(&mut self, gate: &Gate) -> Result<(), RouteError> {
        match gate {
            Gate::Hadamard { target } => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                self.apply_single_qubit_gate(*target, &[[h, h], [h, -h]])
            }
            Gate::BitFlip { target } => {
                let one = Complex::new(1.0, 0.0);
                self.apply_single_qubit_gate(*target, &[[Complex::zero(), one], [one, Complex::zero()]])
            }
            Gate::PhaseFlip { target } => {
                let one = Complex::new(1.0, 0.0);
                self.apply_single_qubit_gate(*target, &[[one, Complex::zero()], [Complex::zero(), -one]])
            }
            Gate::ControlledPhaseFlip { controls, target } => {
                let mut mask = self.bit_mask(*target)?;
                for control in controls {
                    let control_mask = self.bit_mask(*control)?;
                    if control == target {
                        return Err(RouteError::simulation(format!(
                            "{} cannot be both control and target of a phase flip",
                            target
                        )));
                    }
                    mask |= control_mask;
                }
                for (k, amp) in self.state.vector_mut().iter_mut().enumerate() {
                    if k & mask == mask {
                        *amp = -*amp;
                    }
                }
                Ok(())
            }
            Gate::Measure { .. } => Err(RouteError::simulation(
                "Measure must be the final gate and is not applied as a unitary",
            )),
        }
    }

    /// Samples `shots` Born-rule outcomes of the given qubits.
    pub(crate) fn sample<R: Rng>(
        &self,
        targets: &[QubitId],
        shots: u32,
        rng: &mut R,
    ) -> Result<OutcomeCounts, RouteError> {
        let mut ordered: Vec<QubitId> = targets.to_vec();
        ordered.sort();
        ordered.dedup();
        for q in &ordered {
            self.bit_mask(*q)?;
        }
        // Most significant measured qubit is written first
        ordered.reverse();

        let mut cumulative = Vec::with_capacity(self.state.dim());
        let mut running = 0.0_f64;
        for p in self.state.probabilities() {
            running += p;
            cumulative.push(running);
        }
        if !(running.is_finite() && running > 0.0) {
            return Err(RouteError::simulation(format!("Cannot sample from a state with total probability {}", running)));
        }

        let mut hits = vec![0u64; self.state.dim()];
        for _ in 0..shots {
            let draw = rng.random::<f64>() * running;
            let k = cumulative.partition_point(|&c| c <= draw).min(cumulative.len() - 1);
            hits[k] += 1;
        }

        let mut counts = OutcomeCounts::new();
        for (k, hit) in hits.into_iter().enumerate() {
            if hit == 0 {
                continue;
            }
            let bits: String = ordered.iter().map(|q| if (k >> q.0) & 1 == 1 { '1' } else { '0' }).collect();
            counts.record(bits, hit);
        }
        Ok(counts)
    }

    fn bit_mask(&self, qubit: QubitId) -> Result<usize, RouteError> {
        if qubit.0 >= self.num_qubits {
            return Err(RouteError::simulation(format!(
                "{} is outside the {}-qubit register",
                qubit, self.num_qubits
            )));
        }
        Ok(1 << qubit.0)
    }

    /// Applies a 2x2 matrix to one qubit of the register.
    fn apply_single_qubit_gate(&mut self, target: QubitId, matrix: &[[Complex<f64>; 2]; 2]) -> Result<(), RouteError> {
        let k_mask = self.bit_mask(target)?;
        let lower_mask = k_mask - 1;
        let upper_mask = !lower_mask;

        let dim = self.state.dim();
        let amplitudes = self.state.vector_mut();

        // Visit each pair of basis states differing only at the target bit
        for i in 0..dim / 2 {
            let i0 = ((i & upper_mask) << 1) | (i & lower_mask);
            let i1 = i0 | k_mask;

            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];

            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }
}
