// src/core/state.rs

use num_complex::Complex;
use std::fmt;

/// Dense amplitude vector over the `2^n` basis states of an `n`-qubit register.
///
/// Basis index `k` has qubit `i` in state `|1>` exactly when bit `i` of `k`
/// is set. The engine keeps the vector normalized; `validation::check_normalization`
/// verifies it.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct AmplitudeState {
    amplitudes: Vec<Complex<f64>>,
}

impl AmplitudeState {
    /// Wraps an existing amplitude vector. The caller is responsible for the
    /// vector length being a power of two.
    pub fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states represented.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Born-rule probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }
}

impl fmt::Display for AmplitudeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amplitudes[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
