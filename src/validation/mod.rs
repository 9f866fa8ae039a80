// src/validation/mod.rs

//! Checks on amplitude states and on tables returned by circuit executors.

use crate::core::{AmplitudeState, RouteError};
use crate::simulation::OutcomeCounts;

const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that the squared amplitudes sum to 1.0.
///
/// # Arguments
/// * `state` - The state to check.
/// * `tolerance` - Allowed deviation from 1.0; `None` uses 1e-9.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(RouteError::SimulationError)` otherwise.
pub fn check_normalization(state: &AmplitudeState, tolerance: Option<f64>) -> Result<(), RouteError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.vector().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        return Err(RouteError::simulation(format!(
            "State vector norm deviated from 1: {} (tolerance {})",
            norm_sq, effective_tolerance
        )));
    }
    Ok(())
}

/// Checks that an executor honoured its contract: every key is a binary
/// pattern exactly `width` characters long and the counts sum to `shots`.
///
/// # Errors
/// `RouteError::ExecutorFailure` describing the first violation found.
pub fn validate_outcome_counts(counts: &OutcomeCounts, width: usize, shots: u32) -> Result<(), RouteError> {
    for (bits, _) in counts.iter() {
        if bits.len() != width {
            return Err(RouteError::executor(format!(
                "outcome '{}' has width {}, expected {}",
                bits,
                bits.len(),
                width
            )));
        }
        if !bits.chars().all(|c| c == '0' || c == '1') {
            return Err(RouteError::executor(format!("outcome '{}' is not a bit-pattern", bits)));
        }
    }
    let total = counts.total();
    if total != u64::from(shots) {
        return Err(RouteError::executor(format!(
            "outcome counts sum to {}, expected {} shots",
            total, shots
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_normalized_state_passes() {
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        assert!(check_normalization(&AmplitudeState::new(vec![h, h]), None).is_ok());
    }

    #[test]
    fn test_unnormalized_state_fails() {
        let one = Complex::new(1.0, 0.0);
        let state = AmplitudeState::new(vec![one, one]);
        assert!(matches!(check_normalization(&state, None), Err(RouteError::SimulationError { .. })));
    }

    #[test]
    fn test_well_formed_counts_pass() {
        let counts: OutcomeCounts = [("00", 3), ("11", 5)].into_iter().collect();
        assert!(validate_outcome_counts(&counts, 2, 8).is_ok());
    }

    #[test]
    fn test_wrong_width_fails() {
        let counts: OutcomeCounts = [("0", 8)].into_iter().collect();
        assert!(matches!(validate_outcome_counts(&counts, 2, 8), Err(RouteError::ExecutorFailure { .. })));
    }

    #[test]
    fn test_non_binary_key_fails() {
        let counts: OutcomeCounts = [("0x", 8)].into_iter().collect();
        assert!(matches!(validate_outcome_counts(&counts, 2, 8), Err(RouteError::ExecutorFailure { .. })));
    }

    #[test]
    fn test_short_total_fails() {
        let counts: OutcomeCounts = [("01", 7)].into_iter().collect();
        assert!(matches!(validate_outcome_counts(&counts, 2, 8), Err(RouteError::ExecutorFailure { .. })));
    }
}
