//! Numeric constants shared by the search and traffic layers.

/// Defaults and tolerances for route selection.
pub mod route_constants {
    /// Shots requested from the executor when none are configured.
    pub const DEFAULT_SHOTS: u32 = 1024;
    /// Candidate-path limit `k` when none is configured.
    pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;
    /// Lower bound on a measured probability before it divides a cost.
    pub const PROBABILITY_FLOOR: f64 = 1e-6;
    /// Two classical costs closer than this are treated as tied.
    pub const COST_TIE_TOLERANCE: f64 = 1e-9;
    /// Largest register the bundled statevector executor accepts.
    pub const MAX_QUBITS: usize = 20;
    /// Progress at or beyond `1.0 - PROGRESS_TOLERANCE` counts as complete.
    pub const PROGRESS_TOLERANCE: f64 = 1e-9;
    /// Number of display colour slots agents cycle through.
    pub const PALETTE_SIZE: usize = 10;
}
