// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;
pub mod constants;

// Re-export public types for convenient access via `qroute::core::TypeName`
pub use error::{QubitId, RouteError};
pub use state::AmplitudeState;
pub use constants::route_constants::{
    COST_TIE_TOLERANCE, DEFAULT_CANDIDATE_LIMIT, DEFAULT_SHOTS, MAX_QUBITS, PALETTE_SIZE,
    PROBABILITY_FLOOR, PROGRESS_TOLERANCE,
};
