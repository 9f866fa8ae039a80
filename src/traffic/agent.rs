// src/traffic/agent.rs

use crate::core::{PALETTE_SIZE, PROGRESS_TOLERANCE};
use crate::graph::{CandidatePath, EdgeKey};
use std::fmt;

/// Identifier of an agent, equal to its creation order within the agent set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub usize);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent-{}", self.0)
    }
}

/// A vehicle travelling a candidate path.
///
/// `progress` is the fraction of the path covered. It lives in `[0, 1)`
/// while travelling and reaches 1 on arrival, after which the loop resets
/// it and hands the agent a new path.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    id: AgentId,
    path: CandidatePath,
    progress: f64,
    hold_ticks: u32,
    color: usize,
}

impl Agent {
    pub(crate) fn new(id: AgentId, path: CandidatePath, hold_ticks: u32) -> Self {
        Self {
            id,
            path,
            progress: 0.0,
            hold_ticks,
            color: id.0 % PALETTE_SIZE,
        }
    }

    /// Identifier.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Path currently assigned. Empty while no route exists.
    pub fn path(&self) -> &CandidatePath {
        &self.path
    }

    /// Fraction of the path covered.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Ticks left before the agent starts moving.
    pub fn hold_ticks(&self) -> u32 {
        self.hold_ticks
    }

    /// Palette slot for display.
    pub fn color(&self) -> usize {
        self.color
    }

    /// Returns `true` if the agent has a path to travel.
    pub fn is_routed(&self) -> bool {
        self.path.edge_count() > 0
    }

    /// Returns `true` once the end of the path has been reached.
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0 - PROGRESS_TOLERANCE
    }

    /// Edge the agent is on: edge `floor(progress * edges)`, clamped to the
    /// last edge so an arrived agent still occupies its final edge.
    pub fn occupied_edge(&self) -> Option<EdgeKey> {
        let edges = self.path.edge_count();
        if edges == 0 {
            return None;
        }
        let idx = ((self.progress.max(0.0) * edges as f64).floor() as usize).min(edges - 1);
        self.path.edge_at(idx)
    }

    /// Moves along the path, or waits out the departure hold.
    pub(crate) fn advance(&mut self, step: f64) {
        if self.hold_ticks > 0 {
            self.hold_ticks -= 1;
            return;
        }
        self.progress = (self.progress + step).min(1.0);
    }

    /// Starts over on `path`.
    pub(crate) fn reassign(&mut self, path: CandidatePath) {
        self.path = path;
        self.progress = 0.0;
    }
}
