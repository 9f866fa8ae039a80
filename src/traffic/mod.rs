// src/traffic/mod.rs

//! Agent-based route assignment with congestion feedback.
//!
//! `RouteAssignmentLoop` owns the whole simulation state. Each `tick` tallies
//! the edge every agent occupies into a fresh `CongestionTable`, then walks
//! the agents in creation order: agents that finished their path are given a
//! new one scored against that snapshot, the rest move forward.

mod agent;

pub use agent::{Agent, AgentId};

use crate::config::SimulationConfig;
use crate::cost::{CongestionTable, CostModel};
use crate::core::RouteError;
use crate::graph::{CandidatePath, RoadGraph, enumerate_candidates};
use crate::search::{AmplitudeSearch, SearchOutcome};
use crate::selection::{SelectionBiasCombiner, SelectionScore};
use crate::simulation::{CircuitExecutor, Simulator};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CandidateKey {
    graph_epoch: u64,
    start: String,
    end: String,
    k: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchKey {
    candidates: CandidateKey,
    shots: u32,
}

/// Changes requested between ticks.
#[derive(Debug, Default)]
struct PendingChanges {
    graph: Option<RoadGraph>,
    endpoints: Option<(String, String)>,
    k: Option<usize>,
    shots: Option<u32>,
    agent_count: Option<usize>,
}

impl PendingChanges {
    fn is_empty(&self) -> bool {
        self.graph.is_none()
            && self.endpoints.is_none()
            && self.k.is_none()
            && self.shots.is_none()
            && self.agent_count.is_none()
    }
}

/// Freshly computed cache entries; `None` keeps the cached value.
struct CacheUpdate {
    candidates: Option<(CandidateKey, Vec<CandidatePath>)>,
    outcome: Option<(SearchKey, SearchOutcome)>,
}

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Agents handed a new path this tick, in creation order.
    pub reassigned: Vec<AgentId>,
    /// Total of the congestion snapshot taken at the start of the tick.
    pub congestion_total: u64,
}

/// The simulation driver.
#[derive(Debug)]
pub struct RouteAssignmentLoop<E: CircuitExecutor = Simulator> {
    graph: RoadGraph,
    graph_epoch: u64,
    config: SimulationConfig,
    cost_model: CostModel,
    combiner: SelectionBiasCombiner,
    search: AmplitudeSearch<E>,
    candidates: Option<(CandidateKey, Vec<CandidatePath>)>,
    outcome: Option<(SearchKey, SearchOutcome)>,
    agents: Vec<Agent>,
    congestion: CongestionTable,
    ticks: u64,
    pending: PendingChanges,
}

impl RouteAssignmentLoop<Simulator> {
    /// Builds a loop backed by the bundled simulator, seeded from `config.seed`.
    pub fn with_simulator(graph: RoadGraph, config: SimulationConfig) -> Result<Self, RouteError> {
        let simulator = match config.seed {
            Some(seed) => Simulator::with_seed(seed),
            None => Simulator::new(),
        };
        Self::new(graph, config, simulator)
    }
}

impl<E: CircuitExecutor> RouteAssignmentLoop<E> {
    /// Validates `config` against `graph`, enumerates candidates, runs the
    /// initial search and places `config.agent_count` agents.
    ///
    /// # Errors
    /// * `InvalidParameter` for an invalid config.
    /// * `UnknownNode` if an endpoint is not in `graph`.
    /// * `ExecutorFailure` if the initial search fails.
    pub fn new(graph: RoadGraph, config: SimulationConfig, executor: E) -> Result<Self, RouteError> {
        config.validate()?;
        graph.node_index(&config.start)?;
        graph.node_index(&config.end)?;

        let mut simulation = Self {
            cost_model: CostModel::new(config.congestion_penalty)?,
            combiner: SelectionBiasCombiner::new(config.probability_floor)?,
            search: AmplitudeSearch::new(executor, config.shots)?,
            graph,
            graph_epoch: 0,
            config,
            candidates: None,
            outcome: None,
            agents: Vec::new(),
            congestion: CongestionTable::new(),
            ticks: 0,
            pending: PendingChanges::default(),
        };
        let update = simulation.prepare_caches(
            &simulation.graph,
            simulation.candidate_key(),
            simulation.config.shots,
            false,
        )?;
        simulation.commit_caches(update);
        simulation.spawn_agents()?;
        simulation.congestion = simulation.tally_congestion();
        Ok(simulation)
    }

    /// Advances the simulation by one tick.
    ///
    /// Pending parameter changes are applied first. Agents are then processed
    /// in creation order against one congestion snapshot.
    pub fn tick(&mut self) -> Result<TickReport, RouteError> {
        self.apply_pending()?;

        self.congestion = self.tally_congestion();
        let step = self.config.progress_step;
        let mut reassigned = Vec::new();

        for i in 0..self.agents.len() {
            let agent = &self.agents[i];
            if agent.is_complete() || !agent.is_routed() {
                let path = self.select_path(&self.congestion)?;
                let agent = &mut self.agents[i];
                if path.is_empty() && !agent.is_routed() {
                    continue;
                }
                debug!(agent = %agent.id(), path = %path, "reassigned");
                reassigned.push(agent.id());
                agent.reassign(path);
            } else {
                self.agents[i].advance(step);
            }
        }

        self.ticks += 1;
        Ok(TickReport {
            tick: self.ticks,
            reassigned,
            congestion_total: self.congestion.total(),
        })
    }

    /// Requests a new candidate limit, applied at the next tick.
    pub fn request_k(&mut self, k: usize) -> Result<(), RouteError> {
        if k == 0 {
            return Err(RouteError::invalid_parameter("k", "candidate limit must be positive"));
        }
        self.pending.k = Some(k);
        Ok(())
    }

    /// Requests a new shot count, applied at the next tick.
    pub fn request_shots(&mut self, shots: u32) -> Result<(), RouteError> {
        if shots == 0 {
            return Err(RouteError::invalid_parameter("shots", "shot count must be positive"));
        }
        self.pending.shots = Some(shots);
        Ok(())
    }

    /// Requests a new agent set of `count` agents, applied at the next tick.
    pub fn request_agent_count(&mut self, count: usize) -> Result<(), RouteError> {
        if count == 0 {
            return Err(RouteError::invalid_parameter("agent_count", "agent count must be positive"));
        }
        self.pending.agent_count = Some(count);
        Ok(())
    }

    /// Requests new endpoints, applied at the next tick.
    ///
    /// # Errors
    /// `InvalidParameter` if `start == end`, `UnknownNode` if either is
    /// missing from the graph the change will apply to.
    pub fn request_endpoints(&mut self, start: &str, end: &str) -> Result<(), RouteError> {
        if start == end {
            return Err(RouteError::invalid_parameter("end", "start and end must differ"));
        }
        let target = self.pending.graph.as_ref().unwrap_or(&self.graph);
        target.node_index(start)?;
        target.node_index(end)?;
        self.pending.endpoints = Some((start.to_string(), end.to_string()));
        Ok(())
    }

    /// Requests a graph switch, applied at the next tick.
    ///
    /// # Errors
    /// `UnknownNode` if the new graph lacks the endpoints in effect.
    pub fn request_graph(&mut self, graph: RoadGraph) -> Result<(), RouteError> {
        let (start, end) = match &self.pending.endpoints {
            Some((s, e)) => (s.as_str(), e.as_str()),
            None => (self.config.start.as_str(), self.config.end.as_str()),
        };
        graph.node_index(start)?;
        graph.node_index(end)?;
        self.pending.graph = Some(graph);
        Ok(())
    }

    /// Returns `true` if changes are waiting for the next tick.
    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Re-invokes the executor for the current candidates, replacing the
    /// cached outcome. On failure the previous outcome stays in use.
    pub fn rerun_search(&mut self) -> Result<&SearchOutcome, RouteError> {
        let update = self.prepare_caches(&self.graph, self.candidate_key(), self.config.shots, true)?;
        self.commit_caches(update);
        self.search_outcome()
            .ok_or_else(|| RouteError::executor("search produced no outcome"))
    }

    /// Agents in creation order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Agents that currently have a path.
    pub fn routed_agent_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_routed()).count()
    }

    /// Congestion snapshot of the latest tick.
    pub fn congestion(&self) -> &CongestionTable {
        &self.congestion
    }

    /// Cached candidate paths, cheapest first.
    pub fn candidates(&self) -> &[CandidatePath] {
        self.candidates.as_ref().map(|(_, c)| c.as_slice()).unwrap_or(&[])
    }

    /// Latest search outcome.
    pub fn search_outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref().map(|(_, o)| o)
    }

    /// Cheapest candidate by static cost, as marked by the search.
    pub fn best_classical_path(&self) -> Option<&CandidatePath> {
        let best = self.search_outcome()?.best_index?;
        self.candidates().get(best)
    }

    /// Candidate costs under the latest congestion snapshot.
    pub fn candidate_costs(&self) -> Result<Vec<f64>, RouteError> {
        self.cost_model.costs(&self.graph, self.candidates(), &self.congestion)
    }

    /// Selection scores under the latest congestion snapshot.
    pub fn scores(&self) -> Result<Vec<SelectionScore>, RouteError> {
        let costs = self.candidate_costs()?;
        Ok(match self.search_outcome() {
            Some(outcome) => self.combiner.rank(&costs, &outcome.table, outcome.shots),
            None => Vec::new(),
        })
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Graph in use.
    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    /// Parameters in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn candidate_key(&self) -> CandidateKey {
        CandidateKey {
            graph_epoch: self.graph_epoch,
            start: self.config.start.clone(),
            end: self.config.end.clone(),
            k: self.config.k,
        }
    }

    /// Enumerates and searches wherever `key` and `shots` differ from what
    /// is cached. Nothing is stored: the caller commits the update once
    /// every fallible step has succeeded.
    fn prepare_caches(
        &self,
        graph: &RoadGraph,
        key: CandidateKey,
        shots: u32,
        force_search: bool,
    ) -> Result<CacheUpdate, RouteError> {
        let fresh = if self.candidates.as_ref().is_none_or(|(cached, _)| *cached != key) {
            let paths = enumerate_candidates(graph, &key.start, &key.end, key.k)?;
            info!(count = paths.len(), start = %key.start, end = %key.end, k = key.k, "enumerated candidates");
            Some((key.clone(), paths))
        } else {
            debug!(k = key.k, "reusing cached candidates");
            None
        };
        let candidates = match &fresh {
            Some((_, paths)) => paths.as_slice(),
            None => self.candidates(),
        };

        let search_key = SearchKey { candidates: key, shots };
        let outcome = if force_search || self.outcome.as_ref().is_none_or(|(cached, _)| *cached != search_key) {
            let static_costs = self.cost_model.costs(graph, candidates, &CongestionTable::new())?;
            let outcome = self.search.search_with_shots(&static_costs, shots)?;
            info!(best_index = ?outcome.best_index, shots = outcome.shots, "search table refreshed");
            Some((search_key, outcome))
        } else {
            None
        };

        Ok(CacheUpdate {
            candidates: fresh,
            outcome,
        })
    }

    fn commit_caches(&mut self, update: CacheUpdate) {
        if let Some(candidates) = update.candidates {
            self.candidates = Some(candidates);
        }
        if let Some(outcome) = update.outcome {
            self.outcome = Some(outcome);
        }
    }

    /// Applies queued changes. The new caches are built first; if that
    /// fails the changes stay queued and the current state is untouched.
    fn apply_pending(&mut self) -> Result<(), RouteError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let graph = self.pending.graph.as_ref().unwrap_or(&self.graph);
        let graph_epoch = if self.pending.graph.is_some() {
            self.graph_epoch + 1
        } else {
            self.graph_epoch
        };
        let (start, end) = self
            .pending
            .endpoints
            .clone()
            .unwrap_or_else(|| (self.config.start.clone(), self.config.end.clone()));
        let key = CandidateKey {
            graph_epoch,
            start,
            end,
            k: self.pending.k.unwrap_or(self.config.k),
        };
        let shots = self.pending.shots.unwrap_or(self.config.shots);
        let update = self.prepare_caches(graph, key, shots, false)?;
        self.search.set_shots(shots)?;

        let pending = std::mem::take(&mut self.pending);
        let mut replace_agents = false;

        if let Some(graph) = pending.graph {
            self.graph = graph;
            self.graph_epoch = graph_epoch;
            replace_agents = true;
            info!(epoch = self.graph_epoch, nodes = self.graph.node_count(), "switched graph");
        }
        if let Some((start, end)) = pending.endpoints {
            info!(%start, %end, "changed endpoints");
            self.config.start = start;
            self.config.end = end;
            replace_agents = true;
        }
        if let Some(k) = pending.k {
            info!(k, "changed candidate limit");
            self.config.k = k;
        }
        if let Some(shots) = pending.shots {
            info!(shots, "changed shot count");
            self.config.shots = shots;
        }
        if let Some(count) = pending.agent_count {
            info!(count, "changed agent count");
            self.config.agent_count = count;
            replace_agents = true;
        }

        self.commit_caches(update);
        if replace_agents {
            self.spawn_agents()?;
        }
        Ok(())
    }

    /// Replaces the agent set. Initial paths are chosen without congestion.
    fn spawn_agents(&mut self) -> Result<(), RouteError> {
        let path = self.select_path(&CongestionTable::new())?;
        let hold_per_agent = self.config.departure_stagger / self.config.progress_step;
        self.agents = (0..self.config.agent_count)
            .map(|i| {
                let hold = (i as f64 * hold_per_agent).round() as u32;
                Agent::new(AgentId(i), path.clone(), hold)
            })
            .collect();
        info!(count = self.agents.len(), path = %path, "placed agents");
        Ok(())
    }

    fn tally_congestion(&self) -> CongestionTable {
        self.agents.iter().filter_map(Agent::occupied_edge).collect()
    }

    /// Best-scoring candidate under `congestion`, or the empty path when
    /// there are no candidates.
    fn select_path(&self, congestion: &CongestionTable) -> Result<CandidatePath, RouteError> {
        let candidates = self.candidates();
        let Some(outcome) = self.search_outcome() else {
            return Ok(CandidatePath::empty());
        };
        let costs = self.cost_model.costs(&self.graph, candidates, congestion)?;
        Ok(self
            .combiner
            .best(&costs, &outcome.table, outcome.shots)
            .and_then(|i| candidates.get(i).cloned())
            .unwrap_or_else(CandidatePath::empty))
    }
}
