//! Example: agents routed across an eight-node city grid.
//! Candidate routes from A to H are searched once, then agents travel and
//! re-choose routes as congestion builds up.

use qroute::{RoadGraph, RouteAssignmentLoop, SimulationConfig};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
start = "A"
end = "H"
k = 6
shots = 1024
agent_count = 6
progress_step = 0.05
departure_stagger = 0.15
congestion_penalty = 1.5
seed = 42
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qroute=info")))
        .init();

    let config = SimulationConfig::from_toml_str(CONFIG)?;
    println!("--- qroute Example: City Traffic ({} -> {}) ---", config.start, config.end);

    let mut sim = RouteAssignmentLoop::with_simulator(RoadGraph::city_grid(), config)?;

    println!("\nCandidates:");
    for (i, (path, cost)) in sim.candidates().iter().zip(sim.candidate_costs()?).enumerate() {
        println!("  [{}] {} (cost {:.1})", i, path, cost);
    }

    if let Some(outcome) = sim.search_outcome() {
        if let Some(plan) = &outcome.plan {
            println!("\nSearch circuit ({} qubits, {} round(s)):\n{}", plan.num_qubits, plan.iterations, plan.circuit);
        }
        println!("{}", outcome.table);
    }
    if let Some(best) = sim.best_classical_path() {
        println!("Cheapest route without traffic: {}", best);
    }

    for _ in 0..100 {
        let report = sim.tick()?;
        if report.tick % 10 == 0 || !report.reassigned.is_empty() {
            println!("tick {:>3}: {}", report.tick, sim.congestion());
            for id in &report.reassigned {
                let agent = &sim.agents()[id.0];
                println!("          {} -> {}", id, agent.path());
            }
        }
    }

    println!("\nFinal scores:");
    for score in sim.scores()? {
        println!(
            "  [{}] cost {:>5.1}  p {:.4}  score {:>9.2}",
            score.index, score.cost, score.probability, score.score
        );
    }

    Ok(())
}
