//! Example: amplitude-amplification search over eight candidates (3 qubits).
//! Builds the oracle and diffuser from gate descriptors, prints the circuit,
//! then runs it on the bundled simulator.

use qroute::search::{build_search_circuit, decode_outcomes};
use qroute::{CircuitExecutor, Simulator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qroute=debug")))
        .init();

    println!("--- qroute Example: Amplitude Search (8 candidates - find index 5) ---");

    // Eight candidates fill a 3-qubit register exactly, so nothing is discarded.
    // Optimal rounds for one marked index: floor((pi/4) * sqrt(8)) = 2.
    let candidate_count = 8;
    let target = 5;
    let plan = build_search_circuit(candidate_count, &[target])?;

    println!(
        "\nSearch circuit ({} qubits, {} round(s)):\n{}",
        plan.num_qubits, plan.iterations, plan.circuit
    );

    let shots = 1000;
    let simulator = Simulator::with_seed(2025);
    println!("Running simulator...");
    let counts = simulator.execute(&plan.circuit, shots)?;
    println!("\nRaw counts:\n{}", counts);

    let table = decode_outcomes(&counts, candidate_count)?;
    println!("{}", table);

    let hits = table.relative_frequency(target);
    println!("Analysis:");
    println!("- Marked index {} was measured {:.1}% of the time", target, hits * 100.0);
    assert_eq!(table.most_frequent(), Some(target), "marked index should dominate");
    println!("- Success! The most frequent outcome is the marked index.");

    Ok(())
}
