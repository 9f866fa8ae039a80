// tests/simulation_tests.rs

use qroute::{
    Circuit, CircuitBuilder, CircuitExecutor, Gate, QubitId, RouteError, Simulator, check_normalization,
};

// Helper function to create QubitId for tests
fn qid(id: usize) -> QubitId {
    QubitId(id)
}

fn measured(builder: CircuitBuilder) -> Circuit {
    builder.measure_all().build()
}

#[test]
fn test_initial_state_measures_zero() -> Result<(), RouteError> {
    let circuit = measured(CircuitBuilder::new(3));
    let counts = Simulator::new().execute(&circuit, 50)?;
    assert_eq!(counts.len(), 1);
    assert_eq!(counts.get("000"), 50);
    Ok(())
}

#[test]
fn test_bit_flip_sets_single_bit() -> Result<(), RouteError> {
    // Highest qubit is printed first: flipping q0 on 3 qubits gives "001".
    let circuit = measured(CircuitBuilder::new(3).add_gate(Gate::BitFlip { target: qid(0) }));
    let counts = Simulator::new().execute(&circuit, 20)?;
    assert_eq!(counts.get("001"), 20);
    Ok(())
}

#[test]
fn test_hadamard_squared_is_identity() -> Result<(), RouteError> {
    let circuit = measured(
        CircuitBuilder::new(1)
            .add_gate(Gate::Hadamard { target: qid(0) })
            .add_gate(Gate::Hadamard { target: qid(0) }),
    );
    let counts = Simulator::with_seed(9).execute(&circuit, 100)?;
    assert_eq!(counts.get("0"), 100);
    Ok(())
}

#[test]
fn test_uniform_superposition_is_normalized() -> Result<(), RouteError> {
    let circuit = CircuitBuilder::new(3).hadamard_all().build();
    let state = Simulator::new().final_state(&circuit)?;
    check_normalization(&state, None)?;
    for p in state.probabilities() {
        assert!((p - 0.125).abs() < 1e-12);
    }
    Ok(())
}

#[test]
fn test_uniform_sampling_is_roughly_even() -> Result<(), RouteError> {
    let circuit = measured(CircuitBuilder::new(2).hadamard_all());
    let counts = Simulator::with_seed(42).execute(&circuit, 4000)?;
    assert_eq!(counts.total(), 4000);
    for bits in ["00", "01", "10", "11"] {
        let c = counts.get(bits);
        assert!((800..=1200).contains(&c), "{} measured {} times", bits, c);
    }
    Ok(())
}

#[test]
fn test_phase_flip_all_ones_marks_only_all_ones() -> Result<(), RouteError> {
    let circuit = CircuitBuilder::new(3).hadamard_all().phase_flip_all_ones().build();
    let state = Simulator::new().final_state(&circuit)?;
    for (k, amp) in state.vector().iter().enumerate() {
        if k == 7 {
            assert!(amp.re < 0.0);
        } else {
            assert!(amp.re > 0.0);
        }
    }
    Ok(())
}

#[test]
fn test_three_qubit_grover_two_rounds() -> Result<(), RouteError> {
    // Mark |101> = index 5; two rounds concentrate ~94.5% on it.
    let zero_bits = vec![Gate::BitFlip { target: qid(1) }];
    let mut builder = CircuitBuilder::new(3).hadamard_all();
    for _ in 0..2 {
        builder = builder
            .add_gates(zero_bits.clone())
            .phase_flip_all_ones()
            .add_gates(zero_bits.clone())
            .hadamard_all()
            .bit_flip_all()
            .phase_flip_all_ones()
            .bit_flip_all()
            .hadamard_all();
    }
    let circuit = builder.build();
    let state = Simulator::new().final_state(&circuit)?;
    let probabilities = state.probabilities();
    assert!(probabilities[5] > 0.94, "p(5) = {}", probabilities[5]);
    Ok(())
}

#[test]
fn test_seeded_runs_repeat() -> Result<(), RouteError> {
    let circuit = measured(CircuitBuilder::new(3).hadamard_all());
    let first = Simulator::with_seed(123).execute(&circuit, 300)?;
    let second = Simulator::with_seed(123).execute(&circuit, 300)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_unmeasured_circuit_is_rejected() {
    let circuit = CircuitBuilder::new(1).hadamard_all().build();
    let err = Simulator::new().execute(&circuit, 10).unwrap_err();
    assert!(matches!(err, RouteError::SimulationError { .. }));
}

#[test]
fn test_zero_shots_rejected() {
    let circuit = measured(CircuitBuilder::new(1));
    let err = Simulator::new().execute(&circuit, 0).unwrap_err();
    assert!(matches!(err, RouteError::InvalidParameter { .. }));
}
