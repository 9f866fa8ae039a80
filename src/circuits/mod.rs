// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! gates (`qroute::operations::Gate`).
//!
//! A `Circuit` is a pure description: it records the register width and the
//! gate order, and is handed to a `CircuitExecutor` for execution.

use crate::core::QubitId;
use crate::operations::Gate;
use std::fmt;

/// An ordered sequence of gates over a fixed-width qubit register.
///
/// The register width is explicit so that a circuit touching only some of
/// its qubits (or a 1-qubit circuit) is still sized correctly.
#[derive(Clone, PartialEq, Eq)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Creates an empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
        }
    }

    /// Appends a gate. The register grows if the gate names a qubit beyond
    /// the current width.
    pub fn add_gate(&mut self, gate: Gate) {
        if let Some(highest) = gate.involved_qubits().iter().map(|q| q.0).max() {
            self.num_qubits = self.num_qubits.max(highest + 1);
        }
        self.gates.push(gate);
    }

    /// Appends every gate from an iterator.
    pub fn add_gates<I>(&mut self, gates: I)
    where
        I: IntoIterator<Item = Gate>,
    {
        for gate in gates {
            self.add_gate(gate);
        }
    }

    /// Register width.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Qubits of the register in index order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        (0..self.num_qubits).map(QubitId)
    }

    /// Gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns `true` if the circuit contains no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Qubits measured by the trailing `Measure` gate, if any.
    pub fn measured_qubits(&self) -> Option<&[QubitId]> {
        match self.gates.last() {
            Some(Gate::Measure { targets }) => Some(targets),
            _ => None,
        }
    }

    /// Counts gates matching a predicate. Handy for inspecting oracle and
    /// diffuser structure in tests.
    pub fn count_gates<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Gate) -> bool,
    {
        self.gates.iter().filter(|g| predicate(g)).count()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Chaining helper for constructing `Circuit` instances.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Starts a builder over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
        }
    }

    /// Adds a single gate.
    pub fn add_gate(mut self, gate: Gate) -> Self {
        self.circuit.add_gate(gate);
        self
    }

    /// Adds multiple gates.
    pub fn add_gates<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        self.circuit.add_gates(gates);
        self
    }

    /// Hadamard on every qubit.
    pub fn hadamard_all(self) -> Self {
        let gates: Vec<Gate> = self.circuit.qubits().map(|target| Gate::Hadamard { target }).collect();
        self.add_gates(gates)
    }

    /// Bit flip on every qubit.
    pub fn bit_flip_all(self) -> Self {
        let gates: Vec<Gate> = self.circuit.qubits().map(|target| Gate::BitFlip { target }).collect();
        self.add_gates(gates)
    }

    /// Phase flip on the all-ones basis state of the whole register.
    /// A single-qubit register gets a plain phase flip.
    pub fn phase_flip_all_ones(self) -> Self {
        let n = self.circuit.num_qubits();
        match n {
            0 => self,
            1 => self.add_gate(Gate::PhaseFlip { target: QubitId(0) }),
            _ => self.add_gate(Gate::ControlledPhaseFlip {
                controls: (0..n - 1).map(QubitId).collect(),
                target: QubitId(n - 1),
            }),
        }
    }

    /// Measures every qubit.
    pub fn measure_all(self) -> Self {
        let targets: Vec<QubitId> = self.circuit.qubits().collect();
        self.add_gate(Gate::Measure { targets })
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.gates.is_empty() {
            return writeln!(f, "qroute::Circuit[0 gates on {} qubits]", self.num_qubits);
        }

        let num_gates = self.gates.len();
        let num_rows = self.num_qubits;

        let max_label_width = (0..num_rows).map(|q| format!("{}", QubitId(q)).len()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 7;
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] holds the segment drawn on that wire at that step
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_gates]; num_rows];
        // v_connect[row][time] holds the connector drawn below that wire
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_gates]; num_rows];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        for (t, gate) in self.gates.iter().enumerate() {
            match gate {
                Gate::ControlledPhaseFlip { controls, target } => {
                    for c in controls {
                        if c.0 < num_rows {
                            op_grid[c.0][t] = format_gate("@");
                        }
                    }
                    if target.0 < num_rows {
                        op_grid[target.0][t] = format_gate(gate.symbol());
                    }
                    let rows: Vec<usize> = gate.involved_qubits().iter().map(|q| q.0).collect();
                    if let (Some(r_min), Some(r_max)) = (rows.iter().min(), rows.iter().max()) {
                        for row_vec in v_connect.iter_mut().take(*r_max).skip(*r_min) {
                            row_vec[t] = V_WIRE;
                        }
                    }
                }
                _ => {
                    for q in gate.involved_qubits() {
                        if q.0 < num_rows {
                            op_grid[q.0][t] = format_gate(gate.symbol());
                        }
                    }
                }
            }
        }

        writeln!(f, "qroute::Circuit[{} gates on {} qubits]", num_gates, num_rows)?;
        for r in 0..num_rows {
            let label = format!("{}: ", QubitId(r));
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r + 1 < num_rows {
                write!(f, "{}", label_padding)?;
                for t in 0..num_gates {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
