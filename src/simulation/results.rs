// src/simulation/results.rs
use std::collections::BTreeMap;
use std::fmt;

/// Raw executor output: measured bit-pattern to number of shots.
///
/// Bit-patterns are written most significant first, so the leftmost
/// character is the highest-indexed measured qubit and the pattern parses
/// directly as an unsigned integer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutcomeCounts {
    counts: BTreeMap<String, u64>,
}

impl OutcomeCounts {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` observations of `bits`.
    pub fn record(&mut self, bits: impl Into<String>, count: u64) {
        *self.counts.entry(bits.into()).or_insert(0) += count;
    }

    /// Observations of a pattern, zero if never seen.
    pub fn get(&self, bits: &str) -> u64 {
        self.counts.get(bits).copied().unwrap_or(0)
    }

    /// Sum of all observations.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates patterns in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(bits, count)| (bits.as_str(), *count))
    }

    /// Number of distinct patterns observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for OutcomeCounts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = OutcomeCounts::new();
        for (bits, count) in iter {
            counts.record(bits, count);
        }
        counts
    }
}

impl fmt::Display for OutcomeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Counts:")?;
        if self.counts.is_empty() {
            writeln!(f, "  No shots were recorded.")?;
        } else {
            for (bits, count) in &self.counts {
                writeln!(f, "    |{}>: {}", bits, count)?;
            }
        }
        Ok(())
    }
}
