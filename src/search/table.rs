// src/search/table.rs

use std::fmt;

/// Measured count per candidate index.
///
/// Every index in `0..candidate_count` has an entry, zero if never measured.
/// Measurements of padding indices are not mapped onto candidates; they are
/// only tallied in `discarded`, so `observed() + discarded()` equals the
/// shots requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeFrequencyTable {
    counts: Vec<u64>,
    discarded: u64,
}

impl OutcomeFrequencyTable {
    /// Table with `candidate_count` zero entries.
    pub fn zeroed(candidate_count: usize) -> Self {
        Self {
            counts: vec![0; candidate_count],
            discarded: 0,
        }
    }

    pub(crate) fn add(&mut self, index: usize, count: u64) {
        self.counts[index] += count;
    }

    pub(crate) fn discard(&mut self, count: u64) {
        self.discarded += count;
    }

    /// Count for `index`; zero for indices outside the table.
    pub fn get(&self, index: usize) -> u64 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Number of entries (the candidate count).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` for the table of an empty candidate set.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Shots that decoded to a candidate index.
    pub fn observed(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Shots that decoded to a padding index.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Share of observed shots landing on `index`; zero when nothing was observed.
    pub fn relative_frequency(&self, index: usize) -> f64 {
        let observed = self.observed();
        if observed == 0 {
            return 0.0;
        }
        self.get(index) as f64 / observed as f64
    }

    /// Index with the highest count, lowest index on ties.
    pub fn most_frequent(&self) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (i, c) in self.iter() {
            if best.is_none_or(|(_, b)| c > b) {
                best = Some((i, c));
            }
        }
        best.map(|(i, _)| i)
    }

    /// `(index, count)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().copied().enumerate()
    }
}

impl fmt::Display for OutcomeFrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path Outcomes ({} observed, {} discarded):", self.observed(), self.discarded)?;
        let widest = self.counts.iter().copied().max().unwrap_or(0).max(1);
        for (i, c) in self.iter() {
            let bar = "#".repeat(((c * 40) / widest) as usize);
            writeln!(f, "  path {:>2}: {:>6} {}", i, c, bar)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_frequency_ignores_discarded() {
        let mut table = OutcomeFrequencyTable::zeroed(2);
        table.add(0, 30);
        table.add(1, 10);
        table.discard(60);
        assert_eq!(table.relative_frequency(0), 0.75);
        assert_eq!(table.observed() + table.discarded(), 100);
    }

    #[test]
    fn test_most_frequent_prefers_lowest_index() {
        let mut table = OutcomeFrequencyTable::zeroed(3);
        table.add(1, 5);
        table.add(2, 5);
        assert_eq!(table.most_frequent(), Some(1));
        assert_eq!(OutcomeFrequencyTable::zeroed(0).most_frequent(), None);
    }
}
