//! Weighted roulette selection.
//!
//! A [`WeightedTable`] maps outcomes to positive integer weights. Drawing
//! picks an outcome with probability `weight / total_weight`.

use rand::Rng;

/// One slice of the roulette wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weighted<T> {
    pub outcome: T,
    pub weight: u32,
}

impl<T> Weighted<T> {
    pub const fn new(outcome: T, weight: u32) -> Self {
        Self { outcome, weight }
    }
}

/// Static, ordered weighted outcome table.
#[derive(Debug, Clone, Copy)]
pub struct WeightedTable<T: 'static> {
    entries: &'static [Weighted<T>],
}

impl<T: Copy + 'static> WeightedTable<T> {
    /// Tables are built from constants, so an empty table fails to compile.
    /// A zero weight is caught by the table tests.
    pub const fn new(entries: &'static [Weighted<T>]) -> Self {
        assert!(!entries.is_empty(), "weighted table needs at least one entry");
        Self { entries }
    }

    pub fn entries(&self) -> &'static [Weighted<T>] {
        self.entries
    }

    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Probability of drawing the entry at `index`.
    pub fn probability(&self, index: usize) -> f64 {
        match self.entries.get(index) {
            Some(entry) => entry.weight as f64 / self.total_weight() as f64,
            None => 0.0,
        }
    }

    /// Spin the wheel.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        let total = self.total_weight();
        if total == 0 {
            return self.fallback();
        }
        self.pick_at(rng.gen_range(0..total))
    }

    /// Resolve an already drawn roll in `[0, total_weight)`.
    ///
    /// Walks the table accumulating weight and returns the first outcome
    /// whose cumulative weight exceeds the roll.
    pub fn pick_at(&self, roll: u32) -> T {
        let mut cumulative = 0u32;
        for entry in self.entries {
            cumulative += entry.weight;
            if roll < cumulative {
                return entry.outcome;
            }
        }
        self.fallback()
    }

    fn fallback(&self) -> T {
        tracing::warn!(
            entries = self.entries.len(),
            "weighted roll fell off the table, using first outcome"
        );
        self.entries[0].outcome
    }
}
