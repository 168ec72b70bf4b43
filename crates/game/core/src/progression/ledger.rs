/// One finished run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighScore {
    pub name: String,
    pub score: u64,
    /// Calendar date, formatted by the host.
    pub date: String,
    pub seed: u64,
}

/// Best scores, highest first, capped at `capacity` entries.
///
/// Equal scores keep insertion order: an older entry stays ahead of a newer
/// one with the same score.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreLedger {
    capacity: usize,
    entries: Vec<HighScore>,
}

impl ScoreLedger {
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Rebuilds a ledger from stored entries, re-sorting and truncating.
    pub fn from_entries(capacity: usize, entries: impl IntoIterator<Item = HighScore>) -> Self {
        let mut ledger = Self::new(capacity);
        for entry in entries {
            ledger.record(entry);
        }
        ledger
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `entry` and returns its zero-based rank, or `None` when it
    /// did not make the cut.
    pub fn record(&mut self, entry: HighScore) -> Option<usize> {
        let rank = self.entries.partition_point(|e| e.score >= entry.score);
        if rank >= self.capacity {
            return None;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(self.capacity);
        Some(rank)
    }

    /// Whether a run with `score` would enter the ledger.
    pub fn qualifies(&self, score: u64) -> bool {
        self.entries.len() < self.capacity
            || self.entries.last().is_some_and(|e| score > e.score)
    }
}

impl Default for ScoreLedger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
