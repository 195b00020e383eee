//! Fixed-capacity history of alive-cell snapshots.
//!
//! [`HistoryRing`] stores one [`AliveSnapshot`] per committed generation,
//! newest at the tail. Pushing into a full ring evicts the oldest entry.
//! Rewinding pops from the tail; popped entries are gone for good (there
//! is no redo). Only the sparse alive set is stored, never a full grid,
//! so each entry costs `O(population)` rather than `O(width * height)`.

use std::collections::VecDeque;

use gol_core::AliveSnapshot;

/// Bounded FIFO of past alive-cell sets.
#[derive(Clone, Debug)]
pub struct HistoryRing {
    entries: VecDeque<AliveSnapshot>,
    capacity: usize,
    pushed: u64,
    evicted: u64,
}

impl HistoryRing {
    /// Create an empty ring retaining at most `capacity` snapshots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. A ring that retains nothing cannot
    /// rewind even one generation.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "HistoryRing capacity must be >= 1, got {capacity}");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            pushed: 0,
            evicted: 0,
        }
    }

    /// Append the newest snapshot.
    ///
    /// Returns the evicted oldest snapshot when the ring was already full.
    pub fn push(&mut self, snapshot: AliveSnapshot) -> Option<AliveSnapshot> {
        let evicted = if self.entries.len() == self.capacity {
            self.evicted += 1;
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(snapshot);
        self.pushed += 1;
        evicted
    }

    /// Remove and return the newest snapshot.
    pub fn pop_newest(&mut self) -> Option<AliveSnapshot> {
        self.entries.pop_back()
    }

    /// The newest snapshot, if any.
    pub fn newest(&self) -> Option<&AliveSnapshot> {
        self.entries.back()
    }

    /// Number of snapshots currently retained: how many generations back
    /// a rewind can reach.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ring holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained snapshots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total pushes since construction or the last clear.
    pub fn pushed(&self) -> u64 {
        self.pushed
    }

    /// Total evictions since construction or the last clear.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Drop every snapshot and zero the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pushed = 0;
        self.evicted = 0;
    }
}
