//! Priority frontier for best-first search.
//!
//! Entries are ordered by priority (`cost + heuristic`), then by accumulated
//! cost (deeper entries first, which reaches targets sooner on plateaus), then
//! by insertion sequence according to the configured [`TieBreak`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::model::Cost;

/// Order in which equal-priority entries leave the frontier.
///
/// Tie-breaking only affects how much work the search does, never the
/// returned cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Earlier insertions pop first.
    #[default]
    Fifo,
    /// Later insertions pop first.
    Lifo,
}

/// A pending candidate owned by the frontier.
#[derive(Debug, Clone)]
pub struct FrontierEntry<S> {
    pub state: S,
    pub cost: Cost,
    pub priority: Cost,
    pub parent: Option<S>,
    sequence: u64,
    tie_break: TieBreak,
}

impl<S> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for FrontierEntry<S> {}

impl<S> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority.
        let by_sequence = match self.tie_break {
            TieBreak::Fifo => other.sequence.cmp(&self.sequence),
            TieBreak::Lifo => self.sequence.cmp(&other.sequence),
        };
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.cost.cmp(&other.cost))
            .then(by_sequence)
    }
}

impl<S> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of [`FrontierEntry`] values.
#[derive(Debug)]
pub struct Frontier<S> {
    heap: BinaryHeap<FrontierEntry<S>>,
    tie_break: TieBreak,
    next_sequence: u64,
    high_water: usize,
}

impl<S> Frontier<S> {
    /// Create an empty frontier with the given tie-break order.
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            tie_break,
            next_sequence: 0,
            high_water: 0,
        }
    }

    /// Queue `state` reached at `cost` with the given heuristic estimate.
    pub fn push(&mut self, state: S, cost: Cost, estimate: Cost, parent: Option<S>) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            state,
            cost,
            priority: cost.saturating_add(estimate),
            parent,
            sequence,
            tie_break: self.tie_break,
        });
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Remove and return the lowest-priority entry.
    pub fn pop(&mut self) -> Option<FrontierEntry<S>> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest number of entries held at once.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
