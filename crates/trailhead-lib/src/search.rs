//! Best-first search over a [`SearchModel`].
//!
//! The engine pops the cheapest-looking candidate (`cost + heuristic`),
//! finalizes it in the visited set, and expands it through the model. A
//! completed target bounds the rest of the search: once the best pending
//! priority can no longer beat it, the search stops.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::frontier::{Frontier, TieBreak};
use crate::model::{Cost, SearchModel};

/// Caps that turn runaway searches into explicit errors.
///
/// Both caps are off by default; puzzle-sized inputs never need them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of states expanded before failing with
    /// [`Error::ExpansionLimitExceeded`].
    pub max_expansions: Option<usize>,
    /// Maximum number of pending frontier entries before failing with
    /// [`Error::FrontierLimitExceeded`].
    pub max_frontier: Option<usize>,
}

impl SearchLimits {
    /// No caps at all.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    pub fn with_max_frontier(mut self, limit: usize) -> Self {
        self.max_frontier = Some(limit);
        self
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States whose neighbours were generated.
    pub expansions: usize,
    /// Entries pushed onto the frontier, including the start.
    pub pushed: usize,
    /// Entries discarded because their state was already finalized.
    pub stale: usize,
    /// Entries left unexplored because they could not beat the best target.
    pub pruned: usize,
    /// Largest frontier size observed.
    pub frontier_high_water: usize,
}

/// Optimal cost plus the states along one optimal path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<S> {
    pub cost: Cost,
    /// States from start to target inclusive.
    pub path: Vec<S>,
    pub stats: SearchStats,
}

impl<S> Solution<S> {
    /// Number of edges along the path.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Result of a completed search. An unreachable target is a normal outcome,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<S> {
    Reached(Solution<S>),
    Unreachable(SearchStats),
}

impl<S> SearchOutcome<S> {
    /// Optimal cost, or `None` when the target cannot be reached.
    pub fn cost(&self) -> Option<Cost> {
        match self {
            SearchOutcome::Reached(solution) => Some(solution.cost),
            SearchOutcome::Unreachable(_) => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Reached(solution) => &solution.stats,
            SearchOutcome::Unreachable(stats) => stats,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, SearchOutcome::Reached(_))
    }

    pub fn into_solution(self) -> Option<Solution<S>> {
        match self {
            SearchOutcome::Reached(solution) => Some(solution),
            SearchOutcome::Unreachable(_) => None,
        }
    }
}

/// Search engine bound to one model.
///
/// All bookkeeping (frontier, visited set, best-so-far) lives inside a single
/// [`SearchEngine::find_shortest`] call, so one engine can be reused for any
/// number of independent searches.
#[derive(Debug, Clone)]
pub struct SearchEngine<'m, M> {
    model: &'m M,
    limits: SearchLimits,
    tie_break: TieBreak,
}

impl<'m, M: SearchModel> SearchEngine<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self {
            model,
            limits: SearchLimits::default(),
            tie_break: TieBreak::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Find the minimum-cost path from `start` to any state satisfying `target`.
    ///
    /// The returned cost is globally minimal provided edge costs are
    /// non-negative and the model's heuristic is admissible and consistent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExpansionLimitExceeded`] or
    /// [`Error::FrontierLimitExceeded`] when a configured cap is hit.
    pub fn find_shortest(
        &self,
        start: M::State,
        target: &M::Target,
    ) -> Result<SearchOutcome<M::State>> {
        let model = self.model;
        let mut stats = SearchStats::default();
        let mut frontier = Frontier::new(self.tie_break);
        let mut visited: HashMap<M::State, Option<M::State>> = HashMap::new();
        let mut tentative: HashMap<M::State, Cost> = HashMap::new();
        let mut best: Option<(Cost, M::State)> = None;

        let estimate = model.heuristic(&start, target);
        tentative.insert(start.clone(), 0);
        frontier.push(start, 0, estimate, None);
        stats.pushed += 1;

        while let Some(entry) = frontier.pop() {
            if let Some((best_cost, _)) = &best {
                if entry.priority >= *best_cost {
                    // Min-heap: every remaining entry is bounded below by this one.
                    stats.pruned += 1 + frontier.len();
                    break;
                }
            }

            if visited.contains_key(&entry.state) {
                stats.stale += 1;
                continue;
            }
            visited.insert(entry.state.clone(), entry.parent);

            if model.is_target(&entry.state, target) {
                if best.as_ref().map_or(true, |(cost, _)| entry.cost < *cost) {
                    best = Some((entry.cost, entry.state));
                }
                continue;
            }

            if let Some(limit) = self.limits.max_expansions {
                if stats.expansions >= limit {
                    warn!(limit, pending = frontier.len(), "search expansion limit reached");
                    return Err(Error::ExpansionLimitExceeded { limit });
                }
            }
            stats.expansions += 1;

            for (next, edge_cost) in model.neighbors(&entry.state) {
                if visited.contains_key(&next) {
                    continue;
                }
                let cost = entry.cost.saturating_add(edge_cost);
                if tentative.get(&next).is_some_and(|&known| known <= cost) {
                    continue;
                }
                tentative.insert(next.clone(), cost);
                let estimate = model.heuristic(&next, target);
                frontier.push(next, cost, estimate, Some(entry.state.clone()));
                stats.pushed += 1;
            }

            if let Some(limit) = self.limits.max_frontier {
                if frontier.len() > limit {
                    warn!(limit, expansions = stats.expansions, "search frontier limit reached");
                    return Err(Error::FrontierLimitExceeded { limit });
                }
            }
        }

        stats.frontier_high_water = frontier.high_water();
        debug!(
            expansions = stats.expansions,
            pushed = stats.pushed,
            stale = stats.stale,
            pruned = stats.pruned,
            cost = ?best.as_ref().map(|(cost, _)| *cost),
            "search finished"
        );

        Ok(match best {
            Some((cost, goal)) => SearchOutcome::Reached(Solution {
                cost,
                path: reconstruct_path(&visited, goal),
                stats,
            }),
            None => SearchOutcome::Unreachable(stats),
        })
    }
}

/// Run a search with default limits and tie-breaking.
pub fn find_shortest<M: SearchModel>(
    model: &M,
    start: M::State,
    target: &M::Target,
) -> Result<SearchOutcome<M::State>> {
    SearchEngine::new(model).find_shortest(start, target)
}

fn reconstruct_path<S: Clone + Eq + Hash>(parents: &HashMap<S, Option<S>>, goal: S) -> Vec<S> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(state) = current {
        current = parents.get(&state).cloned().flatten();
        path.push(state);
    }
    path.reverse();
    path
}
