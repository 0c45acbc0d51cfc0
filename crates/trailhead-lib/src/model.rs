//! Graph/cost capability interface consumed by the search engine.
//!
//! Each puzzle supplies one implementation of [`SearchModel`] describing its
//! transition function, its heuristic and its target test. The engine in
//! [`crate::search`] is written once against this trait, so adding a new
//! puzzle never means writing another search loop.

use std::hash::Hash;

/// Accumulated path cost. Edge costs are non-negative by construction.
pub type Cost = u64;

/// Problem-specific transition function and heuristic.
///
/// # Preconditions
///
/// The engine assumes a well-formed model and does not defend against a
/// broken one:
///
/// - `neighbors` is deterministic and only yields finitely many states from
///   any reachable state.
/// - `heuristic` never overstates the true remaining cost (admissible) and
///   never drops by more than the edge cost along any edge (consistent).
///   Returning `0` everywhere turns the search into plain Dijkstra.
///
/// A model that violates these may produce a too-low answer or fail to
/// terminate; pair it with [`crate::SearchLimits`] when in doubt.
pub trait SearchModel {
    /// Immutable snapshot of search progress. Equality and hashing must cover
    /// every field that affects future reachable costs.
    type State: Clone + Eq + Hash;

    /// Whatever identifies the goal: a concrete state, a cell, a predicate's
    /// parameters.
    type Target;

    /// All legally reachable successors of `state` with their edge costs.
    ///
    /// An empty vector marks a dead end.
    fn neighbors(&self, state: &Self::State) -> Vec<(Self::State, Cost)>;

    /// Lower bound on the remaining cost from `state` to `target`.
    fn heuristic(&self, state: &Self::State, target: &Self::Target) -> Cost;

    /// Whether `state` satisfies `target`.
    fn is_target(&self, state: &Self::State, target: &Self::Target) -> bool;
}

impl<M: SearchModel + ?Sized> SearchModel for &M {
    type State = M::State;
    type Target = M::Target;

    fn neighbors(&self, state: &Self::State) -> Vec<(Self::State, Cost)> {
        (**self).neighbors(state)
    }

    fn heuristic(&self, state: &Self::State, target: &Self::Target) -> Cost {
        (**self).heuristic(state, target)
    }

    fn is_target(&self, state: &Self::State, target: &Self::Target) -> bool {
        (**self).is_target(state, target)
    }
}
