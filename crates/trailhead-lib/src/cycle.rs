//! Repetition shortcut for long periodic simulations.
//!
//! A [`Simulation`] exposes a compact signature of its current configuration.
//! [`fast_forward`] remembers the step index and metric at which each
//! signature was first seen; when one recurs, the cycle length and per-cycle
//! metric delta are known, so an integral number of cycles is skipped and
//! only the remainder is simulated.
//!
//! The shortcut is only as sound as the signature: if it omits anything that
//! affects future evolution, the skipped cycles silently produce a wrong
//! metric. Validate a new signature against [`simulate_literal`] on a small
//! step count before trusting it at scale.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// A deterministic, step-driven process with a recurring configuration.
pub trait Simulation {
    /// Everything that determines how the metric evolves from now on, relative
    /// to the current metric.
    type Signature: Eq + Hash;

    /// Signature of the current configuration, or `None` while it cannot be
    /// summarised soundly. Steps without a signature are simply simulated.
    fn signature(&self) -> Option<Self::Signature>;

    /// Cumulative metric (tower height, score, ...) at the current step.
    fn metric(&self) -> i64;

    /// Advance the simulation by exactly one step.
    fn step(&mut self);
}

/// Bounds for the signature history kept by [`fast_forward`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleLimits {
    /// Maximum number of steps scanned for a repeated signature before giving
    /// up with [`Error::HistoryLimitExceeded`].
    pub max_history: Option<usize>,
}

/// Repetition detected during a fast-forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cycle {
    /// Step index at which the repeated signature was first recorded.
    pub first_seen: u64,
    /// Steps between two occurrences of the signature.
    pub length: u64,
    /// Metric gained over one cycle.
    pub metric_delta: i64,
    /// Whole cycles skipped without simulating them.
    pub skipped_cycles: u64,
}

/// Outcome of [`fast_forward`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Logical number of steps covered.
    pub steps: u64,
    /// Metric after `steps` steps.
    pub metric: i64,
    /// Detected cycle, if the run was long enough to find one.
    pub cycle: Option<Cycle>,
}

/// Advance `sim` by `steps` logical steps, skipping repeated cycles.
///
/// The simulation object itself only performs the steps that were not
/// skipped; the returned metric accounts for the skipped ones.
///
/// # Errors
///
/// Returns [`Error::HistoryLimitExceeded`] when `limits.max_history` steps
/// pass without a repeat.
pub fn fast_forward<S: Simulation>(
    sim: &mut S,
    steps: u64,
    limits: &CycleLimits,
) -> Result<CycleReport> {
    let mut history: HashMap<S::Signature, (u64, i64)> = HashMap::new();
    let mut cycle: Option<Cycle> = None;
    let mut skipped_metric: i64 = 0;
    let mut index: u64 = 0;

    while index < steps {
        if cycle.is_none() {
            if let Some(signature) = sim.signature() {
                let metric = sim.metric();
                if let Some(&(first_seen, first_metric)) = history.get(&signature) {
                    let length = index - first_seen;
                    let metric_delta = metric - first_metric;
                    let skipped_cycles = (steps - index) / length;
                    skipped_metric = metric_delta.saturating_mul(skipped_cycles as i64);
                    index += skipped_cycles * length;
                    debug!(
                        first_seen,
                        length, metric_delta, skipped_cycles, "repeated signature detected"
                    );
                    cycle = Some(Cycle {
                        first_seen,
                        length,
                        metric_delta,
                        skipped_cycles,
                    });
                    history.clear();
                    continue;
                }
                history.insert(signature, (index, metric));
            }

            if let Some(limit) = limits.max_history {
                if index >= limit as u64 {
                    return Err(Error::HistoryLimitExceeded { limit });
                }
            }
        }

        sim.step();
        index += 1;
    }

    Ok(CycleReport {
        steps,
        metric: sim.metric().saturating_add(skipped_metric),
        cycle,
    })
}

/// Advance `sim` by every one of `steps` steps and return the final metric.
pub fn simulate_literal<S: Simulation>(sim: &mut S, steps: u64) -> i64 {
    for _ in 0..steps {
        sim.step();
    }
    sim.metric()
}
