//! Parallel evaluation of independent problem instances.
//!
//! A single search is strictly sequential. Separate instances (several input
//! files, several scenarios of one puzzle) share nothing, so they are solved
//! on the rayon thread pool, one engine per instance.

use rayon::prelude::*;

/// Solve every instance in parallel.
///
/// # Returns
///
/// One result per instance, in input order.
pub fn fan_out<I, T, F>(instances: &[I], solve: F) -> Vec<T>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> T + Sync + Send,
{
    instances.par_iter().map(solve).collect()
}
