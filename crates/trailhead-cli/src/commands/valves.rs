//! `valves`: most pressure released before the deadline.

use std::path::PathBuf;

use anyhow::Result;

use trailhead_lib::{max_pressure, AnswerSummary, ValveNetwork};

use super::{emit, load_inputs, solve_all, RunOptions};

/// Handle the valves subcommand.
pub fn handle_valves(
    files: &[PathBuf],
    start: &str,
    minutes: u32,
    options: &RunOptions,
) -> Result<()> {
    let inputs = load_inputs(files, ValveNetwork::parse)?;
    let limits = options.limits;

    let report = solve_all(&inputs, |input| {
        let plan = max_pressure(&input.value, start, minutes, limits)?;
        Ok(AnswerSummary::from_pressure(input.source.as_str(), &plan))
    })?;
    emit(&report, options)
}
