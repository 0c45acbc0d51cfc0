//! `tower`: height of the rock tower after a number of rocks.

use std::path::PathBuf;

use anyhow::Result;

use trailhead_lib::{tower_height, AnswerSummary, JetPattern};

use super::{emit, load_inputs, solve_all, RunOptions};

/// Handle the tower subcommand.
pub fn handle_tower(files: &[PathBuf], rocks: u64, options: &RunOptions) -> Result<()> {
    let inputs = load_inputs(files, JetPattern::parse)?;
    let cycle_limits = options.cycle_limits;

    let report = solve_all(&inputs, |input| {
        let report = tower_height(&input.value, rocks, &cycle_limits)?;
        Ok(AnswerSummary::from_cycle(input.source.as_str(), &report))
    })?;
    emit(&report, options)
}
