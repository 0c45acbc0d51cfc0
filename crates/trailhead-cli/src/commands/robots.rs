//! `robots`: sum of blueprint quality levels.

use std::path::PathBuf;

use anyhow::Result;

use trailhead_lib::{quality_levels, AnswerSummary, Blueprint};

use super::{emit, load_inputs, solve_all, RunOptions};

/// Handle the robots subcommand.
///
/// Each file is one answer; its blueprints are themselves evaluated in
/// parallel.
pub fn handle_robots(files: &[PathBuf], minutes: u32, options: &RunOptions) -> Result<()> {
    let inputs = load_inputs(files, Blueprint::parse_all)?;
    let limits = options.limits;

    let report = solve_all(&inputs, |input| {
        let quality = quality_levels(&input.value, minutes, limits)?;
        Ok(AnswerSummary::from_quality(input.source.as_str(), &quality))
    })?;
    emit(&report, options)
}
