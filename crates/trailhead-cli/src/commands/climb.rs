//! `climb`: fewest steps up a height map.

use std::path::PathBuf;

use anyhow::Result;

use trailhead_lib::{shortest_ascent, shortest_descent, AnswerSummary, HeightMap, PuzzleKind};

use super::{emit, load_inputs, solve_all, RunOptions};

/// Lowest elevation letter; every square of it is a candidate start.
const LOWEST_ELEVATION: u8 = b'a';

/// Handle the climb subcommand.
///
/// With `any_start`, the answer is the shortest climb from any lowest square
/// rather than from `S`.
pub fn handle_climb(files: &[PathBuf], any_start: bool, options: &RunOptions) -> Result<()> {
    let inputs = load_inputs(files, HeightMap::parse)?;
    let limits = options.limits;

    let report = solve_all(&inputs, |input| {
        if any_start {
            let outcome = shortest_descent(&input.value, LOWEST_ELEVATION, limits)?;
            Ok(AnswerSummary::from_search(
                PuzzleKind::Descent,
                input.source.as_str(),
                &outcome,
            ))
        } else {
            let outcome = shortest_ascent(&input.value, limits)?;
            Ok(AnswerSummary::from_search(
                PuzzleKind::Climb,
                input.source.as_str(),
                &outcome,
            ))
        }
    })?;
    emit(&report, options)
}
