//! Subcommand handlers.
//!
//! Each handler reads and parses every input file up front, solves the
//! inputs in parallel, then prints one report.

pub mod climb;
pub mod robots;
pub mod tower;
pub mod valves;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use trailhead_lib::{fan_out, AnswerSummary, CycleLimits, SearchLimits};

use crate::output::{OutputFormat, Report};

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub limits: SearchLimits,
    pub cycle_limits: CycleLimits,
}

/// A parsed input file.
#[derive(Debug)]
pub struct Input<T> {
    /// Path as given on the command line.
    pub source: String,
    pub value: T,
}

/// Read and parse every file, failing on the first bad one.
pub fn load_inputs<T>(
    files: &[PathBuf],
    parse: impl Fn(&str) -> trailhead_lib::Result<T>,
) -> Result<Vec<Input<T>>> {
    files
        .iter()
        .map(|path| -> Result<Input<T>> {
            let text = read_input(path)?;
            let value = parse(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            Ok(Input {
                source: path.display().to_string(),
                value,
            })
        })
        .collect()
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Solve every input on the thread pool and collect a report in input order.
pub fn solve_all<T, F>(inputs: &[Input<T>], solve: F) -> Result<Report>
where
    T: Sync,
    F: Fn(&Input<T>) -> trailhead_lib::Result<AnswerSummary> + Sync + Send,
{
    info!(inputs = inputs.len(), "solving inputs");
    fan_out(inputs, solve)
        .into_iter()
        .zip(inputs)
        .map(|(result, input)| {
            result.with_context(|| format!("failed to solve {}", input.source))
        })
        .collect::<Result<Vec<_>>>()
        .map(Report::new)
}

/// Print `report` in the requested format.
pub fn emit(report: &Report, options: &RunOptions) -> Result<()> {
    options.format.print(report)
}
