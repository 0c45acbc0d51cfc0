//! Serialisable answer summaries shared by every puzzle, with a plain-text
//! rendering for terminals.

use std::fmt::{self, Write};

use serde::Serialize;

use crate::blueprints::{BlueprintScore, QualityReport};
use crate::cycle::CycleReport;
use crate::search::{SearchOutcome, SearchStats};
use crate::valves::PressurePlan;

/// Classifies which puzzle produced an answer.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleKind {
    Climb,
    Descent,
    Valves,
    Tower,
    Robots,
}

impl PuzzleKind {
    /// Human-readable label shown in textual renderings.
    pub fn label(self) -> &'static str {
        match self {
            PuzzleKind::Climb => "Climb",
            PuzzleKind::Descent => "Descent",
            PuzzleKind::Valves => "Valves",
            PuzzleKind::Tower => "Tower",
            PuzzleKind::Robots => "Robots",
        }
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How an answer was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum AnswerDetail {
    Search {
        #[serde(flatten)]
        stats: SearchStats,
        #[serde(skip_serializing_if = "Option::is_none")]
        steps: Option<usize>,
    },
    Valves {
        opened: Vec<String>,
        #[serde(flatten)]
        stats: SearchStats,
    },
    Simulation {
        #[serde(flatten)]
        report: CycleReport,
    },
    Blueprints {
        scores: Vec<BlueprintScore>,
    },
}

/// Structured answer that higher-level consumers can serialise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSummary {
    pub kind: PuzzleKind,
    /// Input the answer was computed from (usually a file name).
    pub source: String,
    /// `None` when the target is unreachable.
    pub answer: Option<i64>,
    pub detail: AnswerDetail,
}

impl AnswerSummary {
    /// Summarise a grid search outcome; the answer is the step count.
    pub fn from_search<S>(
        kind: PuzzleKind,
        source: impl Into<String>,
        outcome: &SearchOutcome<S>,
    ) -> Self {
        let steps = match outcome {
            SearchOutcome::Reached(solution) => Some(solution.steps()),
            SearchOutcome::Unreachable(_) => None,
        };
        Self {
            kind,
            source: source.into(),
            answer: outcome.cost().map(saturate),
            detail: AnswerDetail::Search {
                stats: *outcome.stats(),
                steps,
            },
        }
    }

    pub fn from_pressure(source: impl Into<String>, plan: &PressurePlan) -> Self {
        Self {
            kind: PuzzleKind::Valves,
            source: source.into(),
            answer: Some(saturate(plan.released)),
            detail: AnswerDetail::Valves {
                opened: plan.opened.clone(),
                stats: plan.stats,
            },
        }
    }

    pub fn from_cycle(source: impl Into<String>, report: &CycleReport) -> Self {
        Self {
            kind: PuzzleKind::Tower,
            source: source.into(),
            answer: Some(report.metric),
            detail: AnswerDetail::Simulation { report: *report },
        }
    }

    pub fn from_quality(source: impl Into<String>, report: &QualityReport) -> Self {
        Self {
            kind: PuzzleKind::Robots,
            source: source.into(),
            answer: Some(saturate(report.total_quality)),
            detail: AnswerDetail::Blueprints {
                scores: report.scores.clone(),
            },
        }
    }

    /// Render the summary as a short plain-text block.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let answer = self
            .answer
            .map(|value| value.to_string())
            .unwrap_or_else(|| "unreachable".to_string());
        let _ = writeln!(buffer, "{} ({}): {}", self.kind, self.source, answer);

        match &self.detail {
            AnswerDetail::Search { stats, .. } => {
                write_stats(&mut buffer, stats);
            }
            AnswerDetail::Valves { opened, stats } => {
                if !opened.is_empty() {
                    let _ = writeln!(buffer, "  opened: {}", opened.join(" -> "));
                }
                write_stats(&mut buffer, stats);
            }
            AnswerDetail::Blueprints { scores } => {
                for score in scores {
                    let _ = writeln!(
                        buffer,
                        "  blueprint {}: {} geodes ({} states)",
                        score.id, score.geodes, score.explored
                    );
                }
            }
            AnswerDetail::Simulation { report } => {
                if let Some(cycle) = report.cycle {
                    let _ = writeln!(
                        buffer,
                        "  cycle: length {} from step {}, +{} per cycle, {} cycles skipped",
                        cycle.length, cycle.first_seen, cycle.metric_delta, cycle.skipped_cycles
                    );
                } else {
                    let _ = writeln!(buffer, "  no cycle needed for {} steps", report.steps);
                }
            }
        }

        buffer
    }
}

/// Answers above `i64::MAX` are pinned there rather than wrapping.
fn saturate(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn write_stats(buffer: &mut String, stats: &SearchStats) {
    let _ = writeln!(
        buffer,
        "  expanded {} states, pushed {}, frontier peak {}",
        stats.expansions, stats.pushed, stats.frontier_high_water
    );
}
