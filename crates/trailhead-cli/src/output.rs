//! Rendering of answer reports for stdout.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use trailhead_lib::AnswerSummary;

/// How answers are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One block per input, plus a total line for several inputs.
    #[default]
    Text,
    /// A single pretty-printed JSON document.
    Json,
}

/// Answers for every input of one subcommand.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub answers: Vec<AnswerSummary>,
    /// Sum of the answers that exist; `None` when no input produced one.
    pub total: Option<i64>,
}

impl Report {
    pub fn new(answers: Vec<AnswerSummary>) -> Self {
        let total = answers
            .iter()
            .filter_map(|summary| summary.answer)
            .reduce(|acc, answer| acc.saturating_add(answer));
        Self { answers, total }
    }
}

impl OutputFormat {
    pub fn render(self, report: &Report) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(render_text(report)),
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("failed to serialize report")
            }
        }
    }

    /// Render `report` and write it to stdout.
    pub fn print(self, report: &Report) -> Result<()> {
        let rendered = self.render(report)?;
        println!("{}", rendered.trim_end());
        Ok(())
    }
}

fn render_text(report: &Report) -> String {
    let mut text: String = report
        .answers
        .iter()
        .map(AnswerSummary::render_text)
        .collect();
    if report.answers.len() > 1 {
        match report.total {
            Some(total) => text.push_str(&format!("Total: {}\n", total)),
            None => text.push_str("Total: unreachable\n"),
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailhead_lib::{PuzzleKind, SearchOutcome, SearchStats};

    fn unreachable(source: &str) -> AnswerSummary {
        let outcome: SearchOutcome<u8> = SearchOutcome::Unreachable(SearchStats::default());
        AnswerSummary::from_search(PuzzleKind::Climb, source, &outcome)
    }

    fn reached(source: &str, answer: i64) -> AnswerSummary {
        AnswerSummary {
            answer: Some(answer),
            ..unreachable(source)
        }
    }

    #[test]
    fn total_skips_missing_answers() {
        let report = Report::new(vec![reached("a", 3), unreachable("b"), reached("c", 4)]);
        assert_eq!(report.total, Some(7));

        let report = Report::new(vec![unreachable("b")]);
        assert_eq!(report.total, None);
    }

    #[test]
    fn text_total_only_for_several_inputs() {
        let single = OutputFormat::Text
            .render(&Report::new(vec![reached("a", 3)]))
            .expect("text renders");
        assert!(!single.contains("Total"));

        let several = OutputFormat::Text
            .render(&Report::new(vec![reached("a", 3), reached("b", 5)]))
            .expect("text renders");
        assert!(several.ends_with("Total: 8\n"));
    }

    #[test]
    fn json_contains_answers_and_total() {
        let rendered = OutputFormat::Json
            .render(&Report::new(vec![reached("a", 3), unreachable("b")]))
            .expect("json renders");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");

        assert_eq!(value["total"], 3);
        assert_eq!(value["answers"][0]["kind"], "climb");
        assert_eq!(value["answers"][1]["answer"], serde_json::Value::Null);
        assert_eq!(value["answers"][0]["detail"]["method"], "search");
    }
}
