//! Integration tests for the `trailhead` binary.
//!
//! These run the real binary against the shared puzzle fixtures and check
//! answers, output formats and exit codes.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
}

fn trailhead() -> Command {
    Command::cargo_bin("trailhead").expect("binary exists")
}

#[test]
fn climb_sample_prints_steps() {
    trailhead()
        .arg("climb")
        .arg(fixture("hill_sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Climb ("))
        .stdout(predicate::str::contains("hill_sample.txt): 31"));
}

#[test]
fn climb_any_start_descends_from_the_summit() {
    trailhead()
        .args(["climb", "--any-start"])
        .arg(fixture("hill_sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Descent ("))
        .stdout(predicate::str::contains("): 29"));
}

#[test]
fn climb_several_files_prints_total() {
    trailhead()
        .arg("climb")
        .arg(fixture("hill_sample.txt"))
        .arg(fixture("hill_sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 62"));
}

#[test]
fn unreachable_summit_is_not_an_error() {
    trailhead()
        .arg("climb")
        .arg(fixture("hill_unreachable.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("unreachable"));
}

#[test]
fn valves_json_output_is_machine_readable() {
    let output = trailhead()
        .args(["--format", "json", "valves"])
        .arg(fixture("valves_sample.txt"))
        .output()
        .expect("binary runs");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["answers"][0]["answer"], 1651);
    assert_eq!(value["answers"][0]["kind"], "valves");
    assert_eq!(value["total"], 1651);
}

#[test]
fn valves_respects_minutes_flag() {
    trailhead()
        .args(["valves", "--minutes", "0"])
        .arg(fixture("valves_sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("): 0"));
}

#[test]
fn valves_unknown_start_fails() {
    trailhead()
        .args(["valves", "--start", "QQ"])
        .arg(fixture("valves_sample.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to solve"))
        .stderr(predicate::str::contains("QQ"));
}

#[test]
fn tower_fast_forwards_a_trillion_rocks() {
    trailhead()
        .args(["tower", "--rocks", "1000000000000"])
        .arg(fixture("jets_sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("): 1514285714288"))
        .stdout(predicate::str::contains("cycles skipped"));
}

#[test]
fn tower_default_rock_count() {
    trailhead()
        .arg("tower")
        .arg(fixture("jets_sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("): 3068"));
}

#[test]
fn robots_sums_quality_levels() {
    trailhead()
        .arg("robots")
        .arg(fixture("blueprints_sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("): 33"))
        .stdout(predicate::str::contains("blueprint 1: 9 geodes"))
        .stdout(predicate::str::contains("blueprint 2: 12 geodes"));
}

#[test]
fn robots_with_no_time_scores_zero() {
    trailhead()
        .args(["robots", "--minutes", "5"])
        .arg(fixture("blueprints_sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("): 0"));
}

#[test]
fn expansion_limit_exits_with_error() {
    trailhead()
        .args(["--max-expansions", "3", "climb"])
        .arg(fixture("hill_sample.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 expansions"));
}

#[test]
fn frontier_limit_exits_with_error() {
    trailhead()
        .args(["valves", "--max-frontier", "1"])
        .arg(fixture("valves_sample.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("frontier"));
}

#[test]
fn malformed_input_names_the_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("broken.txt");
    fs::write(&path, "Sab\nxE\n").expect("write input");

    trailhead()
        .arg("climb")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"))
        .stderr(predicate::str::contains("broken.txt"));
}

#[test]
fn missing_file_is_reported() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("absent.txt");

    trailhead()
        .arg("tower")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn json_logs_go_to_stderr_only() {
    let output = trailhead()
        .args(["--log-format", "json", "--format", "json", "climb"])
        .arg(fixture("hill_sample.txt"))
        .env("RUST_LOG", "debug")
        .output()
        .expect("binary runs");
    assert!(output.status.success());

    let stdout: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(stdout["answers"][0]["answer"], 31);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("search finished"));
}
