//! Integration tests for the `showtime` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the actual binary
//! against the JSON fixtures: raw `solve` runs, the flag-driven tool
//! wrappers, the generic `call` command and error exit codes.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// The binary with the fixture snapshot loaded and "today" pinned.
fn showtime() -> Command {
    let mut cmd = Command::cargo_bin("showtime").unwrap();
    cmd.args(["--data", &fixture("snapshot.json"), "--today", "2026-10-20"]);
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// solve
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn solve_file_to_stdout() {
    Command::cargo_bin("showtime")
        .unwrap()
        .args(["solve", "-i", &fixture("options.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalCandidates\": 2"))
        .stdout(predicate::str::contains("\"breakMinutesBefore\": 42"))
        .stdout(predicate::str::contains("\"reason\": \"time_conflict\""));
}

#[test]
fn solve_stdin_summary() {
    let options = std::fs::read_to_string(fixture("options.json")).unwrap();

    Command::cargo_bin("showtime")
        .unwrap()
        .args(["solve", "--summary"])
        .write_stdin(options)
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan 1 of 2: 2 movie(s), 4h09m watching, 0h42m between"))
        .stdout(predicate::str::contains("1. 10:00-11:48  Movie A @ Cinema 1"))
        .stdout(predicate::str::contains("(42 min break)"))
        .stdout(predicate::str::contains("1. 14:00-15:48  Movie A @ Cinema 1 [IMAX]"))
        .stdout(predicate::str::contains("- Movie B: does not fit"));
}

#[test]
fn solve_summary_totals_do_not_wrap_past_a_day() {
    let mut options: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(fixture("options.json")).unwrap()).unwrap();
    options["movieTitles"] = serde_json::json!(["Epic"]);
    options["showtimes"] = serde_json::json!([{
        "movieTitle": "Epic",
        "theater": "Cinema 1",
        "startTime": "01:00",
        "endTime": "26:00"
    }]);

    Command::cargo_bin("showtime")
        .unwrap()
        .args(["solve", "--summary"])
        .write_stdin(options.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 movie(s), 25h00m watching"));
}

#[test]
fn solve_file_to_file() {
    let output_path = std::env::temp_dir().join("showtime-test-solve-output.json");
    let _ = std::fs::remove_file(&output_path);

    Command::cargo_bin("showtime")
        .unwrap()
        .args(["solve", "-i", &fixture("options.json"), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let result: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(result["totalCandidates"], 2);
    assert_eq!(result["candidates"][0]["stats"]["totalWatchTimeMinutes"], 249);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn solve_respects_max_candidates() {
    Command::cargo_bin("showtime")
        .unwrap()
        .args(["--max-candidates", "1", "solve", "-i", &fixture("options.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalCandidates\": 1"));
}

#[test]
fn solve_invalid_json_fails() {
    Command::cargo_bin("showtime")
        .unwrap()
        .arg("solve")
        .write_stdin("{\"movieTitles\": ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse optimize options"));
}

#[test]
fn solve_missing_file_fails() {
    Command::cargo_bin("showtime")
        .unwrap()
        .args(["solve", "-i", "/nonexistent/options.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// optimize
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn optimize_from_snapshot() {
    showtime()
        .args(["optimize", "-m", "ズートピア2", "-m", "シャドウズ・エッジ", "-a", "新宿"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalCandidates\": 3"))
        .stdout(predicate::str::contains("\"startTime\": \"12:30\""));
}

#[test]
fn optimize_with_time_window() {
    showtime()
        .args([
            "optimize", "-m", "ズートピア2", "-a", "新宿", "--from", "13:00", "--to", "20:00",
            "--buffer", "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalCandidates\": 1"))
        .stdout(predicate::str::contains("\"startTime\": \"14:00\""));
}

#[test]
fn optimize_without_listings_exits_with_error_payload() {
    showtime()
        .args(["optimize", "-m", "ズートピア2", "-a", "新宿", "--date", "2026-10-22"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"code\":\"NO_DATA\""));
}

#[test]
fn optimize_rejects_out_of_range_buffer() {
    showtime()
        .args(["optimize", "-m", "ズートピア2", "-a", "新宿", "--buffer", "200"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("INVALID_ARGUMENTS"));
}

#[test]
fn optimize_requires_snapshot() {
    Command::cargo_bin("showtime")
        .unwrap()
        .args(["optimize", "-m", "ズートピア2", "-a", "新宿"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--data"));
}

#[test]
fn anchor_format_requires_venue() {
    showtime()
        .args(["--anchor-format", "IMAX", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--anchor-venue"));
}

#[test]
fn anchor_venue_flag_promotes_runner_up() {
    let output = showtime()
        .args([
            "--anchor-venue",
            "TOHOシネマズ新宿",
            "optimize",
            "-m",
            "ズートピア2",
            "-m",
            "シャドウズ・エッジ",
            "-a",
            "新宿",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["candidates"][1]["schedule"][0]["startTime"], "14:00");
    assert_eq!(result["candidates"][1]["schedule"][0]["format"], "IMAX");
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog queries
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn showtimes_fuzzy_movie() {
    showtime()
        .args(["showtimes", "--movie", "ずーとぴあ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"movieTitle\": \"ズートピア2\""))
        .stdout(predicate::str::contains("\"totalShowtimes\": 3"));
}

#[test]
fn movies_lists_titles() {
    showtime()
        .args(["movies", "-a", "新宿"])
        .assert()
        .success()
        .stdout(predicate::str::contains("シャドウズ・エッジ"))
        .stdout(predicate::str::contains("\"totalCount\": 2"));
}

#[test]
fn theaters_resolve_builtin_alias() {
    showtime()
        .args(["theaters", "-a", "日比谷"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TOHOシネマズ日比谷"))
        .stdout(predicate::str::contains("\"totalCount\": 1"));
}

#[test]
fn theaters_resolve_custom_alias() {
    showtime()
        .args(["--aliases", &fixture("aliases.json"), "theaters", "-a", "サンシャイン"])
        .assert()
        .success()
        .stdout(predicate::str::contains("グランドシネマサンシャイン池袋"));
}

#[test]
fn status_reports_snapshot() {
    showtime()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"showtimeCount\": 8"))
        .stdout(predicate::str::contains("\"from\": \"2026-10-20\""));
}

#[test]
fn invalid_snapshot_fails() {
    Command::cargo_bin("showtime")
        .unwrap()
        .args(["--data", &fixture("options.json"), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load listing snapshot"));
}

// ─────────────────────────────────────────────────────────────────────────────
// call / tools
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn call_with_argument_file() {
    showtime()
        .args(["call", "optimize_schedule", "-i", &fixture("request.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalCandidates\": 6"))
        .stdout(predicate::str::contains("グランドシネマサンシャイン池袋"));
}

#[test]
fn call_with_stdin_arguments() {
    showtime()
        .args(["call", "list_movies"])
        .write_stdin(r#"{"areas":["池袋"]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"areas\": [\n    \"池袋\"\n  ]"));
}

#[test]
fn call_unknown_tool_exits_one() {
    showtime()
        .args(["call", "book_tickets"])
        .write_stdin("{}")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("UNKNOWN_TOOL"));
}

#[test]
fn tools_lists_definitions() {
    Command::cargo_bin("showtime")
        .unwrap()
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"optimize_schedule\""))
        .stdout(predicate::str::contains("\"get_data_status\""));
}

#[test]
fn no_subcommand_shows_usage() {
    Command::cargo_bin("showtime")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
