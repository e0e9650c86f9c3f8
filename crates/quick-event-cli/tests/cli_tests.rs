//! Integration tests for the `quick-event` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the url and parse
//! subcommands through the actual binary, including stdin input, settings
//! files, flag overrides and error reporting. Every run pins `--now` so the
//! output is reproducible.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Tuesday, October 20, 2026 at 09:00 UTC.
const NOW: &str = "2026-10-20T09:00:00Z";

/// Helper: path to the calendars.json fixture.
fn calendars_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/calendars.json")
}

/// Helper: path to the settings.json fixture.
fn settings_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/settings.json")
}

/// Helper: the binary with a fixed reference time and no inherited config.
fn quick_event() -> Command {
    let mut cmd = Command::cargo_bin("quick-event").unwrap();
    cmd.env_remove("QUICK_EVENT_LANG")
        .env_remove("QUICK_EVENT_TZ")
        .env_remove("QUICK_EVENT_CONFIG")
        .args(["--now", NOW]);
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// url subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn url_from_args() {
    quick_event()
        .args(["url", "Gym", "tomorrow", "2pm"])
        .assert()
        .success()
        .stdout(
            "https://www.google.com/calendar/event?action=TEMPLATE&text=Gym\
             &dates=20261021T140000%2F20261021T150000&details=&location=\n",
        );
}

#[test]
fn url_from_stdin() {
    quick_event()
        .arg("url")
        .write_stdin("Lunch Friday 1pm to 2pm\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "text=Lunch&dates=20261023T130000%2F20261023T140000",
        ));
}

#[test]
fn url_one_line_per_event() {
    let output = quick_event()
        .args(["url", "A 1pm; B 2pm; C 3pm"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("text=A&"));
    assert!(lines[1].contains("text=B&"));
    assert!(lines[2].contains("text=C&"));
}

#[test]
fn url_with_calendars_file() {
    quick_event()
        .args(["url", "--calendars", calendars_path(), "Standup 9am @work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text=Standup&"))
        .stdout(predicate::str::contains(
            "&src=team%40group.calendar.google.com",
        ));
}

#[test]
fn url_with_settings_file() {
    quick_event()
        .args(["url", "--config", settings_path(), "Spin class tomorrow 6pm @gym"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "https://calendar.example.com/render?action=TEMPLATE&text=Spin%20class",
        ))
        .stdout(predicate::str::contains(
            "dates=20261021T180000%2F20261021T190000",
        ))
        .stdout(predicate::str::contains("src=fitness%40group.calendar.google.com"));
}

#[test]
fn flags_override_settings_file() {
    quick_event()
        .args([
            "url",
            "--config",
            settings_path(),
            "--base-url",
            "https://other.example.com/event",
            "Gym tomorrow 2pm",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "https://other.example.com/event?action=TEMPLATE",
        ));
}

// ─────────────────────────────────────────────────────────────────────────────
// parse subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parse_prints_json() {
    let output = quick_event()
        .args([
            "parse",
            "--tz",
            "Europe/Paris",
            "Meeting d(discuss budget) l(Cafe) every week Friday 10am",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let events: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let event = &events[0];
    assert_eq!(event["title"], "Meeting");
    assert_eq!(event["start"], "2026-10-23T10:00:00+02:00");
    assert_eq!(event["end"], "2026-10-23T11:00:00+02:00");
    assert_eq!(event["recurrence_rule"], "RRULE:FREQ=WEEKLY;INTERVAL=1");
    assert_eq!(event["description"], "discuss budget");
    assert_eq!(event["location"], "Cafe");
    assert_eq!(event["is_all_day"], false);
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn no_events_fails_with_examples() {
    quick_event()
        .args(["url", "just some words"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Could not generate any events from the provided text",
        ))
        .stderr(predicate::str::contains("\"Meeting tomorrow 2pm\""));
}

#[test]
fn empty_stdin_fails() {
    quick_event()
        .arg("url")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid events found"));
}

#[test]
fn invalid_timezone_fails() {
    quick_event()
        .args(["url", "--tz", "Mars/Olympus", "Gym tomorrow 2pm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone: Mars/Olympus"));
}

#[test]
fn invalid_now_fails() {
    Command::cargo_bin("quick-event")
        .unwrap()
        .args(["url", "--now", "tomorrow", "Gym 2pm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --now"));
}

#[test]
fn missing_calendars_file_fails() {
    quick_event()
        .args(["url", "--calendars", "/nonexistent/calendars.json", "Gym 2pm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read calendars file"));
}

#[test]
fn missing_subcommand_shows_usage() {
    Command::cargo_bin("quick-event")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
