//! `tswitch switch` specs

use crate::prelude::*;

#[test]
fn clean_switch_reports_and_refreshes() {
    let fixture = Fixture::with_jails(&["db", "web"]);

    fixture
        .tswitch()
        .args(&["switch", "db"])
        .passes()
        .stdout_eq("Switched to db\n")
        .stderr_eq("");

    assert_eq!(fixture.status_label().as_deref(), Some("jail: db"));
}

#[test]
fn failed_switch_is_an_error_and_leaves_status_alone() {
    let fixture = Fixture::with_jails(&["db"]);
    fixture.solo(SOLO_FAILS);

    let run = fixture
        .tswitch()
        .args(&["switch", "ghost"])
        .fails()
        .stderr_has("error: ")
        .stderr_has("exited with code 1: no such jail: ghost");

    assert_eq!(run.code(), Some(1));
    assert_eq!(run.stdout(), "");
    assert!(fixture.status().is_none());
}

#[test]
fn switch_with_diagnostics_warns_and_refreshes() {
    let fixture = Fixture::with_jails(&["db"]);
    fixture.solo(SOLO_WARNS);

    fixture
        .tswitch()
        .args(&["switch", "db"])
        .passes()
        .stdout_eq("")
        .stderr_eq("warning: Switched to db (removed stale lock)\n");

    assert_eq!(fixture.status_label().as_deref(), Some("jail: db"));
}

#[test]
fn missing_activation_tool_is_an_error() {
    let fixture = Fixture::with_jails(&["db"]);

    fixture
        .tswitch()
        .env("TSWITCH_SOLO_BIN", "/nonexistent/trimorph-solo")
        .args(&["switch", "db"])
        .fails()
        .stderr_has("error: failed to run /nonexistent/trimorph-solo");
}

#[test]
fn json_report() {
    let fixture = Fixture::with_jails(&["db"]);

    let run = fixture.tswitch().args(&["-o", "json", "switch", "db"]).passes();
    let json = run.json();

    assert_eq!(json["jail"], "db");
    assert_eq!(json["severity"], "info");
    assert_eq!(json["message"], "Switched to db");
    assert_eq!(json["status"]["label"], "jail: db");
}

#[test]
fn json_report_for_failure_has_no_status() {
    let fixture = Fixture::with_jails(&["db"]);
    fixture.solo(SOLO_FAILS);

    let run = fixture.tswitch().args(&["-o", "json", "switch", "db"]).fails();
    let json = run.json();

    assert_eq!(json["severity"], "error");
    assert!(json.get("status").is_none());
}

#[test]
fn prompt_requires_a_terminal() {
    let fixture = Fixture::with_jails(&["db"]);

    fixture
        .tswitch()
        .args(&["switch"])
        .fails()
        .stderr_has("stdin is not a terminal");
}

#[test]
fn prompt_with_no_jails_is_informational() {
    let fixture = Fixture::new();
    let expected = format!("No jails available in {}\n", fixture.jails_dir().display());

    fixture.tswitch().args(&["switch"]).passes().stdout_eq(&expected);
}
