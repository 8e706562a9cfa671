//! Help and version output specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    Fixture::new()
        .tswitch()
        .args(&["--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("status")
        .stdout_has("switch");
}

#[test]
fn no_subcommand_prints_help() {
    Fixture::new()
        .tswitch()
        .passes()
        .stdout_has("Usage:")
        .stdout_has("switch");
}

#[test]
fn unknown_subcommand_fails() {
    Fixture::new()
        .tswitch()
        .args(&["frobnicate"])
        .fails()
        .stderr_has("frobnicate");
}

#[test]
fn daemon_help_and_version() {
    let fixture = Fixture::new();

    let output = fixture.tswitchd().arg("--help").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("USAGE:"));

    let output = fixture.tswitchd().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("tswitchd "));
}

#[test]
fn daemon_rejects_unexpected_arguments() {
    let output = Fixture::new().tswitchd().arg("--foreground").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unexpected argument '--foreground'"));
}
