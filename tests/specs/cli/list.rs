//! `tswitch list` specs

use crate::prelude::*;

#[test]
fn missing_jail_directory_is_an_error() {
    let fixture = Fixture::new();
    std::fs::remove_dir(fixture.jails_dir()).unwrap();

    fixture
        .tswitch()
        .args(&["list"])
        .fails()
        .stderr_has("jail directory not found");
}

#[test]
fn empty_jail_directory_is_informational() {
    let fixture = Fixture::new();
    let expected = format!("No jails configured in {}\n", fixture.jails_dir().display());

    fixture.tswitch().args(&["list"]).passes().stdout_eq(&expected);
}

#[test]
fn marks_the_active_jail() {
    let fixture = Fixture::with_jails(&["db", "web"]);
    fixture.set_active("db");

    let run = fixture.tswitch().args(&["list"]).passes();
    let mut lines: Vec<String> = run.stdout().lines().map(str::to_string).collect();
    lines.sort();

    assert_eq!(lines, ["  web", "* db"]);
}

#[test]
fn ignores_files_without_the_config_suffix() {
    let fixture = Fixture::with_jails(&["web"]);
    std::fs::write(fixture.jails_dir().join("README"), "notes\n").unwrap();

    fixture.tswitch().args(&["list"]).passes().stdout_eq("  web\n");
}

#[test]
fn jails_dir_flag_overrides_environment() {
    let fixture = Fixture::new();
    let other = tempfile::tempdir().unwrap();
    std::fs::write(other.path().join("scratch.conf"), "name = scratch\n").unwrap();

    fixture
        .tswitch()
        .args(&["list", "--jails-dir", other.path().to_str().unwrap()])
        .passes()
        .stdout_eq("  scratch\n");
}

#[test]
fn json_output() {
    let fixture = Fixture::with_jails(&["web"]);
    fixture.set_active("web");

    let run = fixture.tswitch().args(&["-o", "json", "list"]).passes();
    let json = run.json();

    assert_eq!(json[0]["id"], "web");
    assert_eq!(json[0]["active"], true);
    assert!(json[0]["path"].as_str().unwrap().ends_with("web.conf"));
}

#[test]
fn failing_probe_reports_nothing_active() {
    let fixture = Fixture::with_jails(&["web"]);
    fixture.set_active("web");

    fixture
        .tswitch()
        .env("TSWITCH_SYSTEMCTL_BIN", "/nonexistent/systemctl")
        .args(&["list"])
        .passes()
        .stdout_eq("  web\n");
}

#[test]
fn works_without_a_state_directory() {
    let fixture = Fixture::with_jails(&["web"]);

    fixture
        .tswitch()
        .without_env("TSWITCH_STATE_DIR")
        .without_env("XDG_STATE_HOME")
        .without_env("HOME")
        .args(&["list"])
        .passes()
        .stdout_eq("  web\n");
}
