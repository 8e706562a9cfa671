//! tswitchd lifecycle specs

use crate::prelude::*;
use std::io::{BufRead, BufReader};
use std::process::{Child, Stdio};
use std::sync::mpsc;
use std::time::Duration;

/// A running tswitchd that is terminated on drop
struct Daemon {
    child: Child,
}

impl Daemon {
    /// Spawn tswitchd and wait for it to print READY
    fn start(fixture: &Fixture) -> Self {
        let mut child = fixture
            .tswitchd()
            // Long poll period so only watcher events drive refreshes
            .env("TSWITCH_POLL_MS", "600000")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        let stdout = child.stdout.take().unwrap();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        let ready = rx
            .recv_timeout(Duration::from_millis(SPEC_WAIT_MAX_MS))
            .unwrap_or_default();
        assert_eq!(ready, "READY", "daemon log:\n{}", fixture.daemon_log());
        Self { child }
    }

    fn terminate(&mut self) -> Option<i32> {
        let _ = std::process::Command::new("kill")
            .args(["-TERM", &self.child.id().to_string()])
            .status();
        self.child.wait().ok().and_then(|s| s.code())
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn publishes_status_before_ready() {
    let fixture = Fixture::with_jails(&["db"]);
    fixture.set_active("db");

    let _daemon = Daemon::start(&fixture);

    assert_eq!(fixture.status_label().as_deref(), Some("jail: db"));
}

#[test]
fn refreshes_when_a_jail_config_changes() {
    let fixture = Fixture::with_jails(&["db"]);
    fixture.set_active("db");
    let _daemon = Daemon::start(&fixture);

    fixture.set_active("web");
    fixture.add_jail("web");

    let refreshed = wait_for(SPEC_WAIT_MAX_MS, || {
        fixture.status_label().as_deref() == Some("jail: web")
    });
    assert!(refreshed, "daemon log:\n{}", fixture.daemon_log());
}

#[test]
fn refreshes_on_the_timer() {
    let fixture = Fixture::with_jails(&["db"]);
    let mut child = fixture
        .tswitchd()
        .env("TSWITCH_POLL_MS", "100")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let published = wait_for(SPEC_WAIT_MAX_MS, || {
        fixture.status_label().as_deref() == Some("jail: none")
    });
    fixture.set_active("db");
    let refreshed = wait_for(SPEC_WAIT_MAX_MS, || {
        fixture.status_label().as_deref() == Some("jail: db")
    });

    let _ = child.kill();
    let _ = child.wait();
    assert!(published && refreshed, "daemon log:\n{}", fixture.daemon_log());
}

#[test]
fn second_instance_refuses_to_start() {
    let fixture = Fixture::with_jails(&["db"]);
    let _daemon = Daemon::start(&fixture);

    let output = fixture.tswitchd().output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("tswitchd is already running"));
}

#[test]
fn sigterm_shuts_down_cleanly() {
    let fixture = Fixture::with_jails(&["db"]);
    let mut daemon = Daemon::start(&fixture);
    let pid_file = fixture.state_dir().join("daemon.pid");
    assert!(pid_file.exists());

    assert_eq!(daemon.terminate(), Some(0));

    assert!(!pid_file.exists());
    assert!(fixture.daemon_log().contains("--- tswitchd: starting (pid: "));
}

#[test]
fn switch_while_daemon_runs_keeps_generations_increasing() {
    let fixture = Fixture::with_jails(&["db", "web"]);
    fixture.set_active("web");
    let mut child = fixture
        .tswitchd()
        .env("TSWITCH_POLL_MS", "50")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let generation = || {
        fixture
            .status()
            .and_then(|s| s["generation"].as_u64())
            .unwrap_or(0)
    };

    let warmed_up = wait_for(SPEC_WAIT_MAX_MS, || generation() >= 5);
    let before = generation();
    fixture.tswitch().args(&["switch", "db"]).passes();
    let after = generation();
    let settled = wait_for(SPEC_WAIT_MAX_MS, || {
        fixture.status_label().as_deref() == Some("jail: db")
    });

    let _ = child.kill();
    let _ = child.wait();
    assert!(warmed_up, "daemon log:\n{}", fixture.daemon_log());
    assert!(after > before, "generation went from {before} to {after}");
    assert!(settled, "daemon log:\n{}", fixture.daemon_log());
}
