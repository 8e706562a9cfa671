//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running tswitch/tswitchd against fake
//! `trimorph-solo` and `systemctl` scripts.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// Spec polling timeouts
pub const SPEC_POLL_INTERVAL_MS: u64 = 10;
pub const SPEC_WAIT_MAX_MS: u64 = 5000;

/// Variables that would leak configuration from the invoking shell
const SCRUBBED_ENV: &[&str] = &[
    "TSWITCH_JAILS_DIR",
    "TSWITCH_JAIL_SUFFIX",
    "TSWITCH_SOLO_BIN",
    "TSWITCH_SYSTEMCTL_BIN",
    "TSWITCH_PROBE_TIMEOUT_MS",
    "TSWITCH_POLL_MS",
    "TSWITCH_STATE_DIR",
    "RUST_LOG",
    "COLOR",
];

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

pub fn tswitch_binary() -> PathBuf {
    binary_path("tswitch")
}

pub fn tswitchd_binary() -> PathBuf {
    binary_path("tswitchd")
}

/// Fake `systemctl`: reports the jail named in `$FAKE_STATE/active` as a
/// running scope.
const FAKE_SYSTEMCTL: &str = r#"#!/bin/sh
if [ -f "$FAKE_STATE/active" ]; then
    printf 'trimorph-%s.scope loaded active running Jail %s\n' "$(cat "$FAKE_STATE/active")" "$(cat "$FAKE_STATE/active")"
fi
exit 0
"#;

/// Fake `trimorph-solo` that activates the jail and runs the trailing command
pub const SOLO_CLEAN: &str = r#"#!/bin/sh
echo "$1" > "$FAKE_STATE/active"
shift
exec "$@"
"#;

/// Fake `trimorph-solo` that refuses the jail
pub const SOLO_FAILS: &str = r#"#!/bin/sh
echo "no such jail: $1" >&2
exit 1
"#;

/// Fake `trimorph-solo` that activates the jail but complains on stderr
pub const SOLO_WARNS: &str = r#"#!/bin/sh
echo "$1" > "$FAKE_STATE/active"
echo "removed stale lock" >&2
shift
exec "$@"
"#;

/// Isolated jail directory, state directory and fake tools
pub struct Fixture {
    root: tempfile::TempDir,
}

impl Fixture {
    /// Empty jail directory, nothing active, clean-switching solo tool
    pub fn new() -> Self {
        let fixture = Self {
            root: tempfile::tempdir().unwrap(),
        };
        std::fs::create_dir_all(fixture.jails_dir()).unwrap();
        std::fs::create_dir_all(fixture.bin_dir()).unwrap();
        fixture.script("systemctl", FAKE_SYSTEMCTL);
        fixture.solo(SOLO_CLEAN);
        fixture
    }

    /// Fixture with one config file per jail
    pub fn with_jails(ids: &[&str]) -> Self {
        let fixture = Self::new();
        for id in ids {
            fixture.add_jail(id);
        }
        fixture
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn jails_dir(&self) -> PathBuf {
        self.root().join("jails.d")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root().join("state")
    }

    pub fn status_path(&self) -> PathBuf {
        self.state_dir().join("status.json")
    }

    fn bin_dir(&self) -> PathBuf {
        self.root().join("bin")
    }

    pub fn add_jail(&self, id: &str) {
        std::fs::write(
            self.jails_dir().join(format!("{id}.conf")),
            format!("name = {id}\n"),
        )
        .unwrap();
    }

    /// Mark `id` as the running scope
    pub fn set_active(&self, id: &str) {
        std::fs::write(self.root().join("active"), id).unwrap();
    }

    /// Replace the fake `trimorph-solo`
    pub fn solo(&self, body: &str) {
        self.script("trimorph-solo", body);
    }

    fn script(&self, name: &str, body: &str) {
        let path = self.bin_dir().join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn envs(&self) -> Vec<(String, String)> {
        let path = |p: PathBuf| p.to_string_lossy().into_owned();
        vec![
            ("FAKE_STATE".into(), path(self.root().to_path_buf())),
            ("TSWITCH_JAILS_DIR".into(), path(self.jails_dir())),
            ("TSWITCH_STATE_DIR".into(), path(self.state_dir())),
            ("TSWITCH_SOLO_BIN".into(), path(self.bin_dir().join("trimorph-solo"))),
            ("TSWITCH_SYSTEMCTL_BIN".into(), path(self.bin_dir().join("systemctl"))),
            ("NO_COLOR".into(), "1".into()),
        ]
    }

    /// Run tswitch in this fixture
    pub fn tswitch(&self) -> CliBuilder {
        CliBuilder::new(tswitch_binary(), self.envs())
    }

    /// A tswitchd command in this fixture (not started)
    pub fn tswitchd(&self) -> Command {
        let mut cmd = Command::new(tswitchd_binary());
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        cmd.envs(self.envs());
        cmd
    }

    /// Parsed status file, if written
    pub fn status(&self) -> Option<serde_json::Value> {
        let text = std::fs::read_to_string(self.status_path()).ok()?;
        serde_json::from_str(&text).ok()
    }

    /// Label of the published status, if any
    pub fn status_label(&self) -> Option<String> {
        self.status()?["label"].as_str().map(str::to_string)
    }

    pub fn daemon_log(&self) -> String {
        std::fs::read_to_string(self.state_dir().join("daemon.log"))
            .unwrap_or_else(|_| "(no daemon log)".to_string())
    }
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    binary: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    unset: Vec<String>,
}

impl CliBuilder {
    fn new(binary: PathBuf, envs: Vec<(String, String)>) -> Self {
        Self {
            binary,
            args: Vec::new(),
            envs,
            unset: Vec::new(),
        }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Run with `key` unset, overriding the fixture
    pub fn without_env(mut self, key: &str) -> Self {
        self.envs.retain(|(k, _)| k != key);
        self.unset.push(key.to_string());
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(self.binary);
        cmd.args(&self.args);
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        for key in &self.unset {
            cmd.env_remove(key);
        }
        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stderr equals expected exactly (with diff on failure).
    pub fn stderr_eq(self, expected: &str) -> Self {
        let stderr = self.stderr();
        similar_asserts::assert_eq!(stderr, expected);
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    pub fn stderr_lacks(self, unexpected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            !stderr.contains(unexpected),
            "stderr should not contain '{}'\nstderr: {}",
            unexpected,
            stderr
        );
        self
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}

/// Poll a condition until it returns true or timeout is reached.
pub fn wait_for<F>(timeout_ms: u64, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);
    let poll_interval = std::time::Duration::from_millis(SPEC_POLL_INTERVAL_MS);

    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(poll_interval);
    }
    false
}
