//! Shared setup for CLI tests: every run gets its own session file and
//! config directory so nothing leaks between tests or from the host.

use assert_cmd::Command;
use tempfile::TempDir;

pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// `fitform` with isolated config, session and no terminal on stdin.
    pub fn fitform(&self) -> Command {
        let mut cmd = Command::cargo_bin("fitform").expect("binary built");
        cmd.env("FITFORM_SESSION__PATH", self.dir.path().join("session.json"))
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env("HOME", self.dir.path())
            .env("NO_COLOR", "1")
            .env_remove("FITFORM_PASSWORD")
            .env_remove("FITFORM_LOCALE")
            .env_remove("FITFORM_API__OFFLINE")
            .env_remove("RUST_LOG")
            .write_stdin("");
        cmd
    }
}
