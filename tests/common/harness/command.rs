//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `vaultport` binary.
pub struct VaultportCommand {
    args: Vec<String>,
}

impl VaultportCommand {
    /// Creates a new command for the `vaultport` binary.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Sets the `--config` option.
    pub fn config(self, path: &Path) -> Self {
        self.arg("--config").path(path)
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    fn arg(self, arg: &str) -> Self {
        self.args([arg])
    }

    fn path(self, path: &Path) -> Self {
        self.args([path.to_string_lossy()])
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("vaultport").expect("Failed to find vaultport binary");
        cmd.args(&self.args);
        cmd.env_remove("RUST_LOG");
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `export` command.
    pub fn export(self) -> Self {
        self.arg("export")
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.arg("ls")
    }

    // ===========================================
    // Option Modifiers
    // ===========================================

    /// Adds `--snapshot <path>`.
    pub fn snapshot(self, path: &Path) -> Self {
        self.arg("--snapshot").path(path)
    }

    /// Adds `--profile <path>`.
    pub fn profile(self, path: &Path) -> Self {
        self.arg("--profile").path(path)
    }

    /// Adds `--dest <path>`.
    pub fn dest(self, path: &Path) -> Self {
        self.arg("--dest").path(path)
    }

    /// Adds `--assets-namespace <ns>`.
    pub fn assets_namespace(self, namespace: &str) -> Self {
        self.args(["--assets-namespace", namespace])
    }

    /// Adds `--fail-fast`.
    pub fn fail_fast(self) -> Self {
        self.arg("--fail-fast")
    }

    /// Adds `--format json`.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `-v`.
    pub fn verbose(self) -> Self {
        self.arg("-v")
    }
}

impl Default for VaultportCommand {
    fn default() -> Self {
        Self::new()
    }
}
