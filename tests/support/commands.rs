//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an nvoi command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - Current directory set to the test working directory
    /// - `NVOI_*` variables removed so the host cannot leak a key in
    /// - Colors disabled
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("nvoi").expect("failed to find nvoi binary");
        cmd.env_remove("NVOI_MASTER_KEY");
        cmd.env_remove("NVOI_CREDENTIALS");
        cmd.env_remove("NVOI_LOG");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `nvoi init --name`.
    pub fn init_cmd(&self, name: &str) -> Output {
        self.cmd()
            .args(["init", "--name", name])
            .output()
            .expect("failed to run nvoi init")
    }

    /// Shortcut for `nvoi credentials show`.
    pub fn show(&self) -> Output {
        self.cmd()
            .args(["credentials", "show"])
            .output()
            .expect("failed to run nvoi credentials show")
    }

    /// Shortcut for `nvoi credentials set`.
    pub fn set(&self, path: &str, value: &str) -> Output {
        self.cmd()
            .args(["credentials", "set", path, value])
            .output()
            .expect("failed to run nvoi credentials set")
    }

    /// Shortcut for `nvoi check`.
    pub fn check(&self) -> Output {
        self.cmd()
            .arg("check")
            .output()
            .expect("failed to run nvoi check")
    }

    /// Shortcut for `nvoi check --json`.
    pub fn check_json(&self) -> Output {
        self.cmd()
            .args(["check", "--json"])
            .output()
            .expect("failed to run nvoi check --json")
    }

    /// Shortcut for `nvoi status`.
    pub fn status(&self) -> Output {
        self.cmd()
            .arg("status")
            .output()
            .expect("failed to run nvoi status")
    }
}
