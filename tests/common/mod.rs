//! Common test utilities for glcli integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't touch the
//! user's real `~/.config/gl/` directory or leak credential environment
//! variables from the host into a test.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
pub use tempfile::TempDir;

/// Credential-bearing variables that must never leak from the host
/// environment into a test invocation.
pub const SCRUBBED_VARS: &[&str] = &[
    "GL_CORE_HOST",
    "GL_CORE_USER",
    "GL_CORE_TOKEN",
    "GL_TLS_SKIP_VERIFY",
    "GL_TLS_CA_FILE",
    "CI_JOB_TOKEN",
    "CI_PROJECT_URL",
    "CI_PROJECT_PATH",
    "GITLAB_USER_LOGIN",
];

/// A test environment with isolated home and working directories.
///
/// The `gl()` method returns a `Command` with `HOME`/`XDG_CONFIG_HOME`
/// pointed at the temp home and all credential variables scrubbed, making
/// tests parallel-safe.
pub struct TestEnv {
    pub home_dir: TempDir,
    pub work_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with isolated directories.
    pub fn new() -> Self {
        Self {
            home_dir: TempDir::new().unwrap(),
            work_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the gl binary with an isolated environment.
    pub fn gl(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gl"));
        cmd.current_dir(self.work_dir.path());
        cmd.env("HOME", self.home_dir.path());
        cmd.env("XDG_CONFIG_HOME", self.config_root());
        for var in SCRUBBED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// The config root (`$XDG_CONFIG_HOME`) for this environment.
    pub fn config_root(&self) -> PathBuf {
        self.home_dir.path().join(".config")
    }

    /// The tool's config directory under the config root.
    pub fn tool_dir(&self) -> PathBuf {
        self.config_root().join("gl")
    }

    /// The default config file path.
    pub fn config_path(&self) -> PathBuf {
        self.tool_dir().join("gl.toml")
    }

    /// The working directory commands run in.
    pub fn work_path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Write a current-format config file at the default location.
    pub fn write_config(&self, content: &str) {
        fs::create_dir_all(self.tool_dir()).unwrap();
        fs::write(self.config_path(), content).unwrap();
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
