//! CLI argument definitions for glcli.

use clap::{Parser, Subcommand};

/// Version string including build metadata from `build.rs`.
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GL_GIT_COMMIT"),
    " ",
    env!("GL_BUILD_TIMESTAMP"),
    ")"
);

/// A command-line client for GitLab.
#[derive(Parser, Debug)]
#[command(name = "gl")]
#[command(author, version, long_version = LONG_VERSION)]
#[command(about = "A command-line client for GitLab", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved connection settings (token masked)
    ///
    /// Resolves credentials the same way every API command does: CI job
    /// variables, then config files with GL_* environment overrides, then
    /// interactive first-run setup.
    Status,

    /// Create the default config file interactively
    ///
    /// Writes to gl/gl.toml under $XDG_CONFIG_HOME (default ~/.config),
    /// replacing an existing file.
    Init,
}
