//! Git repository discovery.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Locate the git directory for the repository containing the current
/// working directory. `None` when not inside a repository or when git is
/// unavailable.
pub fn git_dir() -> Option<PathBuf> {
    git_dir_in(Path::new("."))
}

/// Locate the git directory for the repository containing `dir`.
pub fn git_dir_in(dir: &Path) -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--absolute-git-dir"])
        .current_dir(dir)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8(output.stdout).ok()?;
    let path = stdout.trim();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}
