//! Credentials supplied by the GitLab CI execution environment.

use std::env;

/// Credentials derived from GitLab CI job variables.
///
/// `user` is optional: `CI_JOB_TOKEN` and `CI_PROJECT_URL` are always set
/// inside a job, but `GITLAB_USER_LOGIN` depends on how the pipeline was
/// triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiCredentials {
    /// GitLab host, derived from the project URL.
    pub host: String,
    /// Login of the user that triggered the job, if known.
    pub user: Option<String>,
    /// The per-job CI token.
    pub token: String,
}

impl CiCredentials {
    /// Read CI credentials from the process environment.
    ///
    /// Returns `None` unless `CI_JOB_TOKEN` is non-empty and a host can be
    /// derived by stripping the `CI_PROJECT_PATH` suffix from
    /// `CI_PROJECT_URL`.
    pub fn from_env() -> Option<Self> {
        let token = env::var("CI_JOB_TOKEN").unwrap_or_default();
        if token.is_empty() {
            return None;
        }

        let project_url = env::var("CI_PROJECT_URL").unwrap_or_default();
        let project_path = env::var("CI_PROJECT_PATH").unwrap_or_default();
        let host = project_url
            .strip_suffix(project_path.as_str())
            .unwrap_or(&project_url)
            .to_string();
        if host.is_empty() {
            return None;
        }

        let user = env::var("GITLAB_USER_LOGIN")
            .ok()
            .filter(|u| !u.is_empty());

        Some(Self { host, user, token })
    }
}
