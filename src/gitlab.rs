//! GitLab API interactions for identity resolution.
//!
//! Only one endpoint is needed here: `GET /api/v4/user`, which maps an API
//! token to the authenticated account. Commands talking to the rest of the
//! API build on the credentials resolved through the [`crate::config`]
//! module.

use serde::Deserialize;
use thiserror::Error;

/// Versioned API root appended to the configured host.
const API_ROOT_PATH: &str = "/api/v4";

/// User-Agent header sent with API requests.
const USER_AGENT: &str = "glcli";

/// Errors that can occur while resolving the authenticated user.
#[derive(Debug, Error)]
pub enum UserResolveError {
    /// Token is invalid or expired (401 Unauthorized)
    #[error("invalid or expired token: GitLab returned 401 Unauthorized")]
    Unauthorized,

    /// Token lacks the `api` scope (403 Forbidden)
    #[error("token lacks required scope: GitLab returned 403 Forbidden")]
    Forbidden,

    /// HTTP client could not be constructed
    #[error("could not build HTTP client: {0}")]
    Client(String),

    /// Network or other HTTP error
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse the response body
    #[error("failed to parse GitLab response: {0}")]
    Parse(String),
}

/// Response from the GitLab GET /user endpoint (only fields we care about).
#[derive(Debug, Deserialize)]
pub struct GitLabUser {
    /// GitLab login/username
    pub username: String,
    /// User ID
    pub id: u64,
    /// Display name (optional)
    pub name: Option<String>,
}

/// Resolve the user a token authenticates as.
///
/// TLS certificate verification is performed unless `skip_verify` is set -
/// an explicit opt-in for self-signed GitLab instances.
pub fn current_user(
    host: &str,
    token: &str,
    skip_verify: bool,
) -> Result<GitLabUser, UserResolveError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(skip_verify)
        .build()
        .map_err(|e| UserResolveError::Client(e.to_string()))?;

    let url = format!("{}{}/user", host.trim_end_matches('/'), API_ROOT_PATH);
    let response = client
        .get(&url)
        .header("PRIVATE-TOKEN", token)
        .send()
        .map_err(|e| UserResolveError::Http(e.to_string()))?;

    let status = response.status();
    match status.as_u16() {
        401 => Err(UserResolveError::Unauthorized),
        403 => Err(UserResolveError::Forbidden),
        _ if status.is_success() => response
            .json::<GitLabUser>()
            .map_err(|e| UserResolveError::Parse(e.to_string())),
        code => {
            let body = response.text().unwrap_or_default();
            Err(UserResolveError::Http(format!("HTTP {}: {}", code, body)))
        }
    }
}
