//! Interactive first-run setup.
//!
//! Prompts for the GitLab host and an API token, then writes the initial
//! config file. The token is read with a no-echo primitive when stdin is a
//! terminal and is never echoed or logged.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use url::Url;

use crate::config::store::{ConfigStore, env_var_name};
use crate::config::{CONFIG_BASE_NAME, ENV_PREFIX};
use crate::{Error, Result};

/// Host used when the user accepts the default at the prompt.
pub const DEFAULT_GITLAB_HOST: &str = "https://gitlab.com";

/// Path of the personal-access-token management page on any GitLab host.
const TOKEN_PAGE_PATH: &str = "/profile/personal_access_tokens";

/// Run the setup dialog and write the resulting config to `confpath`.
///
/// When `GL_CORE_HOST` is set the host prompt is skipped and the
/// environment value is written to the config instead, so a host-only
/// override still produces a complete file.
pub fn run<R: BufRead>(confpath: &Path, input: &mut R) -> Result<()> {
    run_with(confpath, input, read_token)
}

/// [`run`] with the token reader supplied by the caller.
pub fn run_with<R, T>(confpath: &Path, input: &mut R, read_token: T) -> Result<()>
where
    R: BufRead,
    T: FnOnce(&mut R) -> io::Result<String>,
{
    let host = match env_host_override() {
        Some(host) => host,
        None => prompt_host(input)?,
    };

    let mut token_url = Url::parse(&host).map_err(|source| Error::InvalidHost {
        host: host.clone(),
        source,
    })?;
    token_url.set_path(TOKEN_PAGE_PATH);

    println!("Create a token here: {token_url}");
    print!("Enter default GitLab token (scope: api): ");
    io::stdout().flush()?;
    let token = read_token(input)?;

    let mut store = ConfigStore::new(CONFIG_BASE_NAME);
    store.set("core.host", host);
    store.set("core.token", token);
    store.write_to(confpath)?;

    println!();
    println!("Config saved to {}", confpath.display());
    Ok(())
}

fn env_host_override() -> Option<String> {
    std::env::var(env_var_name(ENV_PREFIX, "core.host"))
        .ok()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
}

fn prompt_host<R: BufRead>(input: &mut R) -> Result<String> {
    print!("Enter GitLab host (default: {DEFAULT_GITLAB_HOST}): ");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let host = line.trim();
    Ok(if host.is_empty() {
        DEFAULT_GITLAB_HOST.to_string()
    } else {
        host.to_string()
    })
}

/// Default token reader: masked terminal input, or a plain line from
/// `input` when stdin is piped (scripted setups, tests).
pub(crate) fn read_token<R: BufRead>(input: &mut R) -> io::Result<String> {
    let token = if io::stdin().is_terminal() {
        rpassword::read_password()?
    } else {
        rpassword::read_password_from_bufread(input)?
    };
    Ok(token.trim().to_string())
}
