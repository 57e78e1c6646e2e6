//! Orchestrates credential resolution into a single [`Credentials`] bundle.

use std::env;
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use crate::config::ci::CiCredentials;
use crate::config::migrate::migrate_legacy_config;
use crate::config::setup;
use crate::config::store::{ConfigStore, env_var_name};
use crate::config::{CONFIG_BASE_NAME, CONFIG_DIR_NAME, ENV_PREFIX};
use crate::{Error, Result, git, gitlab};

/// Base name of the per-repository metadata display config, which also has
/// a legacy encoding to convert.
const METADATA_BASE_NAME: &str = "show_metadata";

/// The resolved credential and connection bundle.
///
/// Produced once per invocation by [`load`] and not mutated afterwards.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// GitLab host URL.
    pub host: String,
    /// Login of the authenticated user.
    pub user: String,
    /// API token.
    pub token: String,
    /// Custom CA bundle to trust, if configured.
    pub ca_file: Option<PathBuf>,
    /// Whether TLS certificate verification is disabled.
    pub skip_verify: bool,
}

impl Credentials {
    /// Token shortened for display. Never print the raw token.
    pub fn masked_token(&self) -> String {
        let token = &self.token;
        if token.len() <= 12 {
            format!("{}...", &token[..4.min(token.len())])
        } else {
            format!("{}...{}", &token[..4], &token[token.len() - 4..])
        }
    }
}

/// Resolve the active credentials, running first-time setup and username
/// resolution as needed. See the module docs for the precedence rules.
pub fn load() -> Result<Credentials> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    load_with(&mut input, setup::read_token, |host, token, skip_verify| {
        Ok(gitlab::current_user(host, token, skip_verify)?.username)
    })
}

/// [`load`] with the interactive token reader and the user resolver
/// supplied by the caller.
pub fn load_with<R, T, U>(input: &mut R, read_token: T, resolve_user: U) -> Result<Credentials>
where
    R: BufRead,
    T: FnOnce(&mut R) -> io::Result<String>,
    U: FnOnce(&str, &str, bool) -> Result<String>,
{
    // CI credentials win outright and are never persisted; they must be
    // checked before any file is read or migrated.
    if let Some(ci) = CiCredentials::from_env() {
        if let Some(user) = ci.user {
            return Ok(Credentials {
                host: ci.host,
                user,
                token: ci.token,
                ca_file: None,
                skip_verify: false,
            });
        }
    }

    let tool_dir = default_config_dir()?;
    let config_root = tool_dir.parent().unwrap_or(&tool_dir).to_path_buf();

    // Convert legacy config files at every known location.
    // NO NEW CANDIDATE LOCATIONS SHOULD BE ADDED BELOW.
    migrate_legacy_config(&config_root, &tool_dir, CONFIG_BASE_NAME)?;
    migrate_legacy_config(Path::new("."), Path::new("."), CONFIG_BASE_NAME)?;
    let mut git_tool_dir = None;
    if let Some(git_dir) = git::git_dir() {
        let dir = git_dir.join(CONFIG_DIR_NAME);
        migrate_legacy_config(&git_dir, &dir, CONFIG_BASE_NAME)?;
        migrate_legacy_config(&dir, &dir, METADATA_BASE_NAME)?;
        git_tool_dir = Some(dir);
    }

    let mut store = ConfigStore::new(CONFIG_BASE_NAME);
    store.add_search_path(".");
    store.add_search_path(&tool_dir);
    if let Some(dir) = &git_tool_dir {
        store.add_search_path(dir);
    }
    store.set_env_prefix(ENV_PREFIX);

    match store.load() {
        Ok(()) => {}
        Err(Error::ConfigNotFound) => {
            let confpath = tool_dir.join(format!("{CONFIG_BASE_NAME}.toml"));
            setup::run_with(&confpath, input, read_token)?;
            store.load()?;
        }
        Err(err) => return Err(err),
    }

    let host = store.get_string("core.host");
    let mut user = store.get_string("core.user");
    let token = store.get_string("core.token");
    let skip_verify = store.get_bool("tls.skip_verify");
    let ca_file = store.get_string("tls.ca_file");
    let ca_file = (!ca_file.is_empty()).then(|| PathBuf::from(ca_file));

    if user.is_empty() {
        user = resolve_user(&host, &token, skip_verify)?;
        // When host or token came from the environment the file's notion of
        // core.user may not correspond to this session, so leave it alone.
        if !env_override_present("core.host") && !env_override_present("core.token") {
            store.set("core.user", user.clone());
            store.write()?;
        }
    }

    Ok(Credentials {
        host,
        user,
        token,
        ca_file,
        skip_verify,
    })
}

/// Path of the config file written by first-run setup:
/// `<config root>/gl/gl.toml`. Creates the directory if missing.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(default_config_dir()?.join(format!("{CONFIG_BASE_NAME}.toml")))
}

fn default_config_dir() -> Result<PathBuf> {
    let config_root = match env::var("XDG_CONFIG_HOME") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .ok_or(Error::HomeDirUnavailable)?
            .join(".config"),
    };
    let tool_dir = config_root.join(CONFIG_DIR_NAME);
    if !tool_dir.is_dir() {
        fs::create_dir_all(&tool_dir)?;
    }
    Ok(tool_dir)
}

fn env_override_present(key: &str) -> bool {
    env::var(env_var_name(ENV_PREFIX, key))
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false)
}
