//! Credential and connection resolution for the GitLab API.
//!
//! Every API-touching command needs the same five settings: host, user,
//! token, CA file and TLS-verification policy. [`load`] resolves them once
//! per invocation, with the following precedence:
//!
//! 1. GitLab CI job credentials (`CI_JOB_TOKEN` et al.) - never persisted
//! 2. The first `gl.toml` found in: the current directory, the tool config
//!    directory under `$XDG_CONFIG_HOME` (default `~/.config/gl`), and the
//!    repository's `.git/gl` directory - with `GL_*` environment variables
//!    overriding individual keys
//! 3. Interactive first-run setup, which writes the initial config file
//!
//! Legacy `gl.yml` files are converted to `gl.toml` in place before the
//! search runs; see the [`migrate`] module.

pub mod ci;
pub mod loader;
pub mod migrate;
pub mod setup;
pub mod store;

pub use ci::CiCredentials;
pub use loader::{Credentials, default_config_path, load, load_with};
pub use migrate::migrate_legacy_config;
pub use setup::DEFAULT_GITLAB_HOST;
pub use store::{ConfigStore, env_var_name};

/// Base name of config files (`gl.toml`, legacy `gl.yml`).
pub const CONFIG_BASE_NAME: &str = "gl";

/// Name of the tool's subdirectory under the config root and the git dir.
pub const CONFIG_DIR_NAME: &str = "gl";

/// Prefix for environment variable overrides (`GL_CORE_HOST`, ...).
pub const ENV_PREFIX: &str = "GL";
