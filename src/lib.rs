//! glcli - a command-line client for GitLab.
//!
//! This library provides the core functionality for the `gl` CLI tool,
//! most importantly the credential and connection resolution every
//! API-touching command depends on (see the [`config`] module).

pub mod cli;
pub mod config;
pub mod git;
pub mod gitlab;

/// Library-level error type for glcli operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("invalid legacy config file: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("no config file found in any search path")]
    ConfigNotFound,

    #[error("config store has no backing file to write to")]
    NoBackingFile,

    #[error("could not determine home directory")]
    HomeDirUnavailable,

    #[error("invalid GitLab host {host:?}: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    #[error("could not resolve current user: {0}")]
    UserResolve(#[from] gitlab::UserResolveError),
}

/// Result type alias for glcli operations.
pub type Result<T> = std::result::Result<T, Error>;
