//! Key-value configuration store with search paths and env overrides.
//!
//! `ConfigStore` is the single abstraction the rest of the crate goes
//! through to read and persist configuration. It resolves values with the
//! following precedence (highest to lowest):
//!
//! 1. Environment variable override (`GL_CORE_HOST` for `core.host`, when
//!    an env prefix is registered)
//! 2. The first `<base>.toml` found in the registered search paths
//!
//! Keys are dotted `section.field` pairs (`core.host`, `tls.skip_verify`).
//! Absence is never an error: `get_string` returns `""` and `get_bool`
//! returns `false` for unset keys. Only [`ConfigStore::load`] distinguishes
//! "no config file anywhere" (`Error::ConfigNotFound`) so the caller can
//! fall back to first-run setup.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use toml::Value;
use toml::value::Table;

use crate::{Error, Result};

/// Translate a dotted key into its override variable name for `prefix`,
/// e.g. `("GL", "core.host")` -> `GL_CORE_HOST`.
pub fn env_var_name(prefix: &str, key: &str) -> String {
    format!("{}_{}", prefix, key.replace('.', "_")).to_uppercase()
}

/// Searchable, env-aware configuration store backed by a TOML table.
#[derive(Debug, Default)]
pub struct ConfigStore {
    base_name: String,
    search_paths: Vec<PathBuf>,
    env_prefix: Option<String>,
    values: Table,
    file_path: Option<PathBuf>,
}

impl ConfigStore {
    /// Create an empty store for config files named `<base_name>.toml`.
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            ..Default::default()
        }
    }

    /// Append a directory to the search list. Paths are searched in the
    /// order they were added; the first hit wins.
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.push(path.into());
    }

    /// Enable automatic environment overrides with the given prefix.
    pub fn set_env_prefix(&mut self, prefix: impl Into<String>) {
        self.env_prefix = Some(prefix.into());
    }

    /// The file the store was loaded from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Read the first matching config file from the search paths into the
    /// store, replacing any previously loaded values.
    ///
    /// Returns `Error::ConfigNotFound` when no search path contains a
    /// `<base>.toml`; any other failure is a real parse or IO error.
    pub fn load(&mut self) -> Result<()> {
        for dir in &self.search_paths {
            let candidate = dir.join(format!("{}.toml", self.base_name));
            if !candidate.is_file() {
                continue;
            }
            let raw = fs::read_to_string(&candidate)?;
            self.values = toml::from_str(&raw)?;
            self.file_path = Some(candidate);
            return Ok(());
        }
        Err(Error::ConfigNotFound)
    }

    /// Resolve a string value. Empty string when unset.
    pub fn get_string(&self, key: &str) -> String {
        if let Some(v) = self.env_override(key) {
            return v;
        }
        match self.lookup(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Integer(i)) => i.to_string(),
            Some(Value::Float(f)) => f.to_string(),
            Some(Value::Boolean(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Resolve a boolean value. `false` when unset or not a boolean.
    pub fn get_bool(&self, key: &str) -> bool {
        if let Some(v) = self.env_override(key) {
            return parse_bool(&v);
        }
        match self.lookup(key) {
            Some(Value::Boolean(b)) => *b,
            Some(Value::String(s)) => parse_bool(s),
            _ => false,
        }
    }

    /// Set a value in the in-memory table. Not persisted until
    /// [`ConfigStore::write`] or [`ConfigStore::write_to`] is called.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let (section, field) = match key.split_once('.') {
            Some(pair) => pair,
            None => {
                self.values.insert(key.to_string(), value.into());
                return;
            }
        };
        let entry = self
            .values
            .entry(section.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        if !entry.is_table() {
            *entry = Value::Table(Table::new());
        }
        if let Value::Table(table) = entry {
            table.insert(field.to_string(), value.into());
        }
    }

    /// Write the store back to the file it was loaded from.
    pub fn write(&self) -> Result<()> {
        let path = self.file_path.as_ref().ok_or(Error::NoBackingFile)?;
        self.write_to(path)
    }

    /// Serialize the store to `path`, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let rendered = toml::to_string_pretty(&self.values)?;
        fs::write(path, rendered)?;
        Ok(())
    }

    fn env_override(&self, key: &str) -> Option<String> {
        let prefix = self.env_prefix.as_ref()?;
        env::var(env_var_name(prefix, key))
            .ok()
            .filter(|v| !v.is_empty())
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut current: Option<&Value> = None;
        for part in key.split('.') {
            current = match current {
                None => self.values.get(part),
                Some(Value::Table(table)) => table.get(part),
                Some(_) => return None,
            };
            current?;
        }
        current
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1")
}
