//! One-shot migration of legacy YAML config files to the current TOML format.
//!
//! Early releases stored configuration as `<base>.yml`, and the old writer
//! wrapped every section in a single-element list. A direct translation of
//! that shape produces TOML array-of-table headers (`[[core]]`) where plain
//! table headers are correct, so the written output is repaired by
//! collapsing the doubled bracket delimiters. That repair is byte-level and
//! only valid because the migrated schema is flat (no nested tables); see
//! [`collapse_table_brackets`].

use std::fs;
use std::path::Path;

use toml::Value;
use toml::value::Table;

use crate::Result;

/// Rewrite `old_dir/<base>.yml` into `new_dir/<base>.toml` and delete the
/// legacy file.
///
/// A no-op when the legacy file does not exist, or when the current-format
/// file already exists (the current format always wins and is never
/// overwritten). Safe to call repeatedly and for multiple independent
/// directory pairs.
///
/// Failure to delete the legacy file after a successful conversion is only
/// logged; the new file has already been produced at that point.
pub fn migrate_legacy_config(old_dir: &Path, new_dir: &Path, base_name: &str) -> Result<()> {
    let legacy = old_dir.join(format!("{base_name}.yml"));
    let current = new_dir.join(format!("{base_name}.toml"));

    if !legacy.is_file() {
        return Ok(());
    }
    if current.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(&legacy)?;
    let parsed: serde_yaml::Value = serde_yaml::from_str(&raw)?;
    let translated = yaml_to_toml(parsed);

    if let Some(parent) = current.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let rendered = toml::to_string_pretty(&translated)?;
    fs::write(&current, collapse_table_brackets(&rendered))?;

    if let Err(err) = fs::remove_file(&legacy) {
        tracing::warn!(
            path = %legacy.display(),
            error = %err,
            "could not delete legacy config file"
        );
    }

    tracing::info!(
        from = %legacy.display(),
        to = %current.display(),
        "converted legacy config"
    );
    Ok(())
}

/// Collapse doubled table-header delimiters (`[[` -> `[`, `]]` -> `]`).
///
/// The legacy writer represented each section as a one-element list, which
/// the translation preserves and the TOML serializer renders as an
/// array-of-tables header. FRAGILE: this byte-level collapse is only
/// correct for a flat schema with no nested tables and no legitimate
/// array-of-tables entries. Do not reuse it for anything else.
fn collapse_table_brackets(rendered: &str) -> String {
    rendered.replace("[[", "[").replace("]]", "]")
}

fn yaml_to_toml(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::String(String::new()),
        serde_yaml::Value::Bool(b) => Value::Boolean(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.into_iter().map(yaml_to_toml).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let mut table = Table::new();
            for (key, val) in map {
                if let serde_yaml::Value::String(key) = key {
                    table.insert(key, yaml_to_toml(val));
                }
            }
            Value::Table(table)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_toml(tagged.value),
    }
}
