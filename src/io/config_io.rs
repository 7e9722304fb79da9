use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not edit config: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("invalid config key '{0}'")]
    InvalidKey(String),
    #[error("setting '{key}' would make the config invalid: {source}")]
    InvalidValue {
        key: String,
        source: toml::de::Error,
    },
}

/// Default config location, respecting XDG_CONFIG_HOME
pub fn default_config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("taskpost").join("config.toml")
}

/// Default state directory, respecting XDG_STATE_HOME
pub fn default_state_dir() -> PathBuf {
    let state_dir = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("state"));
    state_dir.join("taskpost")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read the config. A missing file yields defaults; a malformed one is an error.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve the state directory: explicit flag, then config, then XDG default
pub fn resolve_state_dir(flag: Option<&str>, config: &AppConfig) -> PathBuf {
    flag.map(PathBuf::from)
        .or_else(|| config.storage.state_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(default_state_dir)
}

/// Set a dotted key (e.g. `time.date_format`) in a config document,
/// preserving the rest of the file's formatting.
///
/// The value is taken as a TOML literal when it parses as one
/// (`[15, 30]`, `true`, `42`), and as a plain string otherwise.
pub fn set_value(doc: &mut toml_edit::DocumentMut, key: &str, raw: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::InvalidKey(key.to_string()));
    }
    let mut value: toml_edit::Value = raw
        .parse()
        .unwrap_or_else(|_| toml_edit::Value::from(raw));

    let (last, parents) = parts
        .split_last()
        .ok_or_else(|| ConfigError::InvalidKey(key.to_string()))?;

    let mut table = doc.as_table_mut();
    for part in parents {
        if !table.contains_key(part) {
            table.insert(part, toml_edit::Item::Table(toml_edit::Table::new()));
        }
        table = table
            .get_mut(part)
            .and_then(|item| item.as_table_mut())
            .ok_or_else(|| ConfigError::InvalidKey(key.to_string()))?;
    }
    // keep the old value's spacing and trailing comment
    if let Some(old) = table.get(last).and_then(|item| item.as_value()) {
        *value.decor_mut() = old.decor().clone();
    }
    // index assignment keeps the existing key and its leading comment
    table[*last] = toml_edit::value(value);
    Ok(())
}

/// Apply `key = value` to the config file on disk, validating the result first
pub fn update_config_file(path: &Path, key: &str, raw: &str) -> Result<AppConfig, ConfigError> {
    let text = if path.exists() {
        fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        String::new()
    };
    let mut doc: toml_edit::DocumentMut = text.parse()?;
    set_value(&mut doc, key, raw)?;

    let updated = doc.to_string();
    let config: AppConfig = toml::from_str(&updated).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        source: e,
    })?;

    let write_err = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, updated).map_err(write_err)?;
    Ok(config)
}
