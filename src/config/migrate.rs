//! Configuration file upgrades: detect fields missing from an older file
//! and write them back with their default values.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Every field of the current configuration, with its default value.
fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

fn read_mapping(content: &str) -> AppResult<Mapping> {
    match serde_yaml::from_str::<Value>(content)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config("configuration file is not a YAML mapping".into())),
    }
}

/// Names of the fields absent from `content`, in declaration order.
pub fn missing_fields(content: &str) -> AppResult<Vec<String>> {
    let current = read_mapping(content)?;

    Ok(default_mapping()?
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add the missing fields to `content`, keeping existing values untouched.
pub fn fill_missing(content: &str) -> AppResult<(String, Vec<String>)> {
    let mut current = read_mapping(content)?;
    let mut added = Vec::new();

    for (k, v) in default_mapping()? {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    Ok((serde_yaml::to_string(&Value::Mapping(current))?, added))
}

/// `config --check`
pub fn check_file(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let missing = missing_fields(&content)?;

    if missing.is_empty() {
        success("Configuration file is up to date.");
    } else {
        info(format!("Missing fields: {}", missing.join(", ")));
    }
    Ok(missing)
}

/// `config --migrate`
pub fn migrate_file(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let (updated, added) = fill_missing(&content)?;

    if added.is_empty() {
        info("No configuration migration needed.");
        return Ok(added);
    }

    fs::write(path, updated).map_err(|_| AppError::ConfigSave)?;
    success(format!("Configuration migrated, added: {}", added.join(", ")));
    Ok(added)
}
