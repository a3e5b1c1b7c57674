//! Layered YAML configuration.
//!
//! Three key-value documents are merged in order: the system layer, the user
//! layer, then the job-specific file supplied by the caller. Later layers win
//! on key collision. The loader applies **no defaults**: a key absent from
//! every layer is absent from the merged result, and typed accessors report
//! that as a config error naming the key.
//!
//! The merged [`Config`] is immutable after construction and is the sole
//! configuration surface for every downstream pipeline stage.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::info;

use crate::error::AppError;

/// Fixed system-wide layer, loaded first.
pub const SYSTEM_CONFIG_PATH: &str = "configs/system_config.yml";
/// Fixed per-user layer, loaded second.
pub const USER_CONFIG_PATH: &str = "configs/user_config.yml";

/// Merged, read-only configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    values: BTreeMap<String, Value>,
}

impl Config {
    /// Load the two fixed layers plus the given job config, in that order.
    pub fn load(job_config: &Path) -> Result<Self, AppError> {
        let paths = [
            Path::new(SYSTEM_CONFIG_PATH),
            Path::new(USER_CONFIG_PATH),
            job_config,
        ];
        Self::load_layers(&paths)
    }

    /// Merge an explicit ordered sequence of YAML mapping documents.
    pub fn load_layers(paths: &[&Path]) -> Result<Self, AppError> {
        let mut values = BTreeMap::new();

        for path in paths {
            info!(path = %path.display(), "loading config layer");
            let text = fs::read_to_string(path).map_err(|e| {
                AppError::config(format!("Failed to read config '{}': {e}", path.display()))
            })?;
            let doc: Value = serde_yaml::from_str(&text).map_err(|e| {
                AppError::config(format!("Failed to parse config '{}': {e}", path.display()))
            })?;
            let mapping = doc.as_mapping().ok_or_else(|| {
                AppError::config(format!(
                    "Config '{}' is not a key-value mapping",
                    path.display()
                ))
            })?;

            for (key, value) in mapping {
                let key = key.as_str().ok_or_else(|| {
                    AppError::config(format!(
                        "Config '{}' has a non-string key: {key:?}",
                        path.display()
                    ))
                })?;
                values.insert(key.to_string(), value.clone());
            }
        }

        Ok(Self { values })
    }

    /// Build directly from merged values (used by tests and embedding callers).
    pub fn from_values(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Required string value.
    pub fn get_str(&self, key: &str) -> Result<&str, AppError> {
        self.require(key)?
            .as_str()
            .ok_or_else(|| AppError::config(format!("Config key '{key}' is not a string")))
    }

    /// Required numeric value (YAML integer or float).
    pub fn get_f64(&self, key: &str) -> Result<f64, AppError> {
        self.require(key)?
            .as_f64()
            .ok_or_else(|| AppError::config(format!("Config key '{key}' is not a number")))
    }

    /// Optional string value; `None` when the key is absent from every layer.
    pub fn get_str_opt(&self, key: &str) -> Result<Option<&str>, AppError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| AppError::config(format!("Config key '{key}' is not a string"))),
        }
    }

    fn require(&self, key: &str) -> Result<&Value, AppError> {
        self.values
            .get(key)
            .ok_or_else(|| AppError::config(format!("Missing required config key '{key}'")))
    }
}
