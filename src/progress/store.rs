// src/progress/store.rs — Injected key-value storage for progress state

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::types::ProgressState;
use super::validation::{sanitize_progress_state, validate_progress_state};
use crate::infra::errors::LearnpathError;

pub const DEFAULT_PROGRESS_KEY: &str = "progress";

/// Raw string storage. Implementations decide where bytes live.
pub trait ProgressStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, LearnpathError>;
    fn put(&self, key: &str, value: &str) -> Result<(), LearnpathError>;
}

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, LearnpathError> {
        let values = self
            .values
            .lock()
            .map_err(|_| LearnpathError::Other(anyhow::anyhow!("memory store lock poisoned")))?;
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), LearnpathError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| LearnpathError::Other(anyhow::anyhow!("memory store lock poisoned")))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl ProgressStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, LearnpathError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), LearnpathError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Read and sanitise the stored state. Never fails: unreadable or malformed
/// data yields a fresh state.
pub fn load_progress_state(store: &dyn ProgressStore, key: &str, now: DateTime<Utc>) -> ProgressState {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return sanitize_progress_state(&Value::Null, now),
        Err(e) => {
            tracing::warn!(key, error = %e, "Could not read progress, starting fresh");
            return sanitize_progress_state(&Value::Null, now);
        }
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored progress is not valid JSON, starting fresh");
            Value::Null
        }
    };

    let report = validate_progress_state(&value);
    if !report.is_valid {
        tracing::warn!(key, errors = ?report.errors, "Stored progress repaired on load");
    }
    sanitize_progress_state(&value, now)
}

pub fn save_progress_state(
    store: &dyn ProgressStore,
    key: &str,
    state: &ProgressState,
) -> Result<(), LearnpathError> {
    let json = serde_json::to_string_pretty(state)?;
    store.put(key, &json)
}
