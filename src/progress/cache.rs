// src/progress/cache.rs — Memoized progress metrics keyed by state fingerprint

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::analytics::calculate_state_metrics;
use super::types::{ProgressMetrics, ProgressState};
use crate::infra::config::AnalyticsConfig;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Maps a state to its cache key.
pub type Fingerprint = fn(&ProgressState) -> String;

/// SHA-256 over the canonical JSON encoding. Path maps are ordered, so equal
/// states always produce equal keys.
pub fn state_fingerprint(state: &ProgressState) -> String {
    let bytes = serde_json::to_vec(state).unwrap_or_default();
    hex::encode(Sha256::digest(&bytes))
}

struct CacheEntry {
    /// Streaks and calendar windows depend on the date, so entries expire daily.
    as_of: NaiveDate,
    metrics: ProgressMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub size: usize,
    pub entries: Vec<String>,
    pub hits: u64,
    pub misses: u64,
}

/// Read-through metrics cache. Owned by the caller; there is no global instance.
pub struct ProgressCache {
    entries: HashMap<String, CacheEntry>,
    config: AnalyticsConfig,
    clock: Arc<dyn Clock>,
    fingerprint: Fingerprint,
    hits: u64,
    misses: u64,
}

impl Default for ProgressCache {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}

/// A cache with default analytics settings and the system clock.
pub fn create_cache() -> ProgressCache {
    ProgressCache::default()
}

impl ProgressCache {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            clock: Arc::new(SystemClock),
            fingerprint: state_fingerprint,
            hits: 0,
            misses: 0,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprint = fingerprint;
        self
    }

    /// Metrics for `state`, recomputed only when the state or the date changed.
    pub fn compute(&mut self, state: &ProgressState) -> ProgressMetrics {
        let key = (self.fingerprint)(state);
        let now = self.clock.now();
        let today = now.date_naive();

        if let Some(entry) = self.entries.get(&key) {
            if entry.as_of == today {
                self.hits += 1;
                tracing::trace!(%key, "Progress cache hit");
                return entry.metrics.clone();
            }
        }

        self.misses += 1;
        tracing::trace!(%key, "Progress cache miss");
        let metrics = calculate_state_metrics(state, &self.config, now);
        // entries from earlier days can never hit again
        self.entries.retain(|_, e| e.as_of >= today);
        self.entries.insert(
            key,
            CacheEntry {
                as_of: today,
                metrics: metrics.clone(),
            },
        );
        metrics
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let mut entries: Vec<String> = self.entries.keys().cloned().collect();
        entries.sort();
        CacheStats {
            size: self.entries.len(),
            entries,
            hits: self.hits,
            misses: self.misses,
        }
    }
}
