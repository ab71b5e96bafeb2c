// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::domains::DomainCategory;
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub curation: CurationConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Explicit key. Prefer `api_key_env` so keys stay out of config files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4".into(),
            max_tokens: 4096,
            temperature: 0.7,
            api_key: None,
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_api_key_env() -> String {
    "LEARNPATH_API_KEY".into()
}

impl AiConfig {
    /// The explicit key if set, else the environment variable. Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationConfig {
    pub min_quality_score: f64,
    pub max_results: usize,
    #[serde(default)]
    pub priority_categories: Vec<DomainCategory>,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            min_quality_score: 60.0,
            max_results: 10,
            priority_categories: vec![
                DomainCategory::Documentation,
                DomainCategory::Tutorial,
                DomainCategory::Academic,
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Minimum minutes a completion needs to count as a streak day.
    pub streak_min_minutes: u32,
    pub velocity_period_days: u32,
    /// Change below this percentage is reported as a stable trend.
    pub trend_threshold_percent: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            streak_min_minutes: 0,
            velocity_period_days: 7,
            trend_threshold_percent: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
