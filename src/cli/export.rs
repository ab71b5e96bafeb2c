// src/cli/export.rs — Data export command
//
// Exports tracked progress to JSON/CSV/YAML or a plain-text report.

use anyhow::Context;
use chrono::Utc;

use crate::infra::config::Config;
use crate::infra::paths;
use crate::progress::export::{export_progress_data, ExportFormat, ExportOptions};
use crate::progress::store::{load_progress_state, JsonFileStore, DEFAULT_PROGRESS_KEY};

pub fn run_export(
    format: &str,
    output: Option<&str>,
    include_analytics: bool,
    include_achievements: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let format = ExportFormat::parse(format).with_context(|| {
        format!("Unsupported format '{format}'. Options: json, csv, pdf, yaml")
    })?;
    let options = ExportOptions {
        format,
        include_analytics,
        include_achievements,
    };

    let store = JsonFileStore::new(paths::data_dir());
    let now = Utc::now();
    let state = load_progress_state(&store, DEFAULT_PROGRESS_KEY, now);
    let output_str = export_progress_data(&state, &options, &config.analytics, now)?;

    if let Some(path) = output {
        std::fs::write(path, &output_str).with_context(|| format!("Failed to write {path}"))?;
        println!("Exported {} learning path(s) to {}", state.paths.len(), path);
    } else {
        println!("{}", output_str);
    }

    Ok(())
}
