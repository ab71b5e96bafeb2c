// src/progress/export.rs — Export progress as JSON, CSV, YAML or a plain-text report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analytics::{calculate_state_metrics, format_time_spent};
use super::types::{Achievement, LearningPath, ProgressMetrics, ProgressState};
use crate::infra::config::AnalyticsConfig;
use crate::infra::errors::LearnpathError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    /// Plain-text report laid out for printing.
    Pdf,
    Yaml,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "pdf" | "txt" | "text" => Some(Self::Pdf),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_analytics: bool,
    pub include_achievements: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            include_analytics: true,
            include_achievements: true,
        }
    }
}

/// The canonical aggregate every format is rendered from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub exported_at: DateTime<Utc>,
    pub version: String,
    pub paths: Vec<LearningPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<Achievement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<ProgressMetrics>,
}

pub fn build_export_data(
    state: &ProgressState,
    options: &ExportOptions,
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
) -> ExportData {
    ExportData {
        exported_at: now,
        version: env!("CARGO_PKG_VERSION").to_string(),
        paths: state.paths.values().cloned().collect(),
        achievements: options
            .include_achievements
            .then(|| state.achievements.clone()),
        analytics: options
            .include_analytics
            .then(|| calculate_state_metrics(state, config, now)),
    }
}

pub fn export_progress_data(
    state: &ProgressState,
    options: &ExportOptions,
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
) -> Result<String, LearnpathError> {
    let data = build_export_data(state, options, config, now);
    let output = match options.format {
        ExportFormat::Json => serde_json::to_string_pretty(&data)?,
        ExportFormat::Yaml => serde_yml::to_string(&data).map_err(anyhow::Error::from)?,
        ExportFormat::Csv => render_csv(&data),
        ExportFormat::Pdf => render_report(&data),
    };
    tracing::debug!(format = ?options.format, bytes = output.len(), "Exported progress");
    Ok(output)
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row(fields: &[String]) -> String {
    let mut row = fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

fn render_csv(data: &ExportData) -> String {
    let mut out = String::new();
    out.push_str(
        "Path ID,Topic,Milestone ID,Title,Type,Completed,Completed At,Time Spent,Score,Estimated Time\n",
    );
    for path in &data.paths {
        for m in &path.milestones {
            out.push_str(&csv_row(&[
                path.id.clone(),
                path.topic.clone(),
                m.id.clone(),
                m.title.clone(),
                m.milestone_type.to_string(),
                m.completed.to_string(),
                m.completed_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
                m.time_spent.to_string(),
                m.score.map(|s| s.to_string()).unwrap_or_default(),
                m.estimated_time.to_string(),
            ]));
        }
    }

    if let Some(metrics) = &data.analytics {
        out.push_str("\nMetric,Value\n");
        for (name, value) in metric_rows(metrics) {
            out.push_str(&csv_row(&[name.to_string(), value]));
        }
    }

    if let Some(achievements) = &data.achievements {
        out.push_str("\nAchievement,Unlocked,Unlocked At\n");
        for a in achievements {
            out.push_str(&csv_row(&[
                a.title.clone(),
                a.unlocked.to_string(),
                a.unlocked_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            ]));
        }
    }
    out
}

fn metric_rows(m: &ProgressMetrics) -> Vec<(&'static str, String)> {
    vec![
        ("Total Milestones", m.total_milestones.to_string()),
        ("Completed Milestones", m.completed_milestones.to_string()),
        ("Completion Percentage", m.completion_percentage.to_string()),
        ("Total Time Spent", m.total_time_spent.to_string()),
        ("Average Time Per Milestone", format!("{:.1}", m.average_time_per_milestone)),
        ("Learning Velocity", format!("{:.2}", m.learning_velocity)),
        ("Current Streak", m.current_streak.to_string()),
        ("Longest Streak", m.longest_streak.to_string()),
        ("Estimated Time To Complete", m.estimated_time_to_complete.to_string()),
    ]
}

fn render_report(data: &ExportData) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    out.push_str("LEARNING PROGRESS REPORT\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "Generated: {}\n\n",
        data.exported_at.format("%Y-%m-%d %H:%M UTC")
    ));

    if let Some(m) = &data.analytics {
        out.push_str("SUMMARY\n");
        out.push_str(&format!(
            "  Completed: {} of {} milestones ({}%)\n",
            m.completed_milestones, m.total_milestones, m.completion_percentage
        ));
        out.push_str(&format!(
            "  Time spent: {}\n",
            format_time_spent(m.total_time_spent)
        ));
        out.push_str(&format!(
            "  Streak: {} days (longest {})\n",
            m.current_streak, m.longest_streak
        ));
        out.push_str(&format!(
            "  Remaining: {}\n\n",
            format_time_spent(m.estimated_time_to_complete)
        ));
    }

    out.push_str("LEARNING PATHS\n");
    if data.paths.is_empty() {
        out.push_str("  (none)\n");
    }
    for path in &data.paths {
        let done = path.milestones.iter().filter(|m| m.completed).count();
        out.push_str(&format!(
            "\n  {} ({}/{} completed)\n",
            path.topic,
            done,
            path.milestones.len()
        ));
        for m in &path.milestones {
            let mark = if m.completed { "x" } else { " " };
            out.push_str(&format!(
                "    [{}] {} ({}, {})\n",
                mark,
                m.title,
                m.milestone_type,
                format_time_spent(m.time_spent)
            ));
        }
    }

    if let Some(achievements) = &data.achievements {
        out.push_str("\nACHIEVEMENTS\n");
        let unlocked: Vec<&Achievement> = achievements.iter().filter(|a| a.unlocked).collect();
        if unlocked.is_empty() {
            out.push_str("  (none unlocked yet)\n");
        }
        for a in unlocked {
            out.push_str(&format!("  {} {} - {}\n", a.icon, a.title, a.description));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::types::{Milestone, MilestoneType};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn state() -> ProgressState {
        let mut state = ProgressState::default();
        state.paths.insert(
            "p1".into(),
            LearningPath {
                id: "p1".into(),
                topic: "Rust, the language".into(),
                milestones: vec![
                    Milestone {
                        id: "m1".into(),
                        title: "Say \"hello\"".into(),
                        description: String::new(),
                        milestone_type: MilestoneType::Exercise,
                        estimated_time: 30,
                        completed: true,
                        completed_at: Some(now()),
                        time_spent: 90,
                        score: Some(100.0),
                        notes: None,
                    },
                    Milestone {
                        id: "m2".into(),
                        title: "Traits".into(),
                        description: String::new(),
                        milestone_type: MilestoneType::Article,
                        estimated_time: 45,
                        completed: false,
                        completed_at: None,
                        time_spent: 0,
                        score: None,
                        notes: None,
                    },
                ],
                created_at: now(),
                updated_at: now(),
                query_type: None,
                overview: None,
                total_estimated_time: None,
                prerequisites: vec![],
                tips: vec![],
            },
        );
        state.achievements = crate::domain::achievements::default_achievements();
        state
    }

    fn export(format: ExportFormat, analytics: bool, achievements: bool) -> String {
        let options = ExportOptions {
            format,
            include_analytics: analytics,
            include_achievements: achievements,
        };
        export_progress_data(&state(), &options, &AnalyticsConfig::default(), now()).unwrap()
    }

    #[test]
    fn test_json_flags_prune() {
        let full: serde_json::Value = serde_json::from_str(&export(ExportFormat::Json, true, true)).unwrap();
        assert_eq!(full["analytics"]["completionPercentage"], 50);
        assert!(full["achievements"].is_array());

        let bare: serde_json::Value = serde_json::from_str(&export(ExportFormat::Json, false, false)).unwrap();
        assert!(bare.get("analytics").is_none());
        assert!(bare.get("achievements").is_none());
        assert_eq!(bare["paths"][0]["milestones"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_csv_escaping() {
        let csv = export(ExportFormat::Csv, false, false);
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("Path ID,Topic"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("p1,\"Rust, the language\",m1,\"Say \"\"hello\"\"\",exercise,true,"));
        assert!(!csv.contains("Metric,Value"));
    }

    #[test]
    fn test_csv_sections() {
        let csv = export(ExportFormat::Csv, true, true);
        assert!(csv.contains("\nMetric,Value\n"));
        assert!(csv.contains("Completion Percentage,50\n"));
        assert!(csv.contains("\nAchievement,Unlocked,Unlocked At\n"));
    }

    #[test]
    fn test_report() {
        let report = export(ExportFormat::Pdf, true, true);
        assert!(report.starts_with("LEARNING PROGRESS REPORT\n"));
        assert!(report.contains("Completed: 1 of 2 milestones (50%)"));
        assert!(report.contains("[x] Say \"hello\" (exercise, 1 hour 30 minutes)"));
        assert!(report.contains("[ ] Traits (article, 0 minutes)"));
        assert!(report.contains("(none unlocked yet)"));
    }

    #[test]
    fn test_yaml() {
        let yaml = export(ExportFormat::Yaml, false, false);
        assert!(yaml.contains("Rust, the language"));
        assert!(yaml.contains("milestones:"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(ExportFormat::parse("YML"), Some(ExportFormat::Yaml));
        assert_eq!(ExportFormat::parse("pdf"), Some(ExportFormat::Pdf));
        assert_eq!(ExportFormat::parse("xml"), None);
    }
}
