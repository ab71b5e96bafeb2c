// src/cli/progress.rs — Show, update and check learning progress

use anyhow::Context;
use chrono::{DateTime, Utc};

use super::ProgressAction;
use crate::infra::config::{AnalyticsConfig, Config};
use crate::infra::paths;
use crate::progress::achievements::{check_achievement_eligibility, unlock_eligible};
use crate::progress::analytics::{
    calculate_state_metrics, format_time_spent, progress_trend, time_by_type, TrendPeriod,
};
use crate::progress::store::{
    load_progress_state, save_progress_state, JsonFileStore, ProgressStore, DEFAULT_PROGRESS_KEY,
};
use crate::progress::types::ProgressState;
use crate::progress::validation::validate_progress_state;

pub fn run_progress(action: Option<ProgressAction>, config: &Config) -> anyhow::Result<()> {
    let store = JsonFileStore::new(paths::data_dir());
    match action.unwrap_or(ProgressAction::Show {
        period: "week".into(),
    }) {
        ProgressAction::Show { period } => show(&store, &period, &config.analytics),
        ProgressAction::Complete {
            path_id,
            milestone_id,
            minutes,
            score,
        } => {
            let now = Utc::now();
            let mut state = load_progress_state(&store, DEFAULT_PROGRESS_KEY, now);
            complete_milestone(&mut state, &path_id, &milestone_id, minutes, score, now)?;
            let newly = unlock_new_achievements(&mut state, &config.analytics, now);
            save_progress_state(&store, DEFAULT_PROGRESS_KEY, &state)?;

            println!("Completed {milestone_id} in {path_id}.");
            for title in newly {
                println!("Achievement unlocked: {title}");
            }
            Ok(())
        }
        ProgressAction::Validate => validate(&store),
    }
}

/// Mark one milestone completed at `now`, adding `minutes` to its time.
pub fn complete_milestone(
    state: &mut ProgressState,
    path_id: &str,
    milestone_id: &str,
    minutes: u32,
    score: Option<f64>,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let path = state
        .paths
        .get_mut(path_id)
        .with_context(|| format!("No learning path '{path_id}'"))?;
    let milestone = path
        .milestones
        .iter_mut()
        .find(|m| m.id == milestone_id)
        .with_context(|| format!("No milestone '{milestone_id}' in path '{path_id}'"))?;

    milestone.completed = true;
    milestone.completed_at = Some(now);
    milestone.time_spent = milestone.time_spent.saturating_add(minutes);
    if let Some(score) = score {
        milestone.score = Some(score.clamp(0.0, 100.0));
    }
    path.updated_at = now;
    Ok(())
}

/// Unlock whatever became eligible and return the titles.
fn unlock_new_achievements(
    state: &mut ProgressState,
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
) -> Vec<String> {
    let metrics = calculate_state_metrics(state, config, now);
    let eligibility = check_achievement_eligibility(&state.achievements, &state.all_milestones(), &metrics);
    let updated = unlock_eligible(&state.achievements, &eligibility, now);

    let newly: Vec<String> = updated
        .iter()
        .zip(&state.achievements)
        .filter(|(after, before)| after.unlocked && !before.unlocked)
        .map(|(after, _)| after.title.clone())
        .collect();
    state.achievements = updated;
    newly
}

fn show(store: &dyn ProgressStore, period: &str, config: &AnalyticsConfig) -> anyhow::Result<()> {
    let period = TrendPeriod::parse(period)
        .with_context(|| format!("Unknown period '{period}'. Options: day, week, month"))?;
    let now = Utc::now();
    let state = load_progress_state(store, DEFAULT_PROGRESS_KEY, now);

    if state.paths.is_empty() {
        println!("No learning paths yet. Track one with `learnpath roadmap <topic> --response <file> --track`.");
        return Ok(());
    }

    let milestones = state.all_milestones();
    let metrics = calculate_state_metrics(&state, config, now);
    let trend = progress_trend(&milestones, period, config.trend_threshold_percent, now);

    println!("Progress");
    println!(
        "  Completed:   {}/{} milestones ({}%)",
        metrics.completed_milestones, metrics.total_milestones, metrics.completion_percentage
    );
    println!("  Time spent:  {}", format_time_spent(metrics.total_time_spent));
    println!("  Today:       {}", format_time_spent(metrics.time_spent_today));
    println!("  This week:   {}", format_time_spent(metrics.time_spent_this_week));
    println!("  Remaining:   {}", format_time_spent(metrics.estimated_time_to_complete));
    println!(
        "  Streak:      {} days (longest {})",
        metrics.current_streak, metrics.longest_streak
    );
    println!(
        "  Velocity:    {:.2} milestones/day over {} days",
        metrics.learning_velocity, config.velocity_period_days
    );
    println!(
        "  Trend:       {:?} {:.0}% ({} vs {} per {:?})",
        trend.direction, trend.change_percentage, trend.current, trend.previous, period
    );

    println!("\nBy type");
    for (kind, minutes) in time_by_type(&milestones) {
        println!("  {:<9} {}", kind.as_str(), format_time_spent(minutes));
    }

    println!("\nPaths");
    for path in state.paths.values() {
        let done = path.milestones.iter().filter(|m| m.completed).count();
        println!("  {}  {} ({}/{})", path.id, path.topic, done, path.milestones.len());
    }

    let eligibility = check_achievement_eligibility(&state.achievements, &milestones, &metrics);
    println!("\nAchievements");
    for a in state.achievements.iter().filter(|a| a.unlocked) {
        println!("  {} {} (unlocked)", a.icon, a.title);
    }
    for e in &eligibility {
        if let Some(a) = state.achievements.iter().find(|a| a.id == e.achievement_id) {
            println!("  {} {} {}%", a.icon, a.title, e.progress);
        }
    }
    Ok(())
}

fn validate(store: &dyn ProgressStore) -> anyhow::Result<()> {
    let Some(raw) = store.get(DEFAULT_PROGRESS_KEY)? else {
        println!("No stored progress.");
        return Ok(());
    };
    let value: serde_json::Value =
        serde_json::from_str(&raw).context("Stored progress is not valid JSON")?;
    let report = validate_progress_state(&value);

    for e in &report.errors {
        println!("error: {e}");
    }
    for w in &report.warnings {
        println!("warning: {w}");
    }
    if report.is_valid {
        println!("Stored progress is valid ({} warnings).", report.warnings.len());
        Ok(())
    } else {
        anyhow::bail!("{} problems found", report.errors.len())
    }
}
