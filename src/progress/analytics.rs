// src/progress/analytics.rs — Completion, time, streak, velocity and trend metrics
//
// All functions are pure over a milestone slice and a caller-supplied `now`.
// Calendar days are UTC days.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Milestone, MilestoneType, ProgressMetrics, ProgressState};
use crate::infra::config::AnalyticsConfig;

/// Inclusive range on `completedAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }
}

pub fn completed_count(milestones: &[Milestone]) -> usize {
    milestones.iter().filter(|m| m.completed).count()
}

/// round(100 × completed / total); 0 for no milestones.
pub fn completion_percentage(milestones: &[Milestone]) -> u32 {
    if milestones.is_empty() {
        return 0;
    }
    let pct = completed_count(milestones) as f64 / milestones.len() as f64 * 100.0;
    pct.round() as u32
}

/// Sum of `timeSpent`, saturating at `u32::MAX`. With a range, only
/// milestones completed inside it count.
pub fn total_time_spent(milestones: &[Milestone], range: Option<TimeRange>) -> u32 {
    milestones
        .iter()
        .filter(|m| match range {
            None => true,
            Some(r) => m.completed_at.is_some_and(|t| r.contains(t)),
        })
        .map(|m| m.time_spent)
        .fold(0, u32::saturating_add)
}

/// Time per milestone type. Every type is present.
pub fn time_by_type(milestones: &[Milestone]) -> BTreeMap<MilestoneType, u32> {
    let mut totals: BTreeMap<MilestoneType, u32> =
        MilestoneType::ALL.iter().map(|t| (*t, 0)).collect();
    for m in milestones {
        let total = totals.entry(m.milestone_type).or_default();
        *total = total.saturating_add(m.time_spent);
    }
    totals
}

/// Mean `timeSpent` over completed milestones.
pub fn average_time_per_milestone(milestones: &[Milestone]) -> f64 {
    let completed: Vec<&Milestone> = milestones.iter().filter(|m| m.completed).collect();
    if completed.is_empty() {
        return 0.0;
    }
    completed.iter().map(|m| m.time_spent as f64).sum::<f64>() / completed.len() as f64
}

/// Distinct days with at least one completion of `min_minutes` or more.
pub fn activity_days(milestones: &[Milestone], min_minutes: u32) -> BTreeSet<NaiveDate> {
    milestones
        .iter()
        .filter(|m| m.time_spent >= min_minutes)
        .filter_map(|m| m.completion_time())
        .map(|t| t.date_naive())
        .collect()
}

/// Length of the longest run of consecutive active days.
pub fn longest_streak(milestones: &[Milestone], min_minutes: u32) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in activity_days(milestones, min_minutes) {
        run = match previous {
            Some(p) if day - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }
    longest
}

/// Run of consecutive active days ending at the most recent active day, which
/// must be `today` or the day before. Days after `today` are ignored.
pub fn current_streak(milestones: &[Milestone], today: NaiveDate, min_minutes: u32) -> u32 {
    let days = activity_days(milestones, min_minutes);
    let mut active = days.range(..=today).rev();

    let Some(&last) = active.next() else {
        return 0;
    };
    if today - last > Duration::days(1) {
        return 0;
    }

    let mut streak = 1;
    let mut expected = last - Duration::days(1);
    for &day in active {
        if day != expected {
            break;
        }
        streak += 1;
        expected = day - Duration::days(1);
    }
    streak
}

fn completions_in(milestones: &[Milestone], after: DateTime<Utc>, until: DateTime<Utc>) -> usize {
    milestones
        .iter()
        .filter_map(|m| m.completion_time())
        .filter(|t| *t > after && *t <= until)
        .count()
}

/// Completions per day over the trailing `period_days`. A window reaching past
/// the representable calendar covers every completion up to `now`.
pub fn learning_velocity(milestones: &[Milestone], period_days: u32, now: DateTime<Utc>) -> f64 {
    if period_days == 0 {
        return 0.0;
    }
    let since = Duration::try_days(period_days as i64)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    completions_in(milestones, since, now) as f64 / period_days as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    Day,
    Week,
    Month,
}

impl TrendPeriod {
    pub fn days(&self) -> i64 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressTrend {
    pub period: TrendPeriod,
    pub direction: TrendDirection,
    pub current: usize,
    pub previous: usize,
    /// Magnitude of the change, never negative.
    pub change_percentage: f64,
}

/// Compare completions in the latest period with the one before it.
///
/// A previous count of zero reports 100% growth when anything was completed
/// since. Changes below `threshold_percent` are `Stable`.
pub fn progress_trend(
    milestones: &[Milestone],
    period: TrendPeriod,
    threshold_percent: f64,
    now: DateTime<Utc>,
) -> ProgressTrend {
    let span = Duration::days(period.days());
    let current = completions_in(milestones, now - span, now);
    let previous = completions_in(milestones, now - span - span, now - span);

    let change = if previous == 0 {
        if current > 0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current as f64 - previous as f64) / previous as f64 * 100.0
    };

    let direction = if change.abs() < threshold_percent || change == 0.0 {
        TrendDirection::Stable
    } else if change > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };

    ProgressTrend {
        period,
        direction,
        current,
        previous,
        change_percentage: change.abs(),
    }
}

/// Minutes left on incomplete milestones, saturating at `u32::MAX`. Milestones
/// without an estimate are assumed to take the average time of completed ones.
pub fn estimated_time_to_complete(milestones: &[Milestone]) -> u32 {
    let average = average_time_per_milestone(milestones).round() as u32;
    milestones
        .iter()
        .filter(|m| !m.completed)
        .map(|m| {
            if m.estimated_time == 0 {
                average.saturating_sub(m.time_spent)
            } else {
                m.estimated_time.saturating_sub(m.time_spent)
            }
        })
        .fold(0, u32::saturating_add)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub fn time_spent_today(milestones: &[Milestone], now: DateTime<Utc>) -> u32 {
    let range = TimeRange {
        start: start_of_day(now.date_naive()),
        end: now,
    };
    total_time_spent(milestones, Some(range))
}

/// Weeks start on Monday.
pub fn time_spent_this_week(milestones: &[Milestone], now: DateTime<Utc>) -> u32 {
    let today = now.date_naive();
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let range = TimeRange {
        start: start_of_day(monday),
        end: now,
    };
    total_time_spent(milestones, Some(range))
}

pub fn time_spent_this_month(milestones: &[Milestone], now: DateTime<Utc>) -> u32 {
    let today = now.date_naive();
    let first = today.with_day(1).unwrap_or(today);
    let range = TimeRange {
        start: start_of_day(first),
        end: now,
    };
    total_time_spent(milestones, Some(range))
}

/// "1 hour 30 minutes", "2 hours", "0 minutes".
pub fn format_time_spent(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    let plural = |n: u32, unit: &str| {
        if n == 1 {
            format!("{n} {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };

    match (hours, mins) {
        (0, m) => plural(m, "minute"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{} {}", plural(h, "hour"), plural(m, "minute")),
    }
}

pub fn calculate_metrics(
    milestones: &[Milestone],
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
) -> ProgressMetrics {
    ProgressMetrics {
        total_milestones: milestones.len(),
        completed_milestones: completed_count(milestones),
        completion_percentage: completion_percentage(milestones),
        total_time_spent: total_time_spent(milestones, None),
        average_time_per_milestone: average_time_per_milestone(milestones),
        learning_velocity: learning_velocity(milestones, config.velocity_period_days, now),
        current_streak: current_streak(milestones, now.date_naive(), config.streak_min_minutes),
        longest_streak: longest_streak(milestones, config.streak_min_minutes),
        estimated_time_to_complete: estimated_time_to_complete(milestones),
        time_spent_today: time_spent_today(milestones, now),
        time_spent_this_week: time_spent_this_week(milestones, now),
        time_spent_this_month: time_spent_this_month(milestones, now),
    }
}

/// Metrics over every path in the state.
pub fn calculate_state_metrics(
    state: &ProgressState,
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
) -> ProgressMetrics {
    calculate_metrics(&state.all_milestones(), config, now)
}
