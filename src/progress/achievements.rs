// src/progress/achievements.rs — Achievement eligibility and unlocking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Achievement, CriterionKind, Milestone, MilestoneType, ProgressMetrics};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionProgress {
    #[serde(rename = "type")]
    pub kind: CriterionKind,
    pub required: f64,
    pub current: f64,
    pub met: bool,
    pub progress: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementEligibility {
    pub achievement_id: String,
    pub is_eligible: bool,
    /// 0–100, the least-advanced criterion.
    pub progress: u32,
    pub criteria: Vec<CriterionProgress>,
}

/// The learner's current value for a criterion.
pub fn criterion_value(kind: CriterionKind, milestones: &[Milestone], metrics: &ProgressMetrics) -> f64 {
    match kind {
        CriterionKind::MilestonesCompleted => metrics.completed_milestones as f64,
        CriterionKind::StreakDays => metrics.current_streak as f64,
        CriterionKind::LongestStreak => metrics.longest_streak as f64,
        CriterionKind::TimeSpent => metrics.total_time_spent as f64,
        CriterionKind::CompletionPercentage => metrics.completion_percentage as f64,
        CriterionKind::QuizzesCompleted => milestones
            .iter()
            .filter(|m| m.completed && m.milestone_type == MilestoneType::Quiz)
            .count() as f64,
        CriterionKind::PerfectScores => milestones
            .iter()
            .filter(|m| m.completed && m.score.is_some_and(|s| s >= 100.0))
            .count() as f64,
    }
}

fn ratio(current: f64, required: f64) -> u32 {
    if required <= 0.0 {
        return 100;
    }
    ((current / required) * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Evaluate every locked achievement. Unlocked ones are skipped.
///
/// An achievement is eligible when it has criteria and all of them are met.
pub fn check_achievement_eligibility(
    achievements: &[Achievement],
    milestones: &[Milestone],
    metrics: &ProgressMetrics,
) -> Vec<AchievementEligibility> {
    achievements
        .iter()
        .filter(|a| !a.unlocked)
        .map(|a| {
            let criteria: Vec<CriterionProgress> = a
                .criteria
                .iter()
                .map(|c| {
                    let current = criterion_value(c.kind, milestones, metrics);
                    CriterionProgress {
                        kind: c.kind,
                        required: c.required,
                        current,
                        met: current >= c.required,
                        progress: ratio(current, c.required),
                    }
                })
                .collect();

            AchievementEligibility {
                achievement_id: a.id.clone(),
                is_eligible: !criteria.is_empty() && criteria.iter().all(|c| c.met),
                progress: criteria.iter().map(|c| c.progress).min().unwrap_or(0),
                criteria,
            }
        })
        .collect()
}

/// A copy of `achievements` with every eligible one unlocked at `now`.
pub fn unlock_eligible(
    achievements: &[Achievement],
    eligibility: &[AchievementEligibility],
    now: DateTime<Utc>,
) -> Vec<Achievement> {
    achievements
        .iter()
        .map(|a| {
            let eligible = eligibility
                .iter()
                .any(|e| e.is_eligible && e.achievement_id == a.id);
            if eligible && !a.unlocked {
                tracing::info!(achievement = %a.id, "Achievement unlocked");
                Achievement {
                    unlocked: true,
                    unlocked_at: Some(now),
                    ..a.clone()
                }
            } else {
                a.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::achievements::default_achievements;
    use crate::progress::types::AchievementCriterion;

    fn achievement(id: &str, criteria: Vec<(CriterionKind, f64)>) -> Achievement {
        Achievement {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            icon: String::new(),
            criteria: criteria
                .into_iter()
                .map(|(kind, required)| AchievementCriterion {
                    kind,
                    required,
                    description: String::new(),
                })
                .collect(),
            unlocked: false,
            unlocked_at: None,
        }
    }

    fn metrics(completed: usize, pct: u32, streak: u32) -> ProgressMetrics {
        ProgressMetrics {
            total_milestones: 4,
            completed_milestones: completed,
            completion_percentage: pct,
            current_streak: streak,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_criterion_met() {
        let a = vec![achievement("first", vec![(CriterionKind::MilestonesCompleted, 1.0)])];
        let result = check_achievement_eligibility(&a, &[], &metrics(2, 50, 0));
        assert_eq!(result.len(), 1);
        assert!(result[0].is_eligible);
        assert_eq!(result[0].progress, 100);
    }

    #[test]
    fn test_progress_is_minimum() {
        let a = vec![achievement(
            "combo",
            vec![
                (CriterionKind::MilestonesCompleted, 4.0),
                (CriterionKind::StreakDays, 10.0),
            ],
        )];
        let result = check_achievement_eligibility(&a, &[], &metrics(3, 75, 2));
        assert!(!result[0].is_eligible);
        assert_eq!(result[0].criteria[0].progress, 75);
        assert_eq!(result[0].criteria[1].progress, 20);
        assert_eq!(result[0].progress, 20);
    }

    #[test]
    fn test_unlocked_skipped_and_empty_criteria_ineligible() {
        let mut done = achievement("done", vec![(CriterionKind::MilestonesCompleted, 1.0)]);
        done.unlocked = true;
        let empty = achievement("empty", vec![]);
        let result = check_achievement_eligibility(&[done, empty], &[], &metrics(5, 100, 5));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].achievement_id, "empty");
        assert!(!result[0].is_eligible);
        assert_eq!(result[0].progress, 0);
    }

    #[test]
    fn test_unlock_eligible() {
        let catalog = default_achievements();
        let eligibility = check_achievement_eligibility(&catalog, &[], &metrics(1, 25, 1));
        let now = Utc::now();
        let updated = unlock_eligible(&catalog, &eligibility, now);

        let first = updated.iter().find(|a| a.id == "first-steps").unwrap();
        assert!(first.unlocked);
        assert_eq!(first.unlocked_at, Some(now));
        assert_eq!(updated.iter().filter(|a| a.unlocked).count(), 1);
    }
}
