// src/domain/achievements.rs — Built-in achievement catalog

use crate::progress::types::{Achievement, AchievementCriterion, CriterionKind};

fn achievement(
    id: &str,
    title: &str,
    description: &str,
    icon: &str,
    criteria: &[(CriterionKind, f64, &str)],
) -> Achievement {
    Achievement {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        icon: icon.into(),
        criteria: criteria
            .iter()
            .map(|(kind, required, description)| AchievementCriterion {
                kind: *kind,
                required: *required,
                description: (*description).into(),
            })
            .collect(),
        unlocked: false,
        unlocked_at: None,
    }
}

/// The achievements every new learner starts with, all locked.
pub fn default_achievements() -> Vec<Achievement> {
    use CriterionKind::*;
    vec![
        achievement(
            "first-steps",
            "First Steps",
            "Complete your first milestone",
            "🎯",
            &[(MilestonesCompleted, 1.0, "Complete 1 milestone")],
        ),
        achievement(
            "getting-started",
            "Getting Started",
            "Complete 5 milestones",
            "📚",
            &[(MilestonesCompleted, 5.0, "Complete 5 milestones")],
        ),
        achievement(
            "dedicated-learner",
            "Dedicated Learner",
            "Complete 25 milestones",
            "🏆",
            &[(MilestonesCompleted, 25.0, "Complete 25 milestones")],
        ),
        achievement(
            "week-warrior",
            "Week Warrior",
            "Learn 7 days in a row",
            "🔥",
            &[(StreakDays, 7.0, "Maintain a 7-day streak")],
        ),
        achievement(
            "consistency-champion",
            "Consistency Champion",
            "Reach a 30-day streak at any point",
            "👑",
            &[(LongestStreak, 30.0, "Reach a 30-day streak")],
        ),
        achievement(
            "time-investor",
            "Time Investor",
            "Spend 10 hours learning",
            "⏰",
            &[(TimeSpent, 600.0, "Spend 600 minutes learning")],
        ),
        achievement(
            "quiz-master",
            "Quiz Master",
            "Complete 10 quizzes",
            "🧠",
            &[(QuizzesCompleted, 10.0, "Complete 10 quiz milestones")],
        ),
        achievement(
            "perfectionist",
            "Perfectionist",
            "Score 100 on 5 milestones",
            "💯",
            &[(PerfectScores, 5.0, "Score 100 five times")],
        ),
        achievement(
            "halfway-there",
            "Halfway There",
            "Finish half of your roadmap with at least 5 milestones done",
            "🚀",
            &[
                (CompletionPercentage, 50.0, "Reach 50% completion"),
                (MilestonesCompleted, 5.0, "Complete 5 milestones"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_unique() {
        let all = default_achievements();
        let ids: HashSet<_> = all.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn test_catalog_all_locked_with_criteria() {
        for a in default_achievements() {
            assert!(!a.unlocked);
            assert!(a.unlocked_at.is_none());
            assert!(!a.criteria.is_empty(), "{} has no criteria", a.id);
            assert!(a.criteria.iter().all(|c| c.required > 0.0));
        }
    }
}
