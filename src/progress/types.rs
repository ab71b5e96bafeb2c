// src/progress/types.rs — Learner progress records and derived metrics

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roadmap::types::QueryType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneType {
    Video,
    Article,
    Exercise,
    Quiz,
}

impl MilestoneType {
    pub const ALL: [MilestoneType; 4] = [Self::Video, Self::Article, Self::Exercise, Self::Quiz];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Article => "article",
            Self::Exercise => "exercise",
            Self::Quiz => "quiz",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for MilestoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One learning unit. Times are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub milestone_type: MilestoneType,
    #[serde(default)]
    pub estimated_time: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time_spent: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Milestone {
    /// Completion time of a completed milestone.
    pub fn completion_time(&self) -> Option<DateTime<Utc>> {
        self.completed.then_some(self.completed_at).flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub id: String,
    pub topic: String,
    pub milestones: Vec<Milestone>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<QueryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_estimated_time: Option<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    MilestonesCompleted,
    StreakDays,
    LongestStreak,
    TimeSpent,
    QuizzesCompleted,
    PerfectScores,
    CompletionPercentage,
}

impl CriterionKind {
    pub const ALL: [CriterionKind; 7] = [
        Self::MilestonesCompleted,
        Self::StreakDays,
        Self::LongestStreak,
        Self::TimeSpent,
        Self::QuizzesCompleted,
        Self::PerfectScores,
        Self::CompletionPercentage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MilestonesCompleted => "milestones_completed",
            Self::StreakDays => "streak_days",
            Self::LongestStreak => "longest_streak",
            Self::TimeSpent => "time_spent",
            Self::QuizzesCompleted => "quizzes_completed",
            Self::PerfectScores => "perfect_scores",
            Self::CompletionPercentage => "completion_percentage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementCriterion {
    #[serde(rename = "type")]
    pub kind: CriterionKind,
    pub required: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub criteria: Vec<AchievementCriterion>,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Everything stored for one learner. Paths are keyed by path id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    #[serde(default)]
    pub paths: BTreeMap<String, LearningPath>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub ai_credit_protection: bool,
}

impl ProgressState {
    /// Every milestone across all paths, in path-id then learning order.
    pub fn all_milestones(&self) -> Vec<Milestone> {
        self.paths
            .values()
            .flat_map(|p| p.milestones.iter().cloned())
            .collect()
    }
}

/// Derived view of a milestone history. Never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressMetrics {
    pub total_milestones: usize,
    pub completed_milestones: usize,
    pub completion_percentage: u32,
    pub total_time_spent: u32,
    pub average_time_per_milestone: f64,
    pub learning_velocity: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub estimated_time_to_complete: u32,
    pub time_spent_today: u32,
    pub time_spent_this_week: u32,
    pub time_spent_this_month: u32,
}
