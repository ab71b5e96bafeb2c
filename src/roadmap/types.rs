// src/roadmap/types.rs — Canonical roadmap and customization records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::curation::types::SkillLevel;
use crate::progress::types::{LearningPath, Milestone, MilestoneType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryType {
    CareerFocused,
    ProjectBased,
    AcademicTheory,
    SkillEnhancement,
    HobbyLeisure,
    #[default]
    ComprehensiveLearning,
}

impl QueryType {
    pub const ALL: [QueryType; 6] = [
        Self::CareerFocused,
        Self::ProjectBased,
        Self::AcademicTheory,
        Self::SkillEnhancement,
        Self::HobbyLeisure,
        Self::ComprehensiveLearning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CareerFocused => "career-focused",
            Self::ProjectBased => "project-based",
            Self::AcademicTheory => "academic-theory",
            Self::SkillEnhancement => "skill-enhancement",
            Self::HobbyLeisure => "hobby-leisure",
            Self::ComprehensiveLearning => "comprehensive-learning",
        }
    }

    /// Exact match on the wire name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == s.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapResource {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapMilestone {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    pub resources: Vec<RoadmapResource>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A validated AI-generated roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapData {
    pub query_type: QueryType,
    pub overview: String,
    pub total_estimated_time: String,
    pub prerequisites: Vec<String>,
    pub tips: Vec<String>,
    pub milestones: Vec<RoadmapMilestone>,
}

impl RoadmapData {
    /// Turn the roadmap into a trackable learning path with nothing completed.
    pub fn into_learning_path(self, id: String, topic: &str, now: DateTime<Utc>) -> LearningPath {
        let milestones = self
            .milestones
            .into_iter()
            .map(|m| Milestone {
                milestone_type: milestone_type_for(&m.resources),
                estimated_time: parse_duration_minutes(&m.estimated_time).unwrap_or(0),
                id: m.id,
                title: m.title,
                description: m.description,
                completed: false,
                completed_at: None,
                time_spent: 0,
                score: None,
                notes: None,
            })
            .collect();

        LearningPath {
            id,
            topic: topic.to_string(),
            milestones,
            created_at: now,
            updated_at: now,
            query_type: Some(self.query_type),
            overview: Some(self.overview),
            total_estimated_time: Some(self.total_estimated_time),
            prerequisites: self.prerequisites,
            tips: self.tips,
        }
    }
}

fn milestone_type_for(resources: &[RoadmapResource]) -> MilestoneType {
    resources
        .iter()
        .find_map(|r| MilestoneType::parse(&r.kind))
        .unwrap_or(MilestoneType::Article)
}

/// Minutes in the first quantity of a free-text duration ("1-2 hours" → 60).
/// Days and weeks are not converted.
pub fn parse_duration_minutes(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();
    let digits: String = lower
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let amount: f64 = digits.parse().ok()?;
    let unit = lower.trim_start_matches(|c: char| !c.is_alphabetic());

    let minutes = if unit.starts_with("min") {
        amount
    } else if unit.starts_with("hour") || unit.starts_with("hr") || unit.starts_with('h') {
        amount * 60.0
    } else {
        return None;
    };
    Some(minutes.round() as u32)
}

/// Personalisation suggested by the AI for a learner's stated preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    pub query_type: QueryType,
    pub learning_style: String,
    pub pace: String,
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub personalized_tips: Vec<String>,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            query_type: QueryType::ComprehensiveLearning,
            learning_style: "balanced".into(),
            pace: "moderate".into(),
            focus_areas: vec!["fundamentals".into(), "hands-on practice".into()],
            personalized_tips: vec![
                "Set aside regular time each week for learning".into(),
                "Practice with small projects as you go".into(),
            ],
        }
    }
}

/// Learner preferences sent with a customization request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationRequest {
    pub topic: String,
    #[serde(default)]
    pub experience_level: Option<SkillLevel>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub weekly_hours: Option<u32>,
    #[serde(default)]
    pub preferred_formats: Vec<String>,
}
