// src/roadmap/validate.rs — Repair AI roadmap payloads into the canonical schema

use serde_json::{Map, Value};

use super::types::{Customization, Difficulty, QueryType, RoadmapData, RoadmapMilestone, RoadmapResource};
use crate::util::{str_field, string_list};

pub const DEFAULT_TOTAL_ESTIMATED_TIME: &str = "4-6 weeks";
pub const DEFAULT_MILESTONE_TIME: &str = "1-2 hours";
pub const DEFAULT_MILESTONE_DESCRIPTION: &str = "Work through the material for this step";

/// Outcome of validating an untyped roadmap payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RoadmapValidation {
    Valid(RoadmapData),
    Invalid(Vec<String>),
}

/// Validate and repair a parsed roadmap payload.
///
/// Repairable defects are fixed silently. A payload that is not an object, has
/// no milestones, or contains a milestone that is not an object is rejected.
pub fn validate_roadmap(value: &Value, topic: &str) -> RoadmapValidation {
    let Some(obj) = value.as_object() else {
        return RoadmapValidation::Invalid(vec!["roadmap must be a JSON object".into()]);
    };

    let raw_milestones = match obj.get("milestones") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(Value::Array(_)) => {
            return RoadmapValidation::Invalid(vec!["roadmap has no milestones".into()]);
        }
        _ => return RoadmapValidation::Invalid(vec!["milestones must be an array".into()]),
    };

    let mut errors = Vec::new();
    let mut milestones = Vec::with_capacity(raw_milestones.len());
    for (index, raw) in raw_milestones.iter().enumerate() {
        match raw.as_object() {
            Some(m) => milestones.push(repair_milestone(m, index)),
            None => errors.push(format!("milestone {index} is not an object")),
        }
    }
    if !errors.is_empty() {
        return RoadmapValidation::Invalid(errors);
    }

    let query_type = str_field(obj, &["queryType", "query_type"])
        .and_then(|s| QueryType::parse(&s))
        .unwrap_or_default();

    RoadmapValidation::Valid(RoadmapData {
        query_type,
        overview: str_field(obj, &["overview"])
            .unwrap_or_else(|| format!("Learn {} step by step", topic.trim())),
        total_estimated_time: str_field(obj, &["totalEstimatedTime", "total_estimated_time"])
            .unwrap_or_else(|| DEFAULT_TOTAL_ESTIMATED_TIME.to_string()),
        prerequisites: string_list(obj.get("prerequisites")),
        tips: string_list(obj.get("tips")),
        milestones,
    })
}

fn repair_milestone(m: &Map<String, Value>, index: usize) -> RoadmapMilestone {
    RoadmapMilestone {
        id: str_field(m, &["id"]).unwrap_or_else(|| format!("milestone-{index}")),
        title: str_field(m, &["title"]).unwrap_or_else(|| format!("Milestone {}", index + 1)),
        description: str_field(m, &["description"])
            .unwrap_or_else(|| DEFAULT_MILESTONE_DESCRIPTION.to_string()),
        difficulty: str_field(m, &["difficulty"])
            .and_then(|d| Difficulty::parse(&d))
            .unwrap_or_default(),
        estimated_time: str_field(m, &["estimatedTime", "estimated_time"])
            .unwrap_or_else(|| DEFAULT_MILESTONE_TIME.to_string()),
        resources: repair_resources(m.get("resources")),
        skills: string_list(m.get("skills")),
    }
}

/// Resource entries without a title are dropped; bare strings become titles.
fn repair_resources(value: Option<&Value>) -> Vec<RoadmapResource> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) if !s.trim().is_empty() => Some(RoadmapResource {
                title: s.trim().to_string(),
                url: None,
                kind: "article".into(),
            }),
            Value::Object(r) => Some(RoadmapResource {
                title: str_field(r, &["title", "name"])?,
                url: str_field(r, &["url", "link"]),
                kind: str_field(r, &["type", "kind"])
                    .map(|k| k.to_lowercase())
                    .unwrap_or_else(|| "article".into()),
            }),
            _ => None,
        })
        .collect()
}

/// Customization payloads are not repaired: anything short of the full shape is `None`.
pub fn validate_customization(value: &Value) -> Option<Customization> {
    serde_json::from_value(value.clone()).ok()
}
