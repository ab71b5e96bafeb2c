// src/progress/validation.rs — Structural checks and total sanitisation of stored progress
//
// `validate_*` report problems without changing anything. `sanitize_*` never
// fail: they coerce whatever they are given into well-formed records.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::{
    Achievement, AchievementCriterion, CriterionKind, LearningPath, Milestone, MilestoneType,
    ProgressState,
};
use crate::curation::types::parse_timestamp;
use crate::domain::achievements::default_achievements;
use crate::roadmap::types::QueryType;
use crate::util::{as_bool, as_f64, str_field, string_list};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    fn invalid(error: impl Into<String>) -> Self {
        Self::from_parts(vec![error.into()], Vec::new())
    }

    /// Fold a nested result in, prefixing its messages.
    fn absorb(&mut self, prefix: &str, other: ValidationResult) {
        self.errors
            .extend(other.errors.into_iter().map(|e| format!("{prefix}: {e}")));
        self.warnings
            .extend(other.warnings.into_iter().map(|w| format!("{prefix}: {w}")));
        self.is_valid = self.errors.is_empty();
    }
}

fn require_str(obj: &Map<String, Value>, key: &str, errors: &mut Vec<String>) {
    if str_field(obj, &[key]).is_none() {
        errors.push(format!("{key} is required"));
    }
}

fn check_timestamp(obj: &Map<String, Value>, key: &str, errors: &mut Vec<String>) -> Option<bool> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if parse_timestamp(s).is_some() => Some(true),
        Some(_) => {
            errors.push(format!("{key} is not a valid timestamp"));
            Some(false)
        }
    }
}

fn check_non_negative(obj: &Map<String, Value>, key: &str, required: bool, errors: &mut Vec<String>) {
    match obj.get(key) {
        None | Some(Value::Null) if !required => {}
        None | Some(Value::Null) => errors.push(format!("{key} is required")),
        Some(v) => match as_f64(v) {
            Some(n) if n >= 0.0 => {}
            Some(_) => errors.push(format!("{key} must not be negative")),
            None => errors.push(format!("{key} must be a number")),
        },
    }
}

pub fn validate_milestone(value: &Value) -> ValidationResult {
    let Some(obj) = value.as_object() else {
        return ValidationResult::invalid("milestone must be an object");
    };
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    require_str(obj, "id", &mut errors);
    require_str(obj, "title", &mut errors);

    match obj.get("type").and_then(Value::as_str) {
        Some(t) if MilestoneType::parse(t).is_some() => {}
        Some(t) => errors.push(format!("type '{t}' is not one of video, article, exercise, quiz")),
        None => errors.push("type is required".into()),
    }

    check_non_negative(obj, "estimatedTime", true, &mut errors);
    check_non_negative(obj, "timeSpent", false, &mut errors);

    if let Some(score) = obj.get("score").filter(|v| !v.is_null()) {
        match as_f64(score) {
            Some(s) if (0.0..=100.0).contains(&s) => {}
            _ => errors.push("score must be between 0 and 100".into()),
        }
    }

    let completed = match obj.get("completed") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            errors.push("completed must be a boolean".into());
            false
        }
    };
    let has_timestamp = check_timestamp(obj, "completedAt", &mut errors).is_some();
    if completed && !has_timestamp {
        warnings.push("completed milestone has no completedAt".into());
    }
    if !completed && has_timestamp {
        warnings.push("completedAt set on an incomplete milestone".into());
    }

    ValidationResult::from_parts(errors, warnings)
}

pub fn validate_learning_path(value: &Value) -> ValidationResult {
    let Some(obj) = value.as_object() else {
        return ValidationResult::invalid("learning path must be an object");
    };
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    require_str(obj, "id", &mut errors);
    require_str(obj, "topic", &mut errors);
    for key in ["createdAt", "updatedAt"] {
        if check_timestamp(obj, key, &mut errors).is_none() {
            warnings.push(format!("{key} is missing"));
        }
    }
    if let Some(q) = obj.get("queryType").and_then(Value::as_str) {
        if QueryType::parse(q).is_none() {
            errors.push(format!("queryType '{q}' is not recognised"));
        }
    }

    let mut result = ValidationResult::from_parts(errors, warnings);
    match obj.get("milestones") {
        Some(Value::Array(items)) => {
            if items.is_empty() {
                result.warnings.push("learning path has no milestones".into());
            }
            let mut seen = HashSet::new();
            for (i, item) in items.iter().enumerate() {
                result.absorb(&format!("milestones[{i}]"), validate_milestone(item));
                if let Some(id) = item.get("id").and_then(Value::as_str) {
                    if !seen.insert(id.trim()) {
                        result.errors.push(format!("duplicate milestone id '{}'", id.trim()));
                    }
                }
            }
        }
        _ => result.errors.push("milestones must be an array".into()),
    }
    result.is_valid = result.errors.is_empty();
    result
}

pub fn validate_achievement(value: &Value) -> ValidationResult {
    let Some(obj) = value.as_object() else {
        return ValidationResult::invalid("achievement must be an object");
    };
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    require_str(obj, "id", &mut errors);
    require_str(obj, "title", &mut errors);

    match obj.get("criteria") {
        Some(Value::Array(items)) => {
            if items.is_empty() {
                warnings.push("achievement has no criteria and can never unlock".into());
            }
            for (i, c) in items.iter().enumerate() {
                match c.get("type").and_then(Value::as_str) {
                    Some(t) if CriterionKind::parse(t).is_some() => {}
                    _ => errors.push(format!("criteria[{i}]: unknown criterion type")),
                }
                match c.get("required").and_then(as_f64) {
                    Some(r) if r >= 0.0 => {}
                    _ => errors.push(format!("criteria[{i}]: required must be a non-negative number")),
                }
            }
        }
        _ => errors.push("criteria must be an array".into()),
    }

    let unlocked = obj.get("unlocked").and_then(Value::as_bool).unwrap_or(false);
    let has_timestamp = check_timestamp(obj, "unlockedAt", &mut errors).is_some();
    if unlocked && !has_timestamp {
        warnings.push("unlocked achievement has no unlockedAt".into());
    }

    ValidationResult::from_parts(errors, warnings)
}

pub fn validate_progress_state(value: &Value) -> ValidationResult {
    let Some(obj) = value.as_object() else {
        return ValidationResult::invalid("progress state must be an object");
    };
    let mut result = ValidationResult::from_parts(Vec::new(), Vec::new());

    match obj.get("paths") {
        Some(Value::Object(paths)) => {
            for (key, path) in paths {
                result.absorb(&format!("paths.{key}"), validate_learning_path(path));
                if let Some(id) = path.get("id").and_then(Value::as_str) {
                    if id != key {
                        result
                            .warnings
                            .push(format!("paths.{key}: id '{id}' does not match its key"));
                    }
                }
            }
        }
        None => result.warnings.push("paths is missing".into()),
        Some(_) => result.errors.push("paths must be an object".into()),
    }

    match obj.get("achievements") {
        Some(Value::Array(items)) => {
            for (i, a) in items.iter().enumerate() {
                result.absorb(&format!("achievements[{i}]"), validate_achievement(a));
            }
        }
        None => result.warnings.push("achievements is missing".into()),
        Some(_) => result.errors.push("achievements must be an array".into()),
    }

    if let Some(flag) = obj.get("aiCreditProtection") {
        if !flag.is_boolean() {
            result.errors.push("aiCreditProtection must be a boolean".into());
        }
    }

    result.is_valid = result.errors.is_empty();
    result
}

// ─── Sanitisation ───────────────────────────────────────────────────────────

fn timestamp_field(obj: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    obj.get(key).and_then(Value::as_str).and_then(parse_timestamp)
}

fn minutes(obj: &Map<String, Value>, key: &str) -> u32 {
    obj.get(key)
        .and_then(as_f64)
        .map(|n| n.round().clamp(0.0, u32::MAX as f64) as u32)
        .unwrap_or(0)
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Coerce any value into a milestone. A completed milestone without a valid
/// timestamp is stamped with `now`; incomplete milestones carry none.
pub fn sanitize_milestone(value: &Value, now: DateTime<Utc>) -> Milestone {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);

    let completed = obj.get("completed").and_then(as_bool).unwrap_or(false);
    Milestone {
        id: str_field(obj, &["id"]).unwrap_or_else(new_id),
        title: str_field(obj, &["title"]).unwrap_or_else(|| "Untitled milestone".into()),
        description: str_field(obj, &["description"]).unwrap_or_default(),
        milestone_type: obj
            .get("type")
            .and_then(Value::as_str)
            .and_then(MilestoneType::parse)
            .unwrap_or(MilestoneType::Article),
        estimated_time: minutes(obj, "estimatedTime"),
        completed,
        completed_at: completed.then(|| timestamp_field(obj, "completedAt").unwrap_or(now)),
        time_spent: minutes(obj, "timeSpent"),
        score: obj
            .get("score")
            .and_then(as_f64)
            .map(|s| s.clamp(0.0, 100.0)),
        notes: str_field(obj, &["notes"]),
    }
}

fn sanitize_path_with_id(value: &Value, fallback_id: Option<&str>, now: DateTime<Utc>) -> LearningPath {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);

    let milestones = match obj.get("milestones") {
        Some(Value::Array(items)) => items.iter().map(|m| sanitize_milestone(m, now)).collect(),
        _ => Vec::new(),
    };
    let created_at = timestamp_field(obj, "createdAt").unwrap_or(now);

    LearningPath {
        id: str_field(obj, &["id"])
            .or_else(|| fallback_id.map(String::from))
            .unwrap_or_else(new_id),
        topic: str_field(obj, &["topic"]).unwrap_or_else(|| "Untitled".into()),
        milestones,
        created_at,
        updated_at: timestamp_field(obj, "updatedAt").unwrap_or(created_at),
        query_type: obj
            .get("queryType")
            .and_then(Value::as_str)
            .and_then(QueryType::parse),
        overview: str_field(obj, &["overview"]),
        total_estimated_time: str_field(obj, &["totalEstimatedTime"]),
        prerequisites: string_list(obj.get("prerequisites")),
        tips: string_list(obj.get("tips")),
    }
}

pub fn sanitize_learning_path(value: &Value, now: DateTime<Utc>) -> LearningPath {
    sanitize_path_with_id(value, None, now)
}

/// Criteria with an unknown type are dropped.
pub fn sanitize_achievement(value: &Value, now: DateTime<Utc>) -> Achievement {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);

    let criteria = match obj.get("criteria") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|c| {
                let c = c.as_object()?;
                let kind = c.get("type").and_then(Value::as_str).and_then(CriterionKind::parse)?;
                Some(AchievementCriterion {
                    kind,
                    required: c.get("required").and_then(as_f64).unwrap_or(0.0).max(0.0),
                    description: str_field(c, &["description"]).unwrap_or_default(),
                })
            })
            .collect(),
        _ => Vec::new(),
    };

    let unlocked = obj.get("unlocked").and_then(as_bool).unwrap_or(false);
    Achievement {
        id: str_field(obj, &["id"]).unwrap_or_else(new_id),
        title: str_field(obj, &["title"]).unwrap_or_else(|| "Achievement".into()),
        description: str_field(obj, &["description"]).unwrap_or_default(),
        icon: str_field(obj, &["icon"]).unwrap_or_else(|| "🏅".into()),
        criteria,
        unlocked,
        unlocked_at: unlocked.then(|| timestamp_field(obj, "unlockedAt").unwrap_or(now)),
    }
}

/// Paths may be stored as a map keyed by id or as a list. A state with no
/// achievements key gets the built-in catalog.
pub fn sanitize_progress_state(value: &Value, now: DateTime<Utc>) -> ProgressState {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);

    let mut paths = BTreeMap::new();
    match obj.get("paths") {
        Some(Value::Object(map)) => {
            for (key, path) in map {
                let path = sanitize_path_with_id(path, Some(key), now);
                paths.insert(path.id.clone(), path);
            }
        }
        Some(Value::Array(items)) => {
            for path in items {
                let path = sanitize_learning_path(path, now);
                paths.insert(path.id.clone(), path);
            }
        }
        _ => {}
    }

    let achievements = match obj.get("achievements") {
        Some(Value::Array(items)) => items.iter().map(|a| sanitize_achievement(a, now)).collect(),
        _ => default_achievements(),
    };

    ProgressState {
        paths,
        achievements,
        ai_credit_protection: obj
            .get("aiCreditProtection")
            .and_then(as_bool)
            .unwrap_or(false),
    }
}
