// src/domain/keywords.rs — Content-type and skill-level keyword tables

use crate::curation::types::{ContentDepth, ContentType, SkillLevel};

/// Search keywords appended for a requested content type.
pub fn content_type_keywords(content_type: ContentType) -> &'static [&'static str] {
    match content_type {
        ContentType::Tutorial => &["tutorial"],
        ContentType::Documentation => &["documentation", "reference"],
        ContentType::Article => &["article"],
        ContentType::Research => &["research", "paper"],
        ContentType::Video => &["video"],
        ContentType::Course => &["course"],
        ContentType::Other => &[],
    }
}

/// Search keywords appended for a requested skill level.
pub fn skill_level_keywords(level: SkillLevel) -> &'static [&'static str] {
    match level {
        SkillLevel::Beginner => &["beginner", "introduction"],
        SkillLevel::Intermediate => &["intermediate"],
        SkillLevel::Advanced => &["advanced"],
    }
}

// Title cues used when a raw record carries no explicit type or depth.

const TUTORIAL_CUES: &[&str] = &["tutorial", "how to", "guide", "walkthrough", "step by step"];
const RESEARCH_CUES: &[&str] = &["paper", "research", "study", "survey"];
const COURSE_CUES: &[&str] = &["course", "bootcamp", "lesson"];
const BASIC_CUES: &[&str] = &[
    "beginner",
    "introduction",
    "intro to",
    "basics",
    "getting started",
    "for dummies",
    "101",
];
const ADVANCED_CUES: &[&str] = &["advanced", "deep dive", "internals", "expert", "mastering"];

fn has_cue(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text.contains(cue))
}

/// Guess a content type from a title when the record has none.
pub fn infer_content_type(title: &str) -> Option<ContentType> {
    let t = title.to_lowercase();
    if has_cue(&t, RESEARCH_CUES) {
        Some(ContentType::Research)
    } else if has_cue(&t, COURSE_CUES) {
        Some(ContentType::Course)
    } else if has_cue(&t, TUTORIAL_CUES) {
        Some(ContentType::Tutorial)
    } else {
        None
    }
}

/// Guess a content depth from title and description. Defaults to intermediate.
pub fn infer_content_depth(title: &str, description: &str) -> ContentDepth {
    let text = format!("{} {}", title, description).to_lowercase();
    if has_cue(&text, ADVANCED_CUES) {
        ContentDepth::Advanced
    } else if has_cue(&text, BASIC_CUES) {
        ContentDepth::Basic
    } else {
        ContentDepth::Intermediate
    }
}
