// src/curation/scorer.rs — Content quality, relevance and domain priority scoring

use std::collections::HashSet;

use super::classifier::detect_topic_category;
use super::types::{Article, ContentDepth};
use crate::domain::domains::{domain_category, DomainCategory};
use crate::util::tokenize;

// Quality score weights. Inputs are 0–100, so the weighted terms sum to at most
// 35 + 25 + 15 + 10 + 10 + 15 = 110 before clamping to 100.
pub const EDUCATIONAL_VALUE_WEIGHT: f64 = 0.35;
pub const AUTHORITY_WEIGHT: f64 = 0.25;
pub const FRESHNESS_WEIGHT: f64 = 0.15;
pub const DEPTH_WEIGHT: f64 = 0.10;
pub const CODE_EXAMPLES_BONUS: f64 = 10.0;
pub const AUTHOR_CREDIBILITY_WEIGHT: f64 = 0.15;

/// Depth term input: deeper material scores higher.
fn depth_value(depth: ContentDepth) -> f64 {
    match depth {
        ContentDepth::Basic => 60.0,
        ContentDepth::Intermediate => 80.0,
        ContentDepth::Advanced => 100.0,
    }
}

/// Weighted composite of an article's quality signals, clamped to [0, 100].
pub fn calculate_quality_score(article: &Article) -> f64 {
    let mut score = article.educational_value * EDUCATIONAL_VALUE_WEIGHT
        + article.authority_score * AUTHORITY_WEIGHT
        + article.freshness_score * FRESHNESS_WEIGHT
        + depth_value(article.content_depth) * DEPTH_WEIGHT;

    if article.has_code_examples {
        score += CODE_EXAMPLES_BONUS;
    }
    if let Some(credibility) = article.author_credibility {
        score += credibility * AUTHOR_CREDIBILITY_WEIGHT;
    }

    score.clamp(0.0, 100.0)
}

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "the", "to", "of", "for", "in", "on", "with", "how", "learn", "learning",
    "intro", "introduction", "guide", "tutorial", "basics",
];

const TAG_OVERLAP_WEIGHT: f64 = 70.0;
const SPECIALTY_HIT_POINTS: f64 = 10.0;
const MAX_SPECIALTY_HITS: usize = 3;

/// Relevance of an article to a topic, 0–100.
///
/// The share of topic tokens found in the article's tags earns up to 70 points;
/// each specialty keyword of the topic's category that appears in the tags or
/// title adds 10 (at most 3). Without any topic/tag overlap the score is 0.
pub fn calculate_topic_relevance(article: &Article, topic: &str) -> f64 {
    let topic_tokens: HashSet<String> = tokenize(topic)
        .into_iter()
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .collect();
    if topic_tokens.is_empty() {
        return 0.0;
    }

    let tag_tokens: HashSet<String> = article.tags.iter().flat_map(|t| tokenize(t)).collect();
    let overlap = topic_tokens.intersection(&tag_tokens).count();
    if overlap == 0 {
        return 0.0;
    }

    let mut score = overlap as f64 / topic_tokens.len() as f64 * TAG_OVERLAP_WEIGHT;

    if let Some(category) = detect_topic_category(topic) {
        let title_tokens: HashSet<String> = tokenize(&article.title).into_iter().collect();
        let hits = category
            .specialty_keywords()
            .iter()
            .filter(|kw| tag_tokens.contains(**kw) || title_tokens.contains(**kw))
            .count()
            .min(MAX_SPECIALTY_HITS);
        score += hits as f64 * SPECIALTY_HIT_POINTS;
    }

    score.min(100.0)
}

/// Priority of a domain given an ordered category preference list.
///
/// `(len - index) * 10` for the domain's category, so earlier entries score
/// higher; 0 when the domain is unknown or its category is not listed.
pub fn get_domain_category_priority(domain: &str, priority_list: &[DomainCategory]) -> u32 {
    let Some(category) = domain_category(domain) else {
        return 0;
    };
    priority_list
        .iter()
        .position(|c| *c == category)
        .map(|index| ((priority_list.len() - index) * 10) as u32)
        .unwrap_or(0)
}
