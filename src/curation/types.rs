// src/curation/types.rs — Content records and filter criteria

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::domains::{self, DomainCategory};
use crate::domain::keywords;
use crate::util::{as_bool, normalize_whitespace, num_field, str_field, string_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentDepth {
    Basic,
    Intermediate,
    Advanced,
}

impl ContentDepth {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "beginner" => Some(Self::Basic),
            "intermediate" => Some(Self::Intermediate),
            "advanced" | "expert" => Some(Self::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Tutorial,
    Documentation,
    Article,
    Research,
    Video,
    Course,
    #[serde(other)]
    Other,
}

impl ContentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tutorial" | "guide" => Some(Self::Tutorial),
            "documentation" | "docs" | "reference" => Some(Self::Documentation),
            "article" | "blog" | "post" => Some(Self::Article),
            "research" | "paper" => Some(Self::Research),
            "video" => Some(Self::Video),
            "course" => Some(Self::Course),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// The content depth a learner at this level should be served.
    pub fn depth(&self) -> ContentDepth {
        match self {
            Self::Beginner => ContentDepth::Basic,
            Self::Intermediate => ContentDepth::Intermediate,
            Self::Advanced => ContentDepth::Advanced,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "basic" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" | "expert" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// A curated video or article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub domain: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Minutes.
    pub reading_time: u32,
    pub tags: Vec<String>,
    pub quality_score: f64,
    pub educational_value: f64,
    pub authority_score: f64,
    pub freshness_score: f64,
    pub content_depth: ContentDepth,
    pub content_type: ContentType,
    pub has_code_examples: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_credibility: Option<f64>,
}

impl Article {
    /// Normalise one raw search record. Returns `None` when the record has no
    /// title or no http(s) URL; every other field falls back to a derived value.
    pub fn from_raw(raw: &Value, now: DateTime<Utc>) -> Option<Article> {
        let obj = raw.as_object()?;

        let title = normalize_whitespace(&str_field(obj, &["title", "name"])?);
        let url_str = str_field(obj, &["url", "link", "href"])?;
        let parsed = url::Url::parse(&url_str).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }

        let domain = str_field(obj, &["domain"])
            .or_else(|| parsed.host_str().map(str::to_string))
            .map(|d| domains::normalize_domain(&d))
            .unwrap_or_default();
        let description = str_field(obj, &["description", "snippet", "summary"])
            .map(|d| normalize_whitespace(&d))
            .unwrap_or_default();
        let published_at = str_field(obj, &["publishedAt", "published_at", "date"])
            .and_then(|s| parse_timestamp(&s));

        let mut tags: Vec<String> = Vec::new();
        for tag in string_list(obj.get("tags")) {
            let tag = tag.to_lowercase();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let content_type = str_field(obj, &["contentType", "content_type", "type"])
            .and_then(|s| ContentType::parse(&s))
            .unwrap_or_else(|| default_content_type(&title, &domain));
        let content_depth = str_field(obj, &["contentDepth", "content_depth", "level"])
            .and_then(|s| ContentDepth::parse(&s))
            .unwrap_or_else(|| keywords::infer_content_depth(&title, &description));
        let has_code_examples = ["hasCodeExamples", "has_code_examples"]
            .iter()
            .find_map(|k| obj.get(*k).and_then(as_bool))
            .unwrap_or_else(|| {
                tags.iter().any(|t| t == "code" || t == "examples")
                    || description.contains("```")
                    || description.to_lowercase().contains("code example")
            });

        let educational_value = num_field(obj, &["educationalValue", "educational_value"])
            .map(clamp_score)
            .unwrap_or_else(|| estimate_educational_value(content_type, has_code_examples));

        let mut article = Article {
            id: str_field(obj, &["id"]).unwrap_or_else(|| url_str.clone()),
            source: str_field(obj, &["source", "channelTitle", "siteName"])
                .unwrap_or_else(|| domain.clone()),
            reading_time: num_field(obj, &["readingTime", "reading_time", "duration"])
                .map(|m| m.max(0.0).round() as u32)
                .unwrap_or(0),
            quality_score: 0.0,
            educational_value,
            authority_score: num_field(obj, &["authorityScore", "authority_score"])
                .map(clamp_score)
                .unwrap_or_else(|| domains::domain_authority(&domain) as f64),
            freshness_score: num_field(obj, &["freshnessScore", "freshness_score"])
                .map(clamp_score)
                .unwrap_or_else(|| freshness_score(published_at, now)),
            author_credibility: num_field(obj, &["authorCredibility", "author_credibility"])
                .map(clamp_score),
            title,
            description,
            url: url_str,
            domain,
            published_at,
            tags,
            content_depth,
            content_type,
            has_code_examples,
        };
        article.quality_score = super::scorer::calculate_quality_score(&article);
        Some(article)
    }

    pub fn domain_category(&self) -> Option<DomainCategory> {
        domains::domain_category(&self.domain)
    }
}

fn clamp_score(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

fn default_content_type(title: &str, domain: &str) -> ContentType {
    match domains::domain_category(domain) {
        Some(DomainCategory::Video) => ContentType::Video,
        Some(DomainCategory::Documentation) => ContentType::Documentation,
        _ => keywords::infer_content_type(title).unwrap_or(ContentType::Article),
    }
}

fn estimate_educational_value(content_type: ContentType, has_code_examples: bool) -> f64 {
    let base: f64 = match content_type {
        ContentType::Tutorial | ContentType::Course => 70.0,
        ContentType::Documentation | ContentType::Research => 65.0,
        ContentType::Video => 60.0,
        ContentType::Article | ContentType::Other => 50.0,
    };
    if has_code_examples {
        base + 10.0
    } else {
        base
    }
}

/// RFC 3339 timestamps or bare `YYYY-MM-DD` dates (taken as midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s.trim()) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Recency score in 0–100 stepped by age. Unknown dates score a neutral 50.
pub fn freshness_score(published_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(published) = published_at else {
        return 50.0;
    };
    match (now - published).num_days() {
        d if d <= 30 => 100.0,
        d if d <= 90 => 85.0,
        d if d <= 180 => 70.0,
        d if d <= 365 => 55.0,
        d if d <= 730 => 35.0,
        _ => 15.0,
    }
}

/// Predicates for `filter_articles_by_quality`. Every supplied field must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityCriteria {
    pub min_quality_score: Option<f64>,
    pub skill_level: Option<SkillLevel>,
    pub content_type: Option<ContentType>,
    pub include_code_examples: Option<bool>,
    pub max_age_in_days: Option<i64>,
    /// Allowlist; an empty list imposes no restriction.
    pub domains: Vec<String>,
    /// Category allowlist; an empty list imposes no restriction.
    pub prioritize_domain_categories: Vec<DomainCategory>,
    pub min_authority_score: Option<f64>,
    pub require_author: Option<bool>,
}
