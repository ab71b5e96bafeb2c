// src/cli/curate.rs — classify, query and curate commands

use anyhow::Context;
use chrono::Utc;
use serde_json::Value;

use crate::curation::search::{curate_records, CurationRequest, ResourceKind};
use crate::curation::types::{ContentType, SkillLevel};
use crate::curation::{detect_topic_category, enhance_search_query};
use crate::domain::topics::TopicCategory;
use crate::infra::config::Config;

pub fn run_classify(topic: &str) -> anyhow::Result<()> {
    match detect_topic_category(topic) {
        Some(category) => println!("{category}"),
        None => println!("none"),
    }
    Ok(())
}

pub(crate) fn parse_skill_level(s: Option<&str>) -> anyhow::Result<Option<SkillLevel>> {
    s.map(|s| {
        SkillLevel::parse(s).with_context(|| {
            format!("Unknown skill level '{s}'. Options: beginner, intermediate, advanced")
        })
    })
    .transpose()
}

pub(crate) fn parse_content_type(s: Option<&str>) -> anyhow::Result<Option<ContentType>> {
    s.map(|s| {
        ContentType::parse(s).with_context(|| {
            format!(
                "Unknown content type '{s}'. Options: tutorial, documentation, article, research, video, course"
            )
        })
    })
    .transpose()
}

pub fn run_query(
    query: &str,
    skill_level: Option<&str>,
    content_type: Option<&str>,
    category: Option<&str>,
) -> anyhow::Result<()> {
    let category = match category {
        Some(c) => Some(TopicCategory::parse(c).with_context(|| {
            format!("Unknown category '{c}'. Options: programming, web_development, data_science, devops")
        })?),
        None => detect_topic_category(query),
    };

    let enhanced = enhance_search_query(
        query,
        parse_skill_level(skill_level)?,
        parse_content_type(content_type)?,
        category,
    );
    println!("{enhanced}");
    Ok(())
}

pub struct CurateArgs<'a> {
    pub topic: &'a str,
    pub input: &'a str,
    pub skill_level: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub min_quality: Option<f64>,
    pub max_age_days: Option<i64>,
    pub code_examples: bool,
    pub limit: Option<usize>,
    pub json: bool,
}

pub fn run_curate(args: CurateArgs<'_>, config: &Config) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(args.input)
        .with_context(|| format!("Failed to read {}", args.input))?;
    let raw: Vec<Value> = serde_json::from_str(&content)
        .with_context(|| format!("{} must hold a JSON array of search records", args.input))?;

    let content_type = parse_content_type(args.content_type)?;
    let kind = match content_type {
        Some(ContentType::Video) => ResourceKind::Video,
        _ => ResourceKind::Article,
    };

    let mut request = CurationRequest::from_config(kind, &config.curation);
    if let Some(criteria) = request.criteria.as_mut() {
        if let Some(min) = args.min_quality {
            criteria.min_quality_score = Some(min);
        }
        criteria.skill_level = parse_skill_level(args.skill_level)?;
        criteria.content_type = content_type;
        criteria.max_age_in_days = args.max_age_days;
        criteria.include_code_examples = args.code_examples.then_some(true);
    }
    if let Some(limit) = args.limit {
        request.limit = limit;
    }

    let ranked = curate_records(&raw, args.topic, &request, Utc::now());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("No results passed the quality filter ({} candidates).", raw.len());
        return Ok(());
    }
    println!("{} of {} results for \"{}\":\n", ranked.len(), raw.len(), args.topic);
    for (i, r) in ranked.iter().enumerate() {
        println!(
            "{:>2}. [{:>5.1}] {}  ({}, quality {:.0}, relevance {:.0})",
            i + 1,
            r.rank_score,
            r.article.title,
            r.article.domain,
            r.article.quality_score,
            r.relevance
        );
        println!("      {}", r.article.url);
    }
    Ok(())
}
