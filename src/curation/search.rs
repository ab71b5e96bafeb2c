// src/curation/search.rs — Search collaborator and the curation pipeline

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::classifier::{detect_topic_category, enhance_search_query};
use super::filter::filter_articles_by_quality;
use super::scorer::{calculate_topic_relevance, get_domain_category_priority};
use super::types::{Article, QualityCriteria};
use crate::domain::domains::DomainCategory;
use crate::infra::config::CurationConfig;
use crate::infra::errors::LearnpathError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Article,
}

/// External content search (video/article APIs). Returns raw, already-fetched records.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn id(&self) -> &str;

    async fn search(&self, query: &str, kind: ResourceKind) -> Result<Vec<Value>, LearnpathError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurationRequest {
    pub kind: ResourceKind,
    /// `None` applies the default quality threshold only.
    #[serde(default)]
    pub criteria: Option<QualityCriteria>,
    #[serde(default)]
    pub priority_categories: Vec<DomainCategory>,
    /// Maximum results; 0 keeps everything that passes the filter.
    #[serde(default)]
    pub limit: usize,
}

impl CurationRequest {
    pub fn from_config(kind: ResourceKind, config: &CurationConfig) -> Self {
        Self {
            kind,
            criteria: Some(QualityCriteria {
                min_quality_score: Some(config.min_quality_score),
                ..Default::default()
            }),
            priority_categories: config.priority_categories.clone(),
            limit: config.max_results,
        }
    }
}

/// An article that passed filtering, with the signals used to order it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub relevance: f64,
    pub domain_priority: u32,
    pub rank_score: f64,
}

/// Normalise, score, filter and rank raw search records.
///
/// Records that cannot be normalised are dropped. Ranking is by
/// `domain priority + topic relevance + quality score`, descending; ties keep
/// their input order.
pub fn curate_records(
    raw: &[Value],
    topic: &str,
    request: &CurationRequest,
    now: DateTime<Utc>,
) -> Vec<RankedArticle> {
    let articles: Vec<Article> = raw
        .iter()
        .filter_map(|r| {
            let article = Article::from_raw(r, now);
            if article.is_none() {
                tracing::debug!(record = %r, "Skipping malformed search record");
            }
            article
        })
        .collect();

    let kept = filter_articles_by_quality(&articles, request.criteria.as_ref(), now);
    let mut ranked = rank_articles(&kept, topic, &request.priority_categories);
    if request.limit > 0 {
        ranked.truncate(request.limit);
    }
    ranked
}

/// Order articles by their combined rank score (stable for ties).
pub fn rank_articles(
    articles: &[&Article],
    topic: &str,
    priority_categories: &[DomainCategory],
) -> Vec<RankedArticle> {
    let mut ranked: Vec<RankedArticle> = articles
        .iter()
        .map(|a| {
            let relevance = calculate_topic_relevance(a, topic);
            let domain_priority = get_domain_category_priority(&a.domain, priority_categories);
            RankedArticle {
                article: (*a).clone(),
                relevance,
                domain_priority,
                rank_score: domain_priority as f64 + relevance + a.quality_score,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.rank_score
            .partial_cmp(&a.rank_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Runs a topic through query synthesis, the search collaborator and `curate_records`.
pub struct Curator {
    provider: Arc<dyn SearchProvider>,
}

impl Curator {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Collaborator errors propagate unchanged.
    pub async fn curate(
        &self,
        topic: &str,
        request: &CurationRequest,
    ) -> Result<Vec<RankedArticle>, LearnpathError> {
        let criteria = request.criteria.as_ref();
        let query = enhance_search_query(
            topic,
            criteria.and_then(|c| c.skill_level),
            criteria.and_then(|c| c.content_type),
            detect_topic_category(topic),
        );

        tracing::debug!(provider = self.provider.id(), %query, kind = ?request.kind, "Searching");
        let raw = self.provider.search(&query, request.kind).await?;
        let ranked = curate_records(&raw, topic, request, Utc::now());

        tracing::info!(
            provider = self.provider.id(),
            fetched = raw.len(),
            kept = ranked.len(),
            "Curated search results"
        );
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap()
    }

    fn request(limit: usize) -> CurationRequest {
        CurationRequest {
            kind: ResourceKind::Article,
            criteria: Some(QualityCriteria::default()),
            priority_categories: vec![DomainCategory::Documentation, DomainCategory::Tutorial],
            limit,
        }
    }

    fn records() -> Vec<Value> {
        vec![
            serde_json::json!({
                "id": "blog",
                "title": "My thoughts on Rust",
                "url": "https://medium.com/@x/rust",
                "tags": ["rust"],
                "educationalValue": 60,
            }),
            serde_json::json!({
                "id": "docs",
                "title": "The Rust Book: ownership",
                "url": "https://doc.rust-lang.org/book/ch04.html",
                "tags": ["rust", "ownership"],
                "educationalValue": 90,
                "hasCodeExamples": true,
            }),
            serde_json::json!({"title": "no url"}),
        ]
    }

    #[test]
    fn test_curate_records_ranks_docs_first_and_drops_malformed() {
        let ranked = curate_records(&records(), "rust ownership", &request(0), now());
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].article.id, "docs");
        assert_eq!(ranked[0].domain_priority, 20);
        assert_eq!(ranked[1].domain_priority, 0);
        assert!(ranked[0].relevance > ranked[1].relevance);
    }

    #[test]
    fn test_curate_records_limit() {
        let ranked = curate_records(&records(), "rust", &request(1), now());
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_rank_stable_for_ties() {
        let raw: Vec<Value> = (0..3)
            .map(|i| {
                serde_json::json!({
                    "id": format!("t{i}"),
                    "title": "Same",
                    "url": format!("https://example.org/{i}"),
                })
            })
            .collect();
        let ranked = curate_records(&raw, "anything", &request(0), now());
        let ids: Vec<_> = ranked.iter().map(|r| r.article.id.as_str()).collect();
        assert_eq!(ids, vec!["t0", "t1", "t2"]);
    }

    #[test]
    fn test_request_from_config() {
        let cfg = CurationConfig::default();
        let req = CurationRequest::from_config(ResourceKind::Video, &cfg);
        assert_eq!(req.limit, 10);
        assert_eq!(
            req.criteria.unwrap().min_quality_score,
            Some(cfg.min_quality_score)
        );
        assert_eq!(req.priority_categories.len(), 3);
    }

    #[test]
    fn test_ranked_article_serializes_flat() {
        let ranked = curate_records(&records(), "rust", &request(1), now());
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert!(json.get("title").is_some());
        assert!(json.get("rankScore").is_some());
        assert!(json.get("article").is_none());
    }
}
