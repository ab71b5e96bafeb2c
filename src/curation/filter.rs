// src/curation/filter.rs — Stable AND-filter over curated content

use chrono::{DateTime, Utc};

use super::types::{Article, QualityCriteria};
use crate::domain::domains::normalize_domain;

/// Threshold applied when no criteria are supplied at all.
pub const DEFAULT_MIN_QUALITY_SCORE: f64 = 60.0;

/// Keep the articles that satisfy every supplied predicate, in input order.
///
/// `None` applies only the default minimum quality score. A supplied criteria
/// value applies exactly the predicates it sets.
pub fn filter_articles_by_quality<'a>(
    articles: &'a [Article],
    criteria: Option<&QualityCriteria>,
    now: DateTime<Utc>,
) -> Vec<&'a Article> {
    let default_criteria = QualityCriteria {
        min_quality_score: Some(DEFAULT_MIN_QUALITY_SCORE),
        ..Default::default()
    };
    let criteria = criteria.unwrap_or(&default_criteria);

    articles
        .iter()
        .filter(|a| passes(a, criteria, now))
        .collect()
}

fn passes(article: &Article, c: &QualityCriteria, now: DateTime<Utc>) -> bool {
    if let Some(min) = c.min_quality_score {
        if article.quality_score < min {
            return false;
        }
    }
    if let Some(level) = c.skill_level {
        if article.content_depth != level.depth() {
            return false;
        }
    }
    if let Some(ct) = c.content_type {
        if article.content_type != ct {
            return false;
        }
    }
    if c.include_code_examples == Some(true) && !article.has_code_examples {
        return false;
    }
    if let Some(max_days) = c.max_age_in_days {
        // Undated content cannot prove it is recent enough.
        match article.published_at {
            Some(published) if (now - published).num_days() <= max_days => {}
            _ => return false,
        }
    }
    if !c.domains.is_empty() {
        let domain = normalize_domain(&article.domain);
        if !c.domains.iter().any(|d| normalize_domain(d) == domain) {
            return false;
        }
    }
    if !c.prioritize_domain_categories.is_empty() {
        match article.domain_category() {
            Some(cat) if c.prioritize_domain_categories.contains(&cat) => {}
            _ => return false,
        }
    }
    if let Some(min) = c.min_authority_score {
        if article.authority_score < min {
            return false;
        }
    }
    if c.require_author == Some(true) && article.author_credibility.is_none() {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curation::types::{ContentDepth, ContentType, SkillLevel};
    use crate::domain::domains::DomainCategory;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap()
    }

    fn art(id: &str, domain: &str, quality: f64) -> Article {
        Article {
            id: id.into(),
            title: format!("Article {id}"),
            description: String::new(),
            url: format!("https://{domain}/{id}"),
            source: domain.into(),
            domain: domain.into(),
            published_at: Some(now() - Duration::days(10)),
            reading_time: 5,
            tags: vec![],
            quality_score: quality,
            educational_value: 60.0,
            authority_score: 70.0,
            freshness_score: 100.0,
            content_depth: ContentDepth::Intermediate,
            content_type: ContentType::Tutorial,
            has_code_examples: false,
            author_credibility: None,
        }
    }

    fn ids(v: &[&Article]) -> Vec<String> {
        v.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_default_threshold() {
        let articles = vec![art("1", "a.com", 59.9), art("2", "b.com", 60.0), art("3", "c.com", 90.0)];
        let out = filter_articles_by_quality(&articles, None, now());
        assert_eq!(ids(&out), vec!["2", "3"]);
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let articles = vec![art("1", "a.com", 5.0), art("2", "b.com", 95.0)];
        let out = filter_articles_by_quality(&articles, Some(&QualityCriteria::default()), now());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_skill_level_maps_to_depth() {
        let mut basic = art("1", "a.com", 80.0);
        basic.content_depth = ContentDepth::Basic;
        let articles = vec![basic, art("2", "b.com", 80.0)];
        let c = QualityCriteria {
            skill_level: Some(SkillLevel::Beginner),
            ..Default::default()
        };
        assert_eq!(ids(&filter_articles_by_quality(&articles, Some(&c), now())), vec!["1"]);
    }

    #[test]
    fn test_code_examples_and_author() {
        let mut with_code = art("1", "a.com", 80.0);
        with_code.has_code_examples = true;
        let mut with_both = art("2", "b.com", 80.0);
        with_both.has_code_examples = true;
        with_both.author_credibility = Some(70.0);
        let articles = vec![with_code, with_both, art("3", "c.com", 80.0)];
        let c = QualityCriteria {
            include_code_examples: Some(true),
            require_author: Some(true),
            ..Default::default()
        };
        assert_eq!(ids(&filter_articles_by_quality(&articles, Some(&c), now())), vec!["2"]);
    }

    #[test]
    fn test_max_age() {
        let mut old = art("old", "a.com", 80.0);
        old.published_at = Some(now() - Duration::days(400));
        let mut undated = art("undated", "a.com", 80.0);
        undated.published_at = None;
        let articles = vec![old, art("new", "b.com", 80.0), undated];
        let c = QualityCriteria {
            max_age_in_days: Some(365),
            ..Default::default()
        };
        assert_eq!(ids(&filter_articles_by_quality(&articles, Some(&c), now())), vec!["new"]);
    }

    #[test]
    fn test_domain_allowlist_normalized() {
        let articles = vec![art("1", "www.MDN.io", 80.0), art("2", "other.io", 80.0)];
        let c = QualityCriteria {
            domains: vec!["mdn.io".into()],
            ..Default::default()
        };
        assert_eq!(ids(&filter_articles_by_quality(&articles, Some(&c), now())), vec!["1"]);
    }

    #[test]
    fn test_domain_category_restriction() {
        let articles = vec![
            art("docs", "developer.mozilla.org", 80.0),
            art("blog", "medium.com", 80.0),
            art("unknown", "example.org", 80.0),
        ];
        let c = QualityCriteria {
            prioritize_domain_categories: vec![DomainCategory::Documentation],
            ..Default::default()
        };
        assert_eq!(ids(&filter_articles_by_quality(&articles, Some(&c), now())), vec!["docs"]);
    }

    #[test]
    fn test_and_semantics_and_order() {
        let mut a = art("a", "x.com", 90.0);
        a.authority_score = 95.0;
        let mut b = art("b", "y.com", 50.0);
        b.authority_score = 95.0;
        let mut c_art = art("c", "z.com", 85.0);
        c_art.authority_score = 95.0;
        let articles = vec![a, b, c_art, art("d", "w.com", 99.0)];
        let c = QualityCriteria {
            min_quality_score: Some(80.0),
            min_authority_score: Some(90.0),
            content_type: Some(ContentType::Tutorial),
            ..Default::default()
        };
        let out = filter_articles_by_quality(&articles, Some(&c), now());
        assert_eq!(ids(&out), vec!["a", "c"]);
    }

    #[test]
    fn test_output_is_subsequence() {
        let articles: Vec<Article> = (0..20)
            .map(|i| art(&i.to_string(), "a.com", (i * 5) as f64))
            .collect();
        let out = filter_articles_by_quality(&articles, None, now());
        let positions: Vec<usize> = out
            .iter()
            .map(|o| articles.iter().position(|a| std::ptr::eq(a, *o)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(out.len(), 8); // scores 60..=95
    }
}
