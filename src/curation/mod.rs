// src/curation/mod.rs — Topic classification, query synthesis, quality scoring and filtering

pub mod classifier;
pub mod filter;
pub mod scorer;
pub mod search;
pub mod types;

pub use classifier::{detect_topic_category, enhance_search_query};
pub use filter::filter_articles_by_quality;
pub use scorer::{calculate_quality_score, calculate_topic_relevance, get_domain_category_priority};
pub use search::{curate_records, CurationRequest, Curator, RankedArticle, ResourceKind, SearchProvider};
pub use types::{Article, ContentDepth, ContentType, QualityCriteria, SkillLevel};
