// src/curation/classifier.rs — Topic classification and search query synthesis

use super::types::{ContentType, SkillLevel};
use crate::domain::keywords::{content_type_keywords, skill_level_keywords};
use crate::domain::topics::{TopicCategory, DETECTION_ORDER};
use crate::util::tokenize;

/// Query used when the caller supplies nothing to search for.
pub const DEFAULT_QUERY: &str = "tutorial learn guide";

/// Classify a topic by the first category (in detection order) with a matching pattern.
pub fn detect_topic_category(topic: &str) -> Option<TopicCategory> {
    let lowered = topic.to_lowercase();
    let tokens = tokenize(&lowered);
    DETECTION_ORDER
        .into_iter()
        .find(|cat| matches_any(cat.patterns(), &lowered, &tokens))
}

fn matches_any(patterns: &[&str], lowered: &str, tokens: &[String]) -> bool {
    patterns.iter().any(|p| {
        if p.contains(' ') {
            lowered.contains(p)
        } else {
            tokens.iter().any(|t| t == p)
        }
    })
}

/// Build the search string for a query.
///
/// Starts from the trimmed, lowercased query and appends content-type keywords,
/// then skill-level keywords, then category search terms, skipping any keyword
/// already present as a whole word. When `topic_category` is `None` the category
/// is detected from the query itself. Re-enhancing the output with the same
/// arguments returns it unchanged.
pub fn enhance_search_query(
    query: &str,
    skill_level: Option<SkillLevel>,
    content_type: Option<ContentType>,
    topic_category: Option<TopicCategory>,
) -> String {
    let base = query.trim().to_lowercase();
    if base.is_empty() {
        return DEFAULT_QUERY.to_string();
    }

    let mut words: Vec<String> = base.split_whitespace().map(str::to_string).collect();
    // punctuation-insensitive view of what the query already says
    let mut present = tokenize(&base);
    let category = topic_category.or_else(|| detect_topic_category(&base));

    let mut append = |keywords: &[&str]| {
        for kw in keywords {
            if !present.iter().any(|t| t == kw) {
                present.push((*kw).to_string());
                words.push((*kw).to_string());
            }
        }
    };

    if let Some(ct) = content_type {
        append(content_type_keywords(ct));
    }
    if let Some(level) = skill_level {
        append(skill_level_keywords(level));
    }
    if let Some(cat) = category {
        append(cat.search_terms());
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_programming_languages() {
        assert_eq!(
            detect_topic_category("Learn Python"),
            Some(TopicCategory::Programming)
        );
        assert_eq!(
            detect_topic_category("modern C++ idioms"),
            Some(TopicCategory::Programming)
        );
    }

    #[test]
    fn test_detect_web_before_programming() {
        // "javascript" is web, even though it is also a programming language
        assert_eq!(
            detect_topic_category("JavaScript closures"),
            Some(TopicCategory::WebDevelopment)
        );
        assert_eq!(
            detect_topic_category("building apps with Node.js"),
            Some(TopicCategory::WebDevelopment)
        );
    }

    #[test]
    fn test_detect_multi_word_patterns() {
        assert_eq!(
            detect_topic_category("Intro to Machine Learning"),
            Some(TopicCategory::DataScience)
        );
        assert_eq!(
            detect_topic_category("setting up GitHub Actions"),
            Some(TopicCategory::Devops)
        );
    }

    #[test]
    fn test_detect_token_not_substring() {
        // "go" must not match inside "google" or "mongo"
        assert_eq!(detect_topic_category("google sheets for mongo fans"), None);
    }

    #[test]
    fn test_detect_none() {
        assert_eq!(detect_topic_category("sourdough baking"), None);
        assert_eq!(detect_topic_category(""), None);
    }

    #[test]
    fn test_enhance_empty_returns_default() {
        assert_eq!(enhance_search_query("   ", None, None, None), DEFAULT_QUERY);
    }

    #[test]
    fn test_enhance_appends_in_order() {
        let q = enhance_search_query(
            "  Rust Ownership ",
            Some(SkillLevel::Beginner),
            Some(ContentType::Tutorial),
            None,
        );
        assert_eq!(
            q,
            "rust ownership tutorial beginner introduction programming code"
        );
    }

    #[test]
    fn test_enhance_skips_present_keywords() {
        let q = enhance_search_query(
            "docker tutorial for beginner",
            Some(SkillLevel::Beginner),
            Some(ContentType::Tutorial),
            None,
        );
        assert_eq!(q, "docker tutorial for beginner introduction devops deployment");
    }

    #[test]
    fn test_enhance_ignores_trailing_punctuation() {
        let q = enhance_search_query("rust tutorial,", None, Some(ContentType::Tutorial), None);
        assert_eq!(q, "rust tutorial, programming code");

        let q = enhance_search_query("(beginner) go", Some(SkillLevel::Beginner), None, None);
        assert_eq!(q.matches("beginner").count(), 1);
    }

    #[test]
    fn test_enhance_explicit_category() {
        let q = enhance_search_query("charts", None, None, Some(TopicCategory::DataScience));
        assert_eq!(q, "charts data science");
    }

    #[test]
    fn test_enhance_unknown_topic_gets_only_type_and_level() {
        let q = enhance_search_query("knitting", Some(SkillLevel::Advanced), Some(ContentType::Video), None);
        assert_eq!(q, "knitting video advanced");
    }

    #[test]
    fn test_enhance_idempotent() {
        let cases = [
            "Learn Python",
            "react hooks",
            "machine learning",
            "kubernetes",
            "",
            "knitting",
            "web",
            "data structures in go",
        ];
        for q in cases {
            let once = enhance_search_query(q, None, None, None);
            let twice = enhance_search_query(&once, None, None, None);
            assert_eq!(once, twice, "not idempotent for {q:?}");

            let once = enhance_search_query(
                q,
                Some(SkillLevel::Intermediate),
                Some(ContentType::Documentation),
                None,
            );
            if !q.trim().is_empty() {
                let twice = enhance_search_query(
                    &once,
                    Some(SkillLevel::Intermediate),
                    Some(ContentType::Documentation),
                    None,
                );
                assert_eq!(once, twice, "not idempotent with options for {q:?}");
            }
        }
    }

    #[test]
    fn test_enhance_no_duplicate_tokens() {
        let q = enhance_search_query(
            "python programming code tutorial",
            Some(SkillLevel::Advanced),
            Some(ContentType::Tutorial),
            None,
        );
        let words: Vec<&str> = q.split(' ').collect();
        let mut unique = words.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(words.len(), unique.len());
    }
}
