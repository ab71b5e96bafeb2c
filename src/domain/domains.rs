// src/domain/domains.rs — Educational domain authority and category table

use serde::{Deserialize, Serialize};

/// Coarse kind of site a domain is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainCategory {
    Documentation,
    Tutorial,
    Academic,
    Community,
    Blog,
    Video,
    News,
}

impl DomainCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Documentation => "documentation",
            Self::Tutorial => "tutorial",
            Self::Academic => "academic",
            Self::Community => "community",
            Self::Blog => "blog",
            Self::Video => "video",
            Self::News => "news",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "documentation" | "docs" => Some(Self::Documentation),
            "tutorial" => Some(Self::Tutorial),
            "academic" => Some(Self::Academic),
            "community" => Some(Self::Community),
            "blog" => Some(Self::Blog),
            "video" => Some(Self::Video),
            "news" => Some(Self::News),
            _ => None,
        }
    }
}

impl std::fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainInfo {
    /// Static trust ranking, 0–100.
    pub authority: u8,
    pub category: DomainCategory,
}

/// Authority assumed for domains missing from the table.
pub const UNKNOWN_DOMAIN_AUTHORITY: u8 = 50;

use DomainCategory::*;

const DOMAINS: &[(&str, u8, DomainCategory)] = &[
    // Official documentation
    ("developer.mozilla.org", 95, Documentation),
    ("docs.python.org", 95, Documentation),
    ("doc.rust-lang.org", 95, Documentation),
    ("react.dev", 92, Documentation),
    ("reactjs.org", 90, Documentation),
    ("vuejs.org", 90, Documentation),
    ("kubernetes.io", 92, Documentation),
    ("docs.docker.com", 90, Documentation),
    ("docs.github.com", 88, Documentation),
    ("learn.microsoft.com", 88, Documentation),
    ("go.dev", 92, Documentation),
    ("typescriptlang.org", 92, Documentation),
    ("pandas.pydata.org", 90, Documentation),
    ("scikit-learn.org", 90, Documentation),
    ("tensorflow.org", 90, Documentation),
    ("pytorch.org", 90, Documentation),
    // Tutorials
    ("freecodecamp.org", 88, Tutorial),
    ("realpython.com", 88, Tutorial),
    ("digitalocean.com", 85, Tutorial),
    ("css-tricks.com", 85, Tutorial),
    ("javascript.info", 88, Tutorial),
    ("geeksforgeeks.org", 78, Tutorial),
    ("w3schools.com", 75, Tutorial),
    ("tutorialspoint.com", 70, Tutorial),
    // Academic
    ("arxiv.org", 92, Academic),
    ("coursera.org", 88, Academic),
    ("khanacademy.org", 88, Academic),
    ("edx.org", 88, Academic),
    ("ocw.mit.edu", 95, Academic),
    ("cs50.harvard.edu", 93, Academic),
    // Community
    ("stackoverflow.com", 85, Community),
    ("github.com", 85, Community),
    ("kaggle.com", 85, Community),
    ("dev.to", 70, Community),
    ("reddit.com", 55, Community),
    // Blogs
    ("smashingmagazine.com", 82, Blog),
    ("martinfowler.com", 90, Blog),
    ("towardsdatascience.com", 78, Blog),
    ("hashnode.com", 65, Blog),
    ("medium.com", 65, Blog),
    // Video
    ("youtube.com", 70, Video),
    ("youtu.be", 70, Video),
    ("vimeo.com", 60, Video),
    // News
    ("infoq.com", 78, News),
    ("thenewstack.io", 75, News),
    ("techcrunch.com", 70, News),
];

/// Lowercase, strip scheme-less `www.` and any trailing dot.
pub fn normalize_domain(domain: &str) -> String {
    let d = domain.trim().trim_end_matches('.').to_lowercase();
    d.strip_prefix("www.").map(str::to_string).unwrap_or(d)
}

/// Look up a domain, matching subdomains of known entries (`blog.github.com` → `github.com`).
pub fn lookup_domain(domain: &str) -> Option<DomainInfo> {
    let d = normalize_domain(domain);
    if d.is_empty() {
        return None;
    }
    DOMAINS
        .iter()
        .find(|(name, _, _)| d == *name || d.ends_with(&format!(".{name}")))
        .map(|(_, authority, category)| DomainInfo {
            authority: *authority,
            category: *category,
        })
}

pub fn domain_authority(domain: &str) -> u8 {
    lookup_domain(domain)
        .map(|i| i.authority)
        .unwrap_or(UNKNOWN_DOMAIN_AUTHORITY)
}

pub fn domain_category(domain: &str) -> Option<DomainCategory> {
    lookup_domain(domain).map(|i| i.category)
}
