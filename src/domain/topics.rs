// src/domain/topics.rs — Topic category pattern tables

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicCategory {
    Programming,
    WebDevelopment,
    DataScience,
    Devops,
}

/// Detection order. More specific categories come before the catch-all `Programming`.
pub const DETECTION_ORDER: [TopicCategory; 4] = [
    TopicCategory::WebDevelopment,
    TopicCategory::DataScience,
    TopicCategory::Devops,
    TopicCategory::Programming,
];

impl TopicCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Programming => "programming",
            Self::WebDevelopment => "web_development",
            Self::DataScience => "data_science",
            Self::Devops => "devops",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "programming" => Some(Self::Programming),
            "web_development" | "web" => Some(Self::WebDevelopment),
            "data_science" | "data" => Some(Self::DataScience),
            "devops" => Some(Self::Devops),
            _ => None,
        }
    }

    /// Match patterns. Entries with a space match as substrings, the rest as whole tokens.
    pub fn patterns(&self) -> &'static [&'static str] {
        match self {
            Self::WebDevelopment => &[
                "web development",
                "web design",
                "web",
                "html",
                "css",
                "javascript",
                "typescript",
                "react",
                "vue",
                "angular",
                "svelte",
                "next.js",
                "node.js",
                "nodejs",
                "frontend",
                "backend",
                "tailwind",
                "webpack",
                "dom",
            ],
            Self::DataScience => &[
                "data science",
                "machine learning",
                "deep learning",
                "data analysis",
                "neural network",
                "computer vision",
                "natural language processing",
                "ml",
                "ai",
                "nlp",
                "pandas",
                "numpy",
                "tensorflow",
                "pytorch",
                "scikit-learn",
                "jupyter",
                "statistics",
            ],
            Self::Devops => &[
                "ci/cd",
                "github actions",
                "devops",
                "docker",
                "kubernetes",
                "k8s",
                "terraform",
                "ansible",
                "jenkins",
                "cicd",
                "aws",
                "azure",
                "gcp",
                "helm",
                "nginx",
                "linux",
                "iac",
            ],
            Self::Programming => &[
                "data structures",
                "programming",
                "coding",
                "python",
                "java",
                "rust",
                "go",
                "golang",
                "c",
                "c++",
                "c#",
                "ruby",
                "kotlin",
                "swift",
                "php",
                "scala",
                "haskell",
                "algorithms",
            ],
        }
    }

    /// Terms appended to search queries for this category. None of them may match
    /// a pattern of a category earlier in `DETECTION_ORDER`.
    pub fn search_terms(&self) -> &'static [&'static str] {
        match self {
            Self::Programming => &["programming", "code"],
            Self::WebDevelopment => &["web", "development"],
            Self::DataScience => &["data", "science"],
            Self::Devops => &["devops", "deployment"],
        }
    }

    /// Domain jargon that signals an article is on-topic for this category.
    pub fn specialty_keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Programming => &[
                "algorithm",
                "syntax",
                "function",
                "compiler",
                "debugging",
                "recursion",
                "oop",
            ],
            Self::WebDevelopment => &[
                "responsive",
                "component",
                "browser",
                "accessibility",
                "api",
                "frontend",
                "backend",
            ],
            Self::DataScience => &[
                "model",
                "dataset",
                "regression",
                "classification",
                "visualization",
                "statistics",
                "training",
            ],
            Self::Devops => &[
                "pipeline",
                "container",
                "deployment",
                "monitoring",
                "infrastructure",
                "cloud",
                "orchestration",
            ],
        }
    }
}

impl std::fmt::Display for TopicCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
