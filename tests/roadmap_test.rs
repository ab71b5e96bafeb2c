// tests/roadmap_test.rs — Integration test: roadmap generation with mock completion provider

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use learnpath::curation::SkillLevel;
use learnpath::infra::config::AiConfig;
use learnpath::infra::errors::LearnpathError;
use learnpath::progress::types::MilestoneType;
use learnpath::roadmap::cost::{calculate_cost, TokenUsage};
use learnpath::roadmap::generator::{
    CompletionProvider, CompletionReply, CompletionRequest, RoadmapGenerator,
};
use learnpath::roadmap::types::{Customization, CustomizationRequest, Difficulty, QueryType};

/// A mock provider that returns a canned reply and records the prompts it saw.
struct MockProvider {
    status: u16,
    content: String,
    usage: TokenUsage,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    fn new(status: u16, content: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            content: content.to_string(),
            usage: TokenUsage {
                input_tokens: 1000,
                output_tokens: 500,
            },
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn with_usage(status: u16, content: &str, usage: TokenUsage) -> Arc<Self> {
        Arc::new(Self {
            status,
            content: content.to_string(),
            usage,
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn id(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, LearnpathError> {
        self.prompts.lock().unwrap().push(request.prompt);
        Ok(CompletionReply {
            status: self.status,
            text: self.content.clone(),
            usage: self.usage,
        })
    }
}

/// Fails before any response exists, like a dropped connection.
struct BrokenProvider;

#[async_trait]
impl CompletionProvider for BrokenProvider {
    fn id(&self) -> &str {
        "broken"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionReply, LearnpathError> {
        Err(LearnpathError::Transport("connection refused".into()))
    }
}

fn config(key: Option<&str>) -> AiConfig {
    AiConfig {
        api_key: key.map(String::from),
        api_key_env: "LEARNPATH_TEST_UNSET_KEY".into(),
        ..Default::default()
    }
}

const ROADMAP_REPLY: &str = r#"Here is your roadmap:
```json
{
  "queryType": "project-based",
  "overview": "Learn Rust by building a CLI",
  "totalEstimatedTime": "3 weeks",
  "prerequisites": ["basic programming"],
  "tips": ["Read compiler errors carefully"],
  "milestones": [
    {
      "id": "setup",
      "title": "Set up the toolchain",
      "description": "Install rustup and cargo",
      "difficulty": "beginner",
      "estimatedTime": "1-2 hours",
      "resources": [{"title": "Install Rust", "url": "https://www.rust-lang.org/tools/install", "type": "article"}],
      "skills": ["cargo"]
    },
    {
      "title": "",
      "difficulty": "expert-ish",
      "estimatedTime": "45 minutes",
      "resources": [{"title": "Ownership quiz", "type": "quiz"}, {"url": "https://example.com/untitled"}]
    }
  ]
}
```
Good luck!"#;

#[tokio::test]
async fn test_generate_roadmap_repairs_and_converts() {
    let provider = MockProvider::new(200, ROADMAP_REPLY);
    let generator = RoadmapGenerator::new(provider.clone(), config(Some("test-key")));

    let generated = generator.generate_roadmap("  Rust  ").await.unwrap();
    assert_eq!(provider.calls(), 1);
    assert_eq!(
        provider.prompts.lock().unwrap()[0],
        "Create a learning roadmap for: Rust"
    );

    let roadmap = &generated.roadmap;
    assert_eq!(roadmap.query_type, QueryType::ProjectBased);
    assert_eq!(roadmap.milestones.len(), 2);
    assert_eq!(roadmap.milestones[1].title, "Milestone 2");
    assert_eq!(roadmap.milestones[1].difficulty, Difficulty::Beginner);
    // the untitled resource is dropped
    assert_eq!(roadmap.milestones[1].resources.len(), 1);

    assert_eq!(generated.usage.total_tokens, 1500);
    assert_eq!(
        generated.usage.cost,
        calculate_cost(&generated.usage.model, 1000, 500)
    );

    let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
    let path = generated.into_learning_path(now);
    assert_eq!(path.topic, "Rust");
    assert_eq!(path.milestones[0].estimated_time, 60);
    assert_eq!(path.milestones[0].milestone_type, MilestoneType::Article);
    assert_eq!(path.milestones[1].estimated_time, 45);
    assert_eq!(path.milestones[1].milestone_type, MilestoneType::Quiz);
    assert!(path.milestones.iter().all(|m| !m.completed && m.time_spent == 0));
}

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let cases: [(u16, fn(&LearnpathError) -> bool); 5] = [
        (401, |e| matches!(e, LearnpathError::InvalidCredentials)),
        (402, |e| matches!(e, LearnpathError::QuotaExceeded)),
        (429, |e| matches!(e, LearnpathError::RateLimited)),
        (503, |e| matches!(e, LearnpathError::ServiceUnavailable { status: 503 })),
        (418, |e| matches!(e, LearnpathError::UnexpectedStatus { status: 418, .. })),
    ];

    for (status, expected) in cases {
        let provider = MockProvider::new(status, "error body");
        let generator = RoadmapGenerator::new(provider, config(Some("test-key")));
        let err = generator.generate_roadmap("Rust").await.unwrap_err();
        assert!(expected(&err), "status {status} mapped to {err:?}");
    }
}

#[tokio::test]
async fn test_transport_error_passes_through() {
    let generator = RoadmapGenerator::new(Arc::new(BrokenProvider), config(Some("test-key")));
    let err = generator.generate_roadmap("Rust").await.unwrap_err();
    assert!(matches!(err, LearnpathError::Transport(ref m) if m == "connection refused"));
}

#[tokio::test]
async fn test_reply_without_json_is_parse_error() {
    let provider = MockProvider::new(200, "I cannot produce a roadmap right now.");
    let generator = RoadmapGenerator::new(provider, config(Some("test-key")));
    let err = generator.generate_roadmap("Rust").await.unwrap_err();
    assert!(matches!(err, LearnpathError::Parse(_)));
}

#[tokio::test]
async fn test_unrepairable_roadmap_is_rejected() {
    let provider = MockProvider::new(200, r#"{"milestones": ["just a string"]}"#);
    let generator = RoadmapGenerator::new(provider, config(Some("test-key")));
    match generator.generate_roadmap("Rust").await {
        Err(LearnpathError::InvalidRoadmap { errors }) => {
            assert_eq!(errors, vec!["milestone 0 is not an object".to_string()]);
        }
        other => panic!("expected InvalidRoadmap, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_credentials() {
    let provider = MockProvider::new(200, ROADMAP_REPLY);
    let generator = RoadmapGenerator::new(provider.clone(), config(None));

    let err = generator.generate_roadmap("Rust").await.unwrap_err();
    assert!(matches!(err, LearnpathError::Configuration(_)));

    let request = CustomizationRequest {
        topic: "Rust".into(),
        ..Default::default()
    };
    assert_eq!(
        generator.generate_customization(&request).await,
        Customization::default()
    );
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_customization_success() {
    let provider = MockProvider::new(
        200,
        r#"{"queryType": "skill-enhancement", "learningStyle": "visual", "pace": "fast",
            "focusAreas": ["traits", "lifetimes"], "personalizedTips": ["Pair program"]}"#,
    );
    let generator = RoadmapGenerator::new(provider.clone(), config(Some("test-key")));
    let request = CustomizationRequest {
        topic: "Rust".into(),
        experience_level: Some(SkillLevel::Intermediate),
        goals: vec!["write a web server".into()],
        weekly_hours: Some(5),
        preferred_formats: vec!["video".into()],
    };

    let customization = generator.generate_customization(&request).await;
    assert_eq!(customization.query_type, QueryType::SkillEnhancement);
    assert_eq!(customization.focus_areas, vec!["traits", "lifetimes"]);

    let prompt = provider.prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("Topic: Rust"));
    assert!(prompt.contains("Available time: 5 hours per week"));
}

#[tokio::test]
async fn test_customization_incomplete_reply_falls_back() {
    let provider = MockProvider::new(200, r#"{"pace": "fast"}"#);
    let generator = RoadmapGenerator::new(provider, config(Some("test-key")));
    let request = CustomizationRequest {
        topic: "Rust".into(),
        ..Default::default()
    };
    assert_eq!(
        generator.generate_customization(&request).await,
        Customization::default()
    );
}

#[tokio::test]
async fn test_extreme_token_counts_are_tallied() {
    let usage = TokenUsage {
        input_tokens: u32::MAX,
        output_tokens: 1,
    };
    let provider = MockProvider::with_usage(
        200,
        r#"{"queryType": "hobby-leisure", "learningStyle": "hands-on", "pace": "slow",
            "focusAreas": ["basics"], "personalizedTips": []}"#,
        usage,
    );
    let generator = RoadmapGenerator::new(provider.clone(), config(Some("test-key")));
    let request = CustomizationRequest {
        topic: "Rust".into(),
        ..Default::default()
    };
    let customization = generator.generate_customization(&request).await;
    assert_eq!(customization.focus_areas, vec!["basics"]);
    assert_eq!(provider.calls(), 1);

    let provider = MockProvider::with_usage(200, ROADMAP_REPLY, usage);
    let generator = RoadmapGenerator::new(provider, config(Some("test-key")));
    let generated = generator.generate_roadmap("Rust").await.unwrap();
    assert_eq!(generated.usage.total_tokens, u32::MAX as u64 + 1);
}
