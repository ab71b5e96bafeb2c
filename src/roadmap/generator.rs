// src/roadmap/generator.rs — Roadmap and customization generation over an AI collaborator

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cost::{log_usage, TokenUsage, UsageRecord};
use super::extract::parse_json_object;
use super::prompts;
use super::types::{Customization, CustomizationRequest, RoadmapData};
use super::validate::{validate_customization, validate_roadmap, RoadmapValidation};
use crate::infra::config::AiConfig;
use crate::infra::errors::LearnpathError;
use crate::progress::types::LearningPath;

/// Text-completion collaborator. Transport, auth headers and retries live behind it.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn id(&self) -> &str;

    /// Returns the raw status and body. Network-level failures are `Err`.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, LearnpathError>;
}

#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub model: String,
    pub api_key: String,
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Default)]
pub struct CompletionReply {
    pub status: u16,
    pub text: String,
    pub usage: TokenUsage,
}

/// States of one roadmap generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Requesting,
    ParsingResponse,
    Validating,
    Success,
    Failed,
}

impl GenerationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requesting => "requesting",
            Self::ParsingResponse => "parsing_response",
            Self::Validating => "validating",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

/// A validated roadmap plus the usage record for the call that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRoadmap {
    pub id: String,
    pub topic: String,
    pub roadmap: RoadmapData,
    pub usage: UsageRecord,
}

impl GeneratedRoadmap {
    pub fn into_learning_path(self, now: DateTime<Utc>) -> LearningPath {
        self.roadmap.into_learning_path(self.id, &self.topic, now)
    }
}

pub struct RoadmapGenerator {
    provider: Arc<dyn CompletionProvider>,
    config: AiConfig,
}

impl RoadmapGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: AiConfig) -> Self {
        Self { provider, config }
    }

    /// Generate a roadmap for `topic`.
    ///
    /// Every failure is surfaced: missing credentials (before any call),
    /// status-mapped errors, transport errors, parse errors and unrepairable
    /// payloads.
    pub async fn generate_roadmap(&self, topic: &str) -> Result<GeneratedRoadmap, LearnpathError> {
        let result = self.run_roadmap(topic).await;
        match &result {
            Ok(generated) => {
                enter(GenerationPhase::Success, topic);
                tracing::info!(
                    topic,
                    milestones = generated.roadmap.milestones.len(),
                    "Roadmap generated"
                );
            }
            Err(e) => {
                enter(GenerationPhase::Failed, topic);
                tracing::warn!(topic, error = %e, "Roadmap generation failed");
            }
        }
        result
    }

    async fn run_roadmap(&self, topic: &str) -> Result<GeneratedRoadmap, LearnpathError> {
        let api_key = self.api_key()?;

        enter(GenerationPhase::Requesting, topic);
        let request = self.request(
            api_key,
            prompts::roadmap_system_prompt(),
            prompts::roadmap_user_prompt(topic),
        );
        let reply = self.call(request).await?;
        let usage = log_usage(topic, &self.config.model, &reply.usage);

        enter(GenerationPhase::ParsingResponse, topic);
        let value = parse_json_object(&reply.text)?;

        enter(GenerationPhase::Validating, topic);
        match validate_roadmap(&value, topic) {
            RoadmapValidation::Valid(roadmap) => Ok(GeneratedRoadmap {
                id: uuid::Uuid::new_v4().to_string(),
                topic: topic.trim().to_string(),
                roadmap,
                usage,
            }),
            RoadmapValidation::Invalid(errors) => Err(LearnpathError::InvalidRoadmap { errors }),
        }
    }

    /// Suggest a customization. Never fails: any error yields `Customization::default()`.
    pub async fn generate_customization(&self, request: &CustomizationRequest) -> Customization {
        match self.run_customization(request).await {
            Ok(customization) => customization,
            Err(e) => {
                tracing::warn!(topic = %request.topic, error = %e, "Using default customization");
                Customization::default()
            }
        }
    }

    async fn run_customization(
        &self,
        request: &CustomizationRequest,
    ) -> Result<Customization, LearnpathError> {
        let api_key = self.api_key()?;
        let completion = self.request(
            api_key,
            prompts::customization_system_prompt(),
            prompts::customization_user_prompt(request),
        );
        let reply = self.call(completion).await?;
        log_usage(&request.topic, &self.config.model, &reply.usage);

        let value = parse_json_object(&reply.text)?;
        validate_customization(&value)
            .ok_or_else(|| LearnpathError::Parse("customization is missing required fields".into()))
    }

    fn api_key(&self) -> Result<String, LearnpathError> {
        self.config.resolve_api_key().ok_or_else(|| {
            LearnpathError::Configuration(format!(
                "no AI API key configured (set ai.api_key or ${})",
                self.config.api_key_env
            ))
        })
    }

    fn request(&self, api_key: String, system: String, prompt: String) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            api_key,
            system,
            prompt,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    async fn call(&self, request: CompletionRequest) -> Result<CompletionReply, LearnpathError> {
        let reply = self.provider.complete(request).await?;
        if !(200..300).contains(&reply.status) {
            let err = LearnpathError::from_status(reply.status, &reply.text);
            tracing::warn!(provider = self.provider.id(), status = reply.status, error = %err, "AI call rejected");
            return Err(err);
        }
        Ok(reply)
    }
}

fn enter(phase: GenerationPhase, topic: &str) {
    tracing::debug!(phase = phase.as_str(), topic, "Roadmap generation");
}
