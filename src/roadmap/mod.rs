// src/roadmap/mod.rs — AI roadmap generation, repair and cost accounting

pub mod cost;
pub mod extract;
pub mod generator;
pub mod prompts;
pub mod types;
pub mod validate;

pub use cost::{calculate_cost, log_usage, model_pricing, TokenUsage, UsageRecord};
pub use extract::{extract_json_object, parse_json_object};
pub use generator::{
    CompletionProvider, CompletionReply, CompletionRequest, GeneratedRoadmap, GenerationPhase,
    RoadmapGenerator,
};
pub use types::{Customization, CustomizationRequest, Difficulty, QueryType, RoadmapData};
pub use validate::{validate_roadmap, RoadmapValidation};
