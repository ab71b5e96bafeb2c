// src/roadmap/cost.rs — Token cost estimation and usage records

use serde::{Deserialize, Serialize};

/// Token counts reported by the completion collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Widened so that no pair of reported counts can overflow.
    pub fn total(&self) -> u64 {
        self.input_tokens as u64 + self.output_tokens as u64
    }
}

/// Structured record emitted once per generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub topic: String,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u64,
    pub cost: f64,
}

/// Estimated USD cost of one call.
pub fn calculate_cost(model: &str, input_tokens: u32, output_tokens: u32) -> f64 {
    let (input_price, output_price) = model_pricing(model);
    let input_cost = (input_tokens as f64 / 1_000_000.0) * input_price;
    let output_cost = (output_tokens as f64 / 1_000_000.0) * output_price;
    input_cost + output_cost
}

/// Returns (input_price_per_mtok, output_price_per_mtok).
pub fn model_pricing(model: &str) -> (f64, f64) {
    let model = model.to_lowercase();
    match model.as_str() {
        m if m.contains("claude-opus") => (15.0, 75.0),
        m if m.contains("claude-sonnet") => (3.0, 15.0),
        m if m.contains("haiku") => (0.8, 4.0),

        m if m.contains("gpt-4o-mini") => (0.15, 0.6),
        m if m.contains("gpt-4o") => (2.5, 10.0),
        m if m.contains("gpt-4.1-mini") => (0.4, 1.6),
        m if m.contains("gpt-4.1") => (2.0, 8.0),

        m if m.contains("gemini-2.5-pro") => (1.25, 10.0),
        m if m.contains("gemini-2.5-flash") => (0.15, 0.6),

        // Local models
        m if m.contains("llama") || m.contains("mistral") || m.contains("qwen") => (0.0, 0.0),

        _ => (1.0, 3.0),
    }
}

/// Package a usage record and emit it on the `learnpath::usage` target.
pub fn log_usage(topic: &str, model: &str, usage: &TokenUsage) -> UsageRecord {
    let record = UsageRecord {
        topic: topic.to_string(),
        model: model.to_string(),
        input_tokens: usage.input_tokens,
        output_tokens: usage.output_tokens,
        total_tokens: usage.total(),
        cost: calculate_cost(model, usage.input_tokens, usage.output_tokens),
    };

    tracing::info!(
        target: "learnpath::usage",
        topic = %record.topic,
        model = %record.model,
        input_tokens = record.input_tokens,
        output_tokens = record.output_tokens,
        total_tokens = record.total_tokens,
        cost = record.cost,
        "AI usage"
    );
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_calculation() {
        // 1M input at $3 + 1M output at $15
        let cost = calculate_cost("claude-sonnet-4", 1_000_000, 1_000_000);
        assert!((cost - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_model_pricing() {
        assert_eq!(model_pricing("claude-opus-4"), (15.0, 75.0));
        assert_eq!(model_pricing("Claude-Sonnet-4"), (3.0, 15.0));
        assert_eq!(model_pricing("gpt-4o-mini"), (0.15, 0.6));
        assert_eq!(model_pricing("llama3.3"), (0.0, 0.0));
        assert_eq!(model_pricing("unknown-model"), (1.0, 3.0));
    }

    #[test]
    fn test_zero_tokens_cost_nothing() {
        assert_eq!(calculate_cost("claude-opus-4", 0, 0), 0.0);
    }

    #[test]
    fn test_log_usage_record() {
        let usage = TokenUsage {
            input_tokens: 1200,
            output_tokens: 800,
        };
        let record = log_usage("rust", "claude-sonnet-4", &usage);
        assert_eq!(record.topic, "rust");
        assert_eq!(record.total_tokens, 2000);
        let expected = 1200.0 / 1e6 * 3.0 + 800.0 / 1e6 * 15.0;
        assert!((record.cost - expected).abs() < 1e-12);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["inputTokens"], 1200);
        assert_eq!(json["totalTokens"], 2000);
    }

    #[test]
    fn test_log_usage_at_token_limits() {
        let usage = TokenUsage {
            input_tokens: u32::MAX,
            output_tokens: u32::MAX,
        };
        assert_eq!(usage.total(), 2 * u32::MAX as u64);

        let record = log_usage("rust", "claude-opus-4", &usage);
        assert_eq!(record.total_tokens, 8_589_934_590);
        assert!(record.cost.is_finite());
        assert!(record.cost > 0.0);
    }
}
