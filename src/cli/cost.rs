// src/cli/cost.rs — Estimate the cost of an AI call

use crate::infra::config::Config;
use crate::roadmap::cost::{calculate_cost, model_pricing};

pub fn run_cost(
    input_tokens: u32,
    output_tokens: u32,
    model: Option<&str>,
    config: &Config,
) -> anyhow::Result<()> {
    let model = model.unwrap_or(&config.ai.model);
    let (input_price, output_price) = model_pricing(model);
    let cost = calculate_cost(model, input_tokens, output_tokens);

    println!("Model:  {model} (${input_price}/M in, ${output_price}/M out)");
    println!(
        "Tokens: {} in + {} out = {}",
        input_tokens,
        output_tokens,
        input_tokens as u64 + output_tokens as u64
    );
    println!("Cost:   ${cost:.4}");
    Ok(())
}
