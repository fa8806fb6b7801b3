//! Approximate Gemini pricing, for showing what a generation cost.

use carenote_core::models::usage::{ModelPricing, TokenCount, TokenUsage};

/// (model id prefix, input, output) in USD per million tokens, standard
/// tier. More specific prefixes come first.
const PRICING: &[(&str, f64, f64)] = &[
    ("gemini-2.0-flash-lite", 0.075, 0.30),
    ("gemini-2.0-flash", 0.10, 0.40),
    ("gemini-2.5-flash-lite", 0.10, 0.40),
    ("gemini-2.5-flash", 0.30, 2.50),
    ("gemini-2.5-pro", 1.25, 10.0),
];

pub fn get_pricing(model: &str) -> Option<ModelPricing> {
    let model = model.strip_prefix("models/").unwrap_or(model);
    PRICING
        .iter()
        .find(|(prefix, _, _)| model.starts_with(prefix))
        .map(|&(_, input, output)| ModelPricing {
            input_per_million: input,
            output_per_million: output,
        })
}

/// Token usage for a model, priced when the model is known.
pub fn usage_for(model: &str, tokens: TokenCount) -> TokenUsage {
    match get_pricing(model) {
        Some(pricing) => pricing.price(tokens),
        None => TokenUsage::unpriced(tokens),
    }
}
