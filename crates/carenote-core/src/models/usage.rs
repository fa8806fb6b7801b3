use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Tokens reported by the provider for one generation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TokenCount {
    /// Prompt tokens, including attached audio and documents.
    pub input: u64,
    pub output: u64,
}

impl TokenCount {
    pub fn total(&self) -> u64 {
        self.input + self.output
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TokenUsage {
    pub tokens: TokenCount,
    /// Approximate; zero when the model's pricing is unknown.
    pub cost_usd: f64,
}

impl TokenUsage {
    pub fn unpriced(tokens: TokenCount) -> Self {
        Self {
            tokens,
            cost_usd: 0.0,
        }
    }
}

/// USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl ModelPricing {
    pub fn price(&self, tokens: TokenCount) -> TokenUsage {
        let per_token = |per_million: f64| per_million / 1_000_000.0;
        TokenUsage {
            tokens,
            cost_usd: tokens.input as f64 * per_token(self.input_per_million)
                + tokens.output as f64 * per_token(self.output_per_million),
        }
    }
}
