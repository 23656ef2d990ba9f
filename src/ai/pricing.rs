//! Model Pricing
//!
//! Static price table used to turn token usage into USD. Prices are per
//! million tokens, quoted separately for the prompt and completion legs.
//! Unknown model ids fall back to `DEFAULT_PRICING`.

use super::provider::TokenUsage;

/// USD per million tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub prompt_per_million: f64,
    pub completion_per_million: f64,
}

impl ModelPricing {
    pub const fn new(prompt_per_million: f64, completion_per_million: f64) -> Self {
        Self {
            prompt_per_million,
            completion_per_million,
        }
    }

    /// Cost of one call in USD
    pub fn cost(&self, usage: &TokenUsage) -> f64 {
        let prompt = usage.prompt_tokens as f64 / 1_000_000.0 * self.prompt_per_million;
        let completion =
            usage.completion_tokens as f64 / 1_000_000.0 * self.completion_per_million;
        prompt + completion
    }
}

pub const DEFAULT_PRICING: ModelPricing = ModelPricing::new(0.10, 0.40);

const PRICE_TABLE: &[(&str, ModelPricing)] = &[
    ("openai/gpt-4o-mini", ModelPricing::new(0.15, 0.60)),
    ("openai/gpt-4o", ModelPricing::new(2.50, 10.00)),
    ("google/gemini-2.5-flash", ModelPricing::new(0.10, 0.40)),
    ("anthropic/claude-3-sonnet", ModelPricing::new(3.00, 15.00)),
    ("anthropic/claude-3-haiku", ModelPricing::new(0.25, 1.25)),
];

/// Look up the price entry for a model id
pub fn pricing_for(model: &str) -> ModelPricing {
    PRICE_TABLE
        .iter()
        .find(|(id, _)| *id == model)
        .map(|(_, pricing)| *pricing)
        .unwrap_or(DEFAULT_PRICING)
}

/// Whether `model` has its own entry in the price table
pub fn is_known_model(model: &str) -> bool {
    PRICE_TABLE.iter().any(|(id, _)| *id == model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpt_4o_mini_cost() {
        let pricing = pricing_for("openai/gpt-4o-mini");
        assert_eq!(pricing, ModelPricing::new(0.15, 0.60));

        let cost = pricing.cost(&TokenUsage::new(1000, 500));
        assert!((cost - 0.00045).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_model_uses_default() {
        assert!(!is_known_model("mistral/tiny"));
        assert_eq!(pricing_for("mistral/tiny"), DEFAULT_PRICING);
    }

    #[test]
    fn test_zero_usage_costs_nothing() {
        for (id, _) in PRICE_TABLE {
            assert_eq!(pricing_for(id).cost(&TokenUsage::default()), 0.0);
        }
    }

    #[test]
    fn test_completion_leg_priced_independently() {
        let pricing = pricing_for("anthropic/claude-3-sonnet");
        let cost = pricing.cost(&TokenUsage::new(0, 1_000_000));
        assert!((cost - 15.0).abs() < 1e-9);
    }
}
