//! AI Integration Layer
//!
//! Chat-completion provider, prompt construction, pricing and run metrics.

pub mod metrics;
pub mod pricing;
pub mod prompt;
pub mod provider;
pub mod timeout;

pub use metrics::{
    MethodShare, MetricsCollector, MetricsSummary, SharedMetrics, create_shared_metrics,
};
pub use pricing::{DEFAULT_PRICING, ModelPricing, is_known_model, pricing_for};
pub use prompt::{FewShotPrompt, PromptBuilder, PromptSection, build_system_prompt, user_turn};
pub use provider::{
    LlmProvider, LlmResponse, OpenAiProvider, ResponseTiming, SharedProvider, TokenUsage,
    create_provider,
};
pub use timeout::{TimeoutConfig, with_timeout};
