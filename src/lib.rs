//! Finam Classifier - Few-shot Question-to-Endpoint Classification
//!
//! Maps natural-language questions about a brokerage account to the single
//! Finam Trade API call (`METHOD /path`) that answers them, by asking a hosted
//! chat model with a few-shot prompt.
//!
//! ## Core Features
//!
//! - **Fail-soft classification**: every question gets a descriptor; faults
//!   degrade to `GET /v1/assets` at zero cost
//! - **Grouped concurrency**: groups run in sequence, members in parallel,
//!   results keep input order
//! - **Cost accounting**: per-call pricing from token usage, aggregated across tasks
//!
//! ## Quick Start
//!
//! ```ignore
//! use finam_classifier::{Config, ConfigLoader, create_provider, run_classification};
//!
//! let config = ConfigLoader::load(None)?;
//! let provider = create_provider(&config.llm)?;
//! let report = run_classification(&config, provider, None).await?;
//! println!("{}", report.summary.display());
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: chat provider, prompt construction, pricing, metrics
//! - [`pipeline`]: response parsing, classifier client, batch scheduler
//! - [`dataset`]: `;`-delimited question, example and submission files
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod pipeline;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{Config, ConfigLoader, LlmConfig, RunConfig};

pub use types::{
    CallDescriptor, ClassifierError, Example, HttpMethod, Question, Result, ResultExt,
    ResultRecord, RunId,
};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use pipeline::{
    BatchScheduler, Classification, Classifier, Outcome, RunReport, parse_response,
    run_classification,
};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{
    FewShotPrompt, LlmProvider, LlmResponse, MetricsCollector, MetricsSummary, ModelPricing,
    OpenAiProvider, SharedMetrics, SharedProvider, TokenUsage, create_provider, pricing_for,
};
