//! Configuration Types
//!
//! All configuration structures with defaults matching a stock OpenRouter run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{classify, dataset, llm, network};
use crate::types::{ClassifierError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text-generation endpoint settings
    pub llm: LlmConfig,

    /// Input/output files and batching
    pub run: RunConfig,
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `ClassifierError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ClassifierError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(ClassifierError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        url::Url::parse(&self.llm.base_url).map_err(|e| {
            ClassifierError::Config(format!("Invalid llm.base_url {:?}: {}", self.llm.base_url, e))
        })?;

        if self.llm.model.trim().is_empty() {
            return Err(ClassifierError::Config("LLM model must not be empty".to_string()));
        }

        if self.run.batch_size == 0 {
            return Err(ClassifierError::Config(
                "run.batch_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible base URL; `/chat/completions` is appended
    pub base_url: String,

    pub model: String,

    /// Falls back to `OPENROUTER_API_KEY` when unset. Never serialized.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Per-request ceiling in seconds
    pub timeout_secs: u64,

    pub temperature: f32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: llm::DEFAULT_BASE_URL.to_string(),
            model: llm::DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: llm::DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

// =============================================================================
// Run Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Questions to classify (`uid;question`)
    pub test_file: PathBuf,

    /// Labelled examples (`question;type;request`)
    pub train_file: PathBuf,

    /// Submission file (`uid;type;request`)
    pub output_file: PathBuf,

    /// Questions classified concurrently per group
    pub batch_size: usize,

    /// Classify only the first N questions; 0 means no limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Training examples rendered into the system prompt
    pub few_shot_limit: usize,

    /// "Today" as stated in the system prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,

    /// Log every group's questions and answers
    pub debug: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            test_file: PathBuf::from(dataset::DEFAULT_TEST_FILE),
            train_file: PathBuf::from(dataset::DEFAULT_TRAIN_FILE),
            output_file: PathBuf::from(dataset::DEFAULT_OUTPUT_FILE),
            batch_size: classify::DEFAULT_BATCH_SIZE,
            limit: None,
            few_shot_limit: classify::DEFAULT_FEW_SHOT_LIMIT,
            reference_date: None,
            debug: false,
        }
    }
}

impl RunConfig {
    /// Effective question limit; `Some(0)` is treated as unset
    pub fn question_limit(&self) -> Option<usize> {
        self.limit.filter(|&n| n > 0)
    }
}

// =============================================================================
// Tests
// =============================================================================
