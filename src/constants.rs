//! Global Constants
//!
//! Centralized defaults for the classification run.
//! All magic numbers should be defined here with documentation.

/// Classification constants
pub mod classify {
    /// Path returned (with GET) whenever a question cannot be classified
    pub const FALLBACK_PATH: &str = "/v1/assets";

    /// Number of training examples rendered into the system prompt
    pub const DEFAULT_FEW_SHOT_LIMIT: usize = 15;

    /// Questions classified concurrently within one group
    pub const DEFAULT_BATCH_SIZE: usize = 15;
}

/// LLM provider constants
pub mod llm {
    /// OpenAI-compatible endpoint used by default (OpenRouter)
    pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

    /// Model used when none is configured
    pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

    /// Deterministic decoding
    pub const DEFAULT_TEMPERATURE: f32 = 0.0;
}

/// HTTP/Network constants
pub mod network {
    /// Ceiling for a single classification request (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
}

/// Dataset file constants
pub mod dataset {
    /// Field delimiter shared by the train, test and submission files
    pub const DELIMITER: u8 = b';';

    pub const DEFAULT_TEST_FILE: &str = "./test.csv";
    pub const DEFAULT_TRAIN_FILE: &str = "./train.csv";
    pub const DEFAULT_OUTPUT_FILE: &str = "submission.csv";
}
