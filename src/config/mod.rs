//! Configuration Management
//!
//! Hierarchical resolution, lowest to highest priority:
//! 1. Built-in defaults
//! 2. TOML file (`finam-classifier.toml` or `--config`)
//! 3. Environment variables (`FINAM_CLASSIFIER_*`, `OPENROUTER_*`)
//! 4. CLI arguments

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::*;
