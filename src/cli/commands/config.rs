//! Config Command
//!
//! Usage:
//!   finam-classifier config show [-f json]
//!   finam-classifier config path

use std::path::Path;

use crate::config::ConfigLoader;
use crate::types::{ClassifierError, Result};

/// Print the effective configuration (API key omitted)
pub fn show(config_path: Option<&Path>, format: &str) -> Result<()> {
    let as_json = match format {
        "json" => true,
        "text" | "toml" => false,
        other => {
            return Err(ClassifierError::Config(format!(
                "Unknown format: {}. Valid values: text, json",
                other
            )));
        }
    };

    let config = ConfigLoader::load(config_path)?;
    println!("{}", ConfigLoader::render(&config, as_json)?);
    Ok(())
}

/// Show which config file would be loaded
pub fn path(config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(ConfigLoader::default_config_path);
    let exists = if path.exists() { "✓" } else { "✗" };
    println!("Configuration file: {} {}", exists, path.display());
    println!("Environment: FINAM_CLASSIFIER_<SECTION>__<KEY>, OPENROUTER_API_KEY");
    Ok(())
}
