//! Configuration Loader (Figment-based)
//!
//! Merges, in order:
//! 1. Built-in defaults (Serialized)
//! 2. TOML file, explicit or `./finam-classifier.toml`
//! 3. `FINAM_CLASSIFIER_*` environment (`__` separates sections)
//! 4. `OPENROUTER_API_KEY`, `OPENROUTER_BASE_URL`, `OPENROUTER_MODEL`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Config;
use crate::types::{ClassifierError, Result};

pub const CONFIG_FILE_NAME: &str = "finam-classifier.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate. An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config: Config = Self::figment(path)?
            .extract()
            .map_err(|e| ClassifierError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        match path {
            Some(path) if !path.exists() => {
                return Err(ClassifierError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => {
                debug!("Loading config from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    debug!("Loading config from: {}", default_path.display());
                    figment = figment.merge(Toml::file(default_path));
                }
            }
        }

        // FINAM_CLASSIFIER_RUN__BATCH_SIZE -> run.batch_size
        figment = figment
            .merge(Env::prefixed("FINAM_CLASSIFIER_").split("__"))
            .merge(
                Env::prefixed("OPENROUTER_")
                    .only(&["api_key", "base_url", "model"])
                    .map(|key| format!("llm.{}", key).into()),
            );

        Ok(figment)
    }

    pub fn default_config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Effective configuration as TOML or JSON; the API key is never included
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| ClassifierError::Config(e.to_string()))
        }
    }
}
