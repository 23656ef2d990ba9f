//! Prompt Command
//!
//! Print the system prompt a classification run would send.
//!
//! Usage:
//!   finam-classifier prompt [--train-file PATH] [--few-shot-limit N]

use std::path::{Path, PathBuf};

use crate::ai::FewShotPrompt;
use crate::config::ConfigLoader;
use crate::dataset::read_examples;
use crate::types::Result;

pub fn run(
    config_path: Option<&Path>,
    train_file: Option<PathBuf>,
    few_shot_limit: Option<usize>,
) -> Result<()> {
    let config = ConfigLoader::load(config_path)?;
    let train_file = train_file.unwrap_or(config.run.train_file);
    let limit = few_shot_limit.unwrap_or(config.run.few_shot_limit);

    let examples = read_examples(&train_file)?;
    let prompt = FewShotPrompt::new(limit)
        .with_reference_date(config.run.reference_date)
        .build(&examples);

    println!("{}", prompt);
    Ok(())
}
