//! Classify Command
//!
//! Usage:
//!   finam-classifier classify [--test-file PATH] [--output-file PATH]
//!                             [--train-file PATH] [--limit N] [--batch-size N]
//!                             [--model ID] [--debug]

use std::path::{Path, PathBuf};

use tokio::runtime::Runtime;

use crate::ai::create_provider;
use crate::cli::logging::{LogFilterHandle, QuietLogs};
use crate::cli::progress::{ConsoleRenderer, ProgressTracker};
use crate::cli::ui::Output;
use crate::config::{Config, ConfigLoader};
use crate::pipeline::run_classification;
use crate::types::Result;

/// CLI overrides; `None` keeps the configured value
#[derive(Debug, Default, Clone)]
pub struct ClassifyOptions {
    pub test_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub train_file: Option<PathBuf>,
    pub limit: Option<usize>,
    pub batch_size: Option<usize>,
    pub model: Option<String>,
    pub debug: bool,
    pub show_progress: bool,
}

impl ClassifyOptions {
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.test_file {
            config.run.test_file = path.clone();
        }
        if let Some(path) = &self.output_file {
            config.run.output_file = path.clone();
        }
        if let Some(path) = &self.train_file {
            config.run.train_file = path.clone();
        }
        if self.limit.is_some() {
            config.run.limit = self.limit;
        }
        if let Some(batch_size) = self.batch_size {
            config.run.batch_size = batch_size;
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        config.run.debug |= self.debug;
    }
}

/// `log_filter` is raised to `warn` while the progress bar is drawn
pub fn run(
    config_path: Option<&Path>,
    options: ClassifyOptions,
    log_filter: Option<LogFilterHandle>,
) -> Result<()> {
    let mut config = ConfigLoader::load(config_path)?;
    options.apply(&mut config);
    config.validate()?;

    let output = Output::new();
    output.header("Finam Trade API classification");
    output.field("Model", &config.llm.model);
    output.field("Questions", config.run.test_file.display());
    output.field("Examples", config.run.train_file.display());
    output.field("Batch size", config.run.batch_size);
    if let Some(limit) = config.run.question_limit() {
        output.field("Limit", limit);
    }

    let provider = create_provider(&config.llm)?;
    let tracker = (options.show_progress && !config.run.debug).then(ProgressTracker::new);

    let rt = Runtime::new()?;
    let result = rt.block_on(async {
        let quiet_logs = tracker.as_ref().and(log_filter).map(QuietLogs::new);
        let render = tracker
            .clone()
            .map(|t| ConsoleRenderer::new(t).start_render_loop());

        let result = run_classification(&config, provider, tracker.clone()).await;

        if let Some(tracker) = &tracker {
            tracker.finish();
        }
        if let Some(handle) = render {
            let _ = handle.await;
        }
        drop(quiet_logs);
        result
    });

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            output.error(&e.to_string());
            return Err(e);
        }
    };

    if report.summary.faults > 0 {
        output.warning(&format!(
            "{} questions fell back to the default call",
            report.summary.faults
        ));
    }
    output.success(&format!(
        "Wrote {} results to {}",
        report.records.len(),
        config.run.output_file.display()
    ));
    output.summary(&report.summary);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_override_config() {
        let mut config = Config::default();
        let options = ClassifyOptions {
            test_file: Some(PathBuf::from("data/q.csv")),
            batch_size: Some(4),
            limit: Some(10),
            model: Some("openai/gpt-4o".to_string()),
            debug: true,
            ..ClassifyOptions::default()
        };

        options.apply(&mut config);

        assert_eq!(config.run.test_file, PathBuf::from("data/q.csv"));
        assert_eq!(config.run.batch_size, 4);
        assert_eq!(config.run.limit, Some(10));
        assert_eq!(config.llm.model, "openai/gpt-4o");
        assert!(config.run.debug);
        // untouched
        assert_eq!(config.run.output_file, PathBuf::from("submission.csv"));
    }

    #[test]
    fn test_empty_options_keep_config() {
        let mut config = Config::default();
        config.run.limit = Some(3);
        config.run.debug = true;

        ClassifyOptions::default().apply(&mut config);

        assert_eq!(config.run.limit, Some(3));
        assert!(config.run.debug);
    }
}
