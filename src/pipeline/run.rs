//! End-to-end classification run: read datasets, build the prompt once,
//! schedule every question, write the submission file.

use std::sync::Arc;

use tracing::info;

use super::classifier::Classifier;
use super::scheduler::BatchScheduler;
use crate::ai::{
    FewShotPrompt, MetricsSummary, SharedProvider, TimeoutConfig, create_shared_metrics,
};
use crate::cli::progress::ProgressTracker;
use crate::config::Config;
use crate::dataset::{read_examples, read_questions, write_results};
use crate::types::{Result, ResultRecord, RunId};

/// Outcome of a completed run
#[derive(Debug)]
pub struct RunReport {
    pub records: Vec<ResultRecord>,
    pub summary: MetricsSummary,
}

/// Run-level failures (unreadable input, unwritable output) are the only errors returned
pub async fn run_classification(
    config: &Config,
    provider: SharedProvider,
    progress: Option<ProgressTracker>,
) -> Result<RunReport> {
    let run_id = RunId::generate();
    info!("Run {} using {} ({})", run_id, provider.model(), provider.name());

    let examples = read_examples(&config.run.train_file)?;
    let mut questions = read_questions(&config.run.test_file)?;
    if let Some(limit) = config.run.question_limit() {
        questions.truncate(limit);
    }

    let system_prompt = FewShotPrompt::new(config.run.few_shot_limit)
        .with_reference_date(config.run.reference_date)
        .build(&examples);
    info!(
        "System prompt: {} chars, {} of {} examples",
        system_prompt.len(),
        examples.len().min(config.run.few_shot_limit),
        examples.len()
    );

    let classifier = Arc::new(Classifier::new(
        provider,
        system_prompt,
        TimeoutConfig::from_secs(config.llm.timeout_secs).llm_request,
    ));
    let metrics = create_shared_metrics(run_id);

    let mut scheduler = BatchScheduler::new(classifier, config.run.batch_size, Arc::clone(&metrics))?
        .with_debug(config.run.debug);
    if let Some(tracker) = progress {
        scheduler = scheduler.with_progress(tracker);
    }

    let records = scheduler.run(&questions).await;
    write_results(&config.run.output_file, &records)?;

    Ok(RunReport {
        records,
        summary: metrics.summary(),
    })
}
