//! Batch Scheduler
//!
//! Splits the question list into contiguous groups of `batch_size`. Groups
//! run one after another; members of a group run concurrently, one task per
//! question. Results are collected by position, so output order always
//! matches input order regardless of which call finishes first.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::classifier::{Classification, Classifier, Outcome};
use crate::ai::SharedMetrics;
use crate::cli::progress::ProgressTracker;
use crate::types::{ClassifierError, Question, Result, ResultRecord};

pub struct BatchScheduler {
    classifier: Arc<Classifier>,
    batch_size: usize,
    metrics: SharedMetrics,
    progress: Option<ProgressTracker>,
    debug: bool,
}

impl BatchScheduler {
    /// `batch_size` bounds the number of outstanding calls and must be positive
    pub fn new(
        classifier: Arc<Classifier>,
        batch_size: usize,
        metrics: SharedMetrics,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(ClassifierError::Config(
                "batch_size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            classifier,
            batch_size,
            metrics,
            progress: None,
            debug: false,
        })
    }

    pub fn with_progress(mut self, tracker: ProgressTracker) -> Self {
        self.progress = Some(tracker);
        self
    }

    /// Log every group's questions and answers at info level
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of groups `n` questions split into
    pub fn group_count(&self, n: usize) -> usize {
        n.div_ceil(self.batch_size)
    }

    /// Classify every question; one record per question, in input order
    pub async fn run(&self, questions: &[Question]) -> Vec<ResultRecord> {
        let total_groups = self.group_count(questions.len());
        info!(
            "Classifying {} questions in {} groups of up to {}",
            questions.len(),
            total_groups,
            self.batch_size
        );

        if let Some(progress) = &self.progress {
            progress.start(questions.len(), total_groups);
        }

        let mut records = Vec::with_capacity(questions.len());

        for (index, group) in questions.chunks(self.batch_size).enumerate() {
            self.trace(format_args!(
                "Group {}/{} ({} questions)",
                index + 1,
                total_groups,
                group.len()
            ));
            for question in group {
                self.trace(format_args!("  [{}] {}", question.uid, question.question));
            }
            if let Some(progress) = &self.progress {
                progress.start_group(index + 1);
            }

            let classifications = self.run_group(group).await;

            let mut faults = 0;
            for (question, classification) in group.iter().zip(classifications) {
                self.record(&classification);
                if classification.outcome == Outcome::Faulted {
                    faults += 1;
                }
                self.trace(format_args!("  [{}] -> {}", question.uid, classification.descriptor));
                records.push(ResultRecord::new(question, classification.descriptor));
            }

            if let Some(progress) = &self.progress {
                progress.complete_group(records.len(), faults);
            }
        }

        records
    }

    /// Classify one group concurrently. The returned vector is aligned with `group`.
    async fn run_group(&self, group: &[Question]) -> Vec<Classification> {
        let handles = group.iter().cloned().map(|question| {
            let classifier = Arc::clone(&self.classifier);
            tokio::spawn(async move { classifier.classify(&question).await })
        });

        join_all(handles)
            .await
            .into_iter()
            .zip(group)
            .map(|(joined, question)| match joined {
                Ok(classification) => classification,
                Err(e) => {
                    warn!("Classification task for {} failed: {}", question.uid, e);
                    Classification::fallback()
                }
            })
            .collect()
    }

    fn trace(&self, message: std::fmt::Arguments<'_>) {
        if self.debug {
            info!("{}", message);
        } else {
            debug!("{}", message);
        }
    }

    fn record(&self, classification: &Classification) {
        self.metrics.record_cost(classification.cost);
        self.metrics.record_method(classification.descriptor.method);
        match classification.outcome {
            Outcome::Faulted => self.metrics.record_fault(),
            Outcome::Parsed | Outcome::Unparsed => self
                .metrics
                .record_call(&classification.usage, classification.latency_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{LlmProvider, LlmResponse, MetricsCollector, SharedProvider, TokenUsage};
    use crate::types::{CallDescriptor, HttpMethod, RunId};
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers `GET /v1/echo/<question>` after a delay that shrinks with position,
    /// so later questions in a group finish first.
    struct EchoProvider {
        failing: HashSet<String>,
        panicking: HashSet<String>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl EchoProvider {
        fn new() -> Self {
            Self {
                failing: HashSet::new(),
                panicking: HashSet::new(),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }

        fn failing_on(mut self, text: &str) -> Self {
            self.failing.insert(format!("Question: {text}\nAnswer:"));
            self
        }

        fn panicking_on(mut self, text: &str) -> Self {
            self.panicking.insert(format!("Question: {text}\nAnswer:"));
            self
        }
    }

    #[async_trait]
    impl LlmProvider for EchoProvider {
        async fn complete(&self, _system: &str, user: &str) -> Result<LlmResponse> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let text = user
                .trim_start_matches("Question: ")
                .trim_end_matches("\nAnswer:")
                .to_string();
            let delay = 30u64.saturating_sub(text.len() as u64 % 30);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.panicking.contains(user) {
                panic!("provider blew up");
            }
            if self.failing.contains(user) {
                return Err(ClassifierError::LlmApi("API error (500)".to_string()));
            }
            Ok(LlmResponse::content_only(format!("GET /v1/echo/{text}"))
                .with_usage(TokenUsage::new(1000, 500)))
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "openai/gpt-4o-mini"
        }
    }

    fn scheduler(provider: Arc<EchoProvider>, batch_size: usize) -> (BatchScheduler, SharedMetrics) {
        let shared: SharedProvider = provider;
        let classifier = Arc::new(Classifier::new(shared, "rules", Duration::from_secs(2)));
        let metrics = Arc::new(MetricsCollector::new(RunId::from("sched")));
        let scheduler = BatchScheduler::new(classifier, batch_size, Arc::clone(&metrics)).unwrap();
        (scheduler, metrics)
    }

    fn questions(n: usize) -> Vec<Question> {
        (1..=n)
            .map(|i| Question::new(format!("q{i}"), format!("question{i}")))
            .collect()
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let shared: SharedProvider = Arc::new(EchoProvider::new());
        let classifier = Arc::new(Classifier::new(shared, "rules", Duration::from_secs(1)));
        let metrics = Arc::new(MetricsCollector::new(RunId::from("zero")));
        assert!(matches!(
            BatchScheduler::new(classifier, 0, metrics),
            Err(ClassifierError::Config(_))
        ));
    }

    #[test]
    fn test_group_count() {
        let (scheduler, _) = scheduler(Arc::new(EchoProvider::new()), 2);
        assert_eq!(scheduler.group_count(0), 0);
        assert_eq!(scheduler.group_count(3), 2);
        assert_eq!(scheduler.group_count(4), 2);
    }

    #[tokio::test]
    async fn test_fault_in_group_degrades_single_item() {
        let provider = Arc::new(EchoProvider::new().failing_on("question2"));
        let (scheduler, metrics) = scheduler(provider, 2);

        let records = scheduler.run(&questions(3)).await;

        let uids: Vec<&str> = records.iter().map(|r| r.uid.as_str()).collect();
        assert_eq!(uids, vec!["q1", "q2", "q3"]);
        assert_eq!(records[0].path, "/v1/echo/question1");
        assert_eq!(records[1].descriptor(), CallDescriptor::fallback());
        assert_eq!(records[2].path, "/v1/echo/question3");

        let summary = metrics.summary();
        assert_eq!(summary.items, 3);
        assert_eq!(summary.faults, 1);
        assert_eq!(summary.api_calls, 2);
        assert!((summary.total_cost_usd - 2.0 * 0.00045).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_panicking_task_degrades_single_item() {
        let provider = Arc::new(EchoProvider::new().panicking_on("question1"));
        let (scheduler, metrics) = scheduler(provider, 3);

        let records = scheduler.run(&questions(3)).await;

        assert_eq!(records.len(), 3);
        assert!(records[0].descriptor().is_fallback());
        assert_eq!(records[1].method, HttpMethod::Get);
        assert_eq!(records[1].path, "/v1/echo/question2");
        assert_eq!(metrics.summary().faults, 1);
    }

    #[tokio::test]
    async fn test_concurrency_bounded_by_batch_size() {
        let provider = Arc::new(EchoProvider::new());
        let (scheduler, _) = scheduler(Arc::clone(&provider), 4);

        scheduler.run(&questions(10)).await;

        let peak = provider.peak.load(Ordering::SeqCst);
        assert!(peak <= 4, "peak concurrency {peak} exceeded batch size");
    }

    #[tokio::test]
    async fn test_empty_input() {
        let (scheduler, metrics) = scheduler(Arc::new(EchoProvider::new()), 5);
        assert!(scheduler.run(&[]).await.is_empty());
        assert_eq!(metrics.summary().items, 0);
    }

    #[tokio::test]
    async fn test_progress_reports_groups() {
        let tracker = ProgressTracker::new();
        let (scheduler, _) = scheduler(Arc::new(EchoProvider::new()), 2);
        let scheduler = scheduler.with_progress(tracker.clone());

        scheduler.run(&questions(5)).await;

        let state = tracker.state();
        assert_eq!(state.total, 5);
        assert_eq!(state.completed, 5);
        assert_eq!(state.group, 3);
        assert_eq!(state.total_groups, 3);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_output_matches_input_order(n in 0usize..25, batch_size in 1usize..8) {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap();
            let (scheduler, _) = scheduler(Arc::new(EchoProvider::new()), batch_size);
            let input = questions(n);

            let records = runtime.block_on(scheduler.run(&input));

            prop_assert_eq!(records.len(), n);
            for (record, question) in records.iter().zip(&input) {
                prop_assert_eq!(&record.uid, &question.uid);
                prop_assert_eq!(&record.path, &format!("/v1/echo/{}", question.question));
            }
        }
    }
}
