//! Run Metrics Collection
//!
//! Centralized aggregation of LLM usage, cost and the distribution of
//! classified methods across one run. Thread-safe for concurrent
//! classification tasks.
//!
//! ## Usage
//!
//! ```ignore
//! let metrics = MetricsCollector::new(RunId::generate());
//! metrics.record_cost(0.00045);
//! metrics.record_method(HttpMethod::Get);
//! let summary = metrics.summary();
//! ```

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Instant;

use crate::ai::provider::TokenUsage;
use crate::types::{HttpMethod, RunId};

/// Cost is accumulated as integer nano-dollars so updates stay atomic
const NANOS_PER_USD: f64 = 1_000_000_000.0;

// =============================================================================
// Metrics Collector
// =============================================================================

/// Thread-safe metrics collector for one classification run.
///
/// Counters are atomics and the method distribution is a `DashMap`, so each
/// concurrent call contributes its delta exactly once without a global lock.
pub struct MetricsCollector {
    run_id: RunId,
    start_time: Instant,
    /// Completed LLM API calls
    api_calls: AtomicU32,
    /// Calls that degraded to the fallback descriptor
    faults: AtomicU32,
    prompt_tokens: AtomicU64,
    completion_tokens: AtomicU64,
    total_latency_ms: AtomicU64,
    total_cost_nanos: AtomicU64,
    methods: DashMap<HttpMethod, u64>,
}

/// Share of one method in the final distribution
#[derive(Debug, Clone, PartialEq)]
pub struct MethodShare {
    pub method: HttpMethod,
    pub count: u64,
    pub percent: f64,
}

/// Summary statistics for a run
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub run_id: String,
    pub items: u64,
    pub elapsed_secs: f64,
    pub api_calls: u32,
    pub faults: u32,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub avg_latency_ms: f64,
    pub total_cost_usd: f64,
    /// Sorted by method
    pub methods: Vec<MethodShare>,
}

impl MetricsCollector {
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            start_time: Instant::now(),
            api_calls: AtomicU32::new(0),
            faults: AtomicU32::new(0),
            prompt_tokens: AtomicU64::new(0),
            completion_tokens: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            total_cost_nanos: AtomicU64::new(0),
            methods: DashMap::new(),
        }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// Add one call's cost to the running total. Negative or NaN input is ignored.
    pub fn record_cost(&self, cost_usd: f64) {
        if cost_usd.is_nan() || cost_usd <= 0.0 {
            return;
        }
        let nanos = (cost_usd * NANOS_PER_USD).round() as u64;
        self.total_cost_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    /// Count one classified item under its method
    pub fn record_method(&self, method: HttpMethod) {
        *self.methods.entry(method).or_insert(0) += 1;
    }

    /// Record a successful API round trip
    pub fn record_call(&self, usage: &TokenUsage, latency_ms: u64) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
        self.prompt_tokens
            .fetch_add(usage.prompt_tokens as u64, Ordering::Relaxed);
        self.completion_tokens
            .fetch_add(usage.completion_tokens as u64, Ordering::Relaxed);
        self.total_latency_ms
            .fetch_add(latency_ms, Ordering::Relaxed);
    }

    /// Record a call that degraded to the fallback descriptor
    pub fn record_fault(&self) {
        self.faults.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost_nanos.load(Ordering::Relaxed) as f64 / NANOS_PER_USD
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSummary {
        let api_calls = self.api_calls.load(Ordering::Relaxed);
        let total_latency = self.total_latency_ms.load(Ordering::Relaxed);

        let avg_latency = if api_calls > 0 {
            total_latency as f64 / api_calls as f64
        } else {
            0.0
        };

        let mut counts: Vec<(HttpMethod, u64)> = self
            .methods
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();
        counts.sort_by_key(|(method, _)| method.as_str());

        let items: u64 = counts.iter().map(|(_, count)| count).sum();
        let methods = counts
            .into_iter()
            .map(|(method, count)| MethodShare {
                method,
                count,
                percent: if items > 0 {
                    count as f64 / items as f64 * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        MetricsSummary {
            run_id: self.run_id.to_string(),
            items,
            elapsed_secs: self.start_time.elapsed().as_secs_f64(),
            api_calls,
            faults: self.faults.load(Ordering::Relaxed),
            prompt_tokens: self.prompt_tokens.load(Ordering::Relaxed),
            completion_tokens: self.completion_tokens.load(Ordering::Relaxed),
            avg_latency_ms: avg_latency,
            total_cost_usd: self.total_cost(),
            methods,
        }
    }

    /// Get final summary
    pub fn summary(&self) -> MetricsSummary {
        self.snapshot()
    }
}

impl MetricsSummary {
    pub fn cost_per_item(&self) -> f64 {
        if self.items == 0 {
            0.0
        } else {
            self.total_cost_usd / self.items as f64
        }
    }

    pub fn secs_per_item(&self) -> f64 {
        if self.items == 0 {
            0.0
        } else {
            self.elapsed_secs / self.items as f64
        }
    }

    pub fn items_per_sec(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.items as f64 / self.elapsed_secs
        } else {
            0.0
        }
    }

    /// Format summary for display
    pub fn display(&self) -> String {
        let mut out = format!(
            "Run: {}\n\
             Items: {}\n\
             Elapsed: {:.1}s ({:.1} min)\n\
             Per item: {:.2}s\n\
             Throughput: {:.1} items/s\n\
             API Calls: {} ({} fallbacks)\n\
             Tokens: {} (prompt: {}, completion: {})\n\
             Avg Latency: {:.0}ms\n\
             Total Cost: ${:.4}\n\
             Cost per item: ${:.6}\n\
             Methods:",
            self.run_id,
            self.items,
            self.elapsed_secs,
            self.elapsed_secs / 60.0,
            self.secs_per_item(),
            self.items_per_sec(),
            self.api_calls,
            self.faults,
            self.prompt_tokens + self.completion_tokens,
            self.prompt_tokens,
            self.completion_tokens,
            self.avg_latency_ms,
            self.total_cost_usd,
            self.cost_per_item(),
        );
        for share in &self.methods {
            out.push_str(&format!(
                "\n  {}: {} ({:.1}%)",
                share.method, share.count, share.percent
            ));
        }
        out
    }
}

// =============================================================================
// Shared Type
// =============================================================================

/// Shared metrics collector for classification tasks
pub type SharedMetrics = Arc<MetricsCollector>;

pub fn create_shared_metrics(run_id: RunId) -> SharedMetrics {
    Arc::new(MetricsCollector::new(run_id))
}

// =============================================================================
// Tests
// =============================================================================
