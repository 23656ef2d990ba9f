//! Request Timeouts
//!
//! Bounded waits for classification calls. A call that exceeds its ceiling
//! is reported as `ClassifierError::Timeout` and degrades like any other
//! transport fault.

use std::future::Future;
use std::time::Duration;

use crate::constants::network as net_constants;
use crate::types::{ClassifierError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Ceiling for one chat completion
    pub llm_request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            llm_request: Duration::from_secs(net_constants::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TimeoutConfig {
    pub fn from_secs(secs: u64) -> Self {
        Self {
            llm_request: Duration::from_secs(secs),
        }
    }
}

/// Await `future`, or fail with `ClassifierError::Timeout` naming `operation_name`
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(ClassifierError::timeout(operation_name, timeout)),
    }
}
