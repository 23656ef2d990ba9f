//! Classifier Client
//!
//! One chat completion per question. Every fault is absorbed here: the
//! caller always receives a descriptor and a cost, never an error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::parser::try_parse_response;
use crate::ai::{ModelPricing, SharedProvider, TokenUsage, pricing_for, user_turn, with_timeout};
use crate::types::{CallDescriptor, Question, Result};

/// Outcome of classifying one question
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub descriptor: CallDescriptor,
    /// USD, zero when the call faulted
    pub cost: f64,
    pub usage: TokenUsage,
    /// Wall-clock time of the API round trip, zero when faulted
    pub latency_ms: u64,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Model answered with a recognizable `METHOD /path`
    Parsed,
    /// Model answered, but nothing matched; fallback descriptor, cost still charged
    Unparsed,
    /// Transport fault, timeout or task failure; fallback descriptor, zero cost
    Faulted,
}

impl Classification {
    pub fn fallback() -> Self {
        Self {
            descriptor: CallDescriptor::fallback(),
            cost: 0.0,
            usage: TokenUsage::default(),
            latency_ms: 0,
            outcome: Outcome::Faulted,
        }
    }
}

/// Classifies questions against a fixed system prompt
pub struct Classifier {
    provider: SharedProvider,
    system_prompt: Arc<str>,
    pricing: ModelPricing,
    timeout: Duration,
}

impl Classifier {
    pub fn new(provider: SharedProvider, system_prompt: impl Into<Arc<str>>, timeout: Duration) -> Self {
        let pricing = pricing_for(provider.model());
        Self {
            provider,
            system_prompt: system_prompt.into(),
            pricing,
            timeout,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Classify one question. Never fails; faults degrade to the fallback descriptor.
    pub async fn classify(&self, question: &Question) -> Classification {
        match self.try_classify(question).await {
            Ok(classification) => classification,
            Err(e) => {
                warn!("Classification failed for {}: {}", question.uid, e);
                Classification::fallback()
            }
        }
    }

    async fn try_classify(&self, question: &Question) -> Result<Classification> {
        let user = user_turn(&question.question);
        let response = with_timeout(
            self.timeout,
            self.provider.complete(&self.system_prompt, &user),
            "chat completion",
        )
        .await?;

        debug!("{} -> {}", question.uid, response.content.trim());

        let cost = self.pricing.cost(&response.usage);
        let (descriptor, outcome) = match try_parse_response(&response.content) {
            Some(descriptor) => (descriptor, Outcome::Parsed),
            None => {
                debug!("No METHOD /path in answer for {}, using fallback", question.uid);
                (CallDescriptor::fallback(), Outcome::Unparsed)
            }
        };

        Ok(Classification {
            descriptor,
            cost,
            usage: response.usage,
            latency_ms: response.timing.total_ms,
            outcome,
        })
    }
}
