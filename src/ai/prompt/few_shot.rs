//! Few-shot system prompt for endpoint classification.
//!
//! Rule preamble, the first `limit` training examples in input order, and a
//! static catalogue of Finam Trade API endpoint templates.

use chrono::NaiveDate;

use super::PromptBuilder;
use crate::constants::classify::DEFAULT_FEW_SHOT_LIMIT;
use crate::types::Example;

/// Known endpoint templates, grouped by area
pub const ENDPOINT_CATALOGUE: &str = "\
Quotes and market data:
GET /v1/instruments/{symbol}/quotes/latest
GET /v1/instruments/{symbol}/orderbook
GET /v1/instruments/{symbol}/trades/latest
GET /v1/instruments/{symbol}/bars?interval.start_time=...&interval.end_time=...&timeframe=...

Instruments:
GET /v1/assets?symbol=...&ticker=...&mic=...&name=...&type=...&limit=...&offset=...
GET /v1/assets/{symbol}?account_id={account_id}
GET /v1/assets/{symbol}/params?account_id={account_id}
GET /v1/assets/{symbol}/schedule
GET /v1/assets/{underlying_symbol}/options

Accounts and orders:
GET /v1/accounts/{account_id}
GET /v1/accounts/{account_id}/orders
GET /v1/accounts/{account_id}/orders/{order_id}
POST /v1/accounts/{account_id}/orders
DELETE /v1/accounts/{account_id}/orders/{order_id}
GET /v1/accounts/{account_id}/trades?interval.start_time=...&interval.end_time=...&limit=...
GET /v1/accounts/{account_id}/transactions?interval.start_time=...&interval.end_time=...&limit=...

Service:
GET /v1/assets/clock
GET /v1/exchanges";

const QUERY_RULES: &str = "\
- Dates and times are ISO 8601 in UTC, e.g. 2025-10-04T00:00:00Z
- Timeframes use the enum name, e.g. TIME_FRAME_M5
- Put required filters in the query string after ? joined with &
- Omit parameters the question does not need
- Endpoints without a query string above take no query parameters
- POST /v1/accounts/{account_id}/orders carries its order in a JSON body, not the query";

/// System prompt builder for the endpoint classifier
#[derive(Debug, Clone)]
pub struct FewShotPrompt {
    limit: usize,
    reference_date: Option<NaiveDate>,
}

impl Default for FewShotPrompt {
    fn default() -> Self {
        Self {
            limit: DEFAULT_FEW_SHOT_LIMIT,
            reference_date: None,
        }
    }
}

impl FewShotPrompt {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Pin "today" so relative dates in questions resolve consistently
    pub fn with_reference_date(mut self, date: Option<NaiveDate>) -> Self {
        self.reference_date = date;
        self
    }

    pub fn build(&self, examples: &[Example]) -> String {
        let shown = &examples[..examples.len().min(self.limit)];

        let mut builder = PromptBuilder::new()
            .role(
                "the Finam Trade API",
                "Convert the user's question into a single HTTP request.",
            )
            .section("Response format", "METHOD /path");

        if let Some(date) = self.reference_date {
            builder = builder.context_item("Current date", &date.format("%Y-%m-%d").to_string());
        }

        builder
            .rules(vec![
                "Reply ONLY in the form \"METHOD /path\"",
                "METHOD is one of GET, POST, PUT, DELETE, PATCH",
                "Do not add explanations or comments",
                "Use {account_id} and {order_id} placeholders for identifiers",
                "Symbols look like SBER@MISX, GAZP@MISX, ROSN@MISX, LKOH@MISX",
            ])
            .examples(
                shown
                    .iter()
                    .map(|ex| (ex.question.as_str(), ex.answer().to_string())),
            )
            .section("Query parameters", QUERY_RULES)
            .section("Endpoints", ENDPOINT_CATALOGUE)
            .build()
    }
}

/// Render the system prompt with the first `limit` examples
pub fn build_system_prompt(examples: &[Example], limit: usize) -> String {
    FewShotPrompt::new(limit).build(examples)
}

/// User turn sent for one question
pub fn user_turn(question: &str) -> String {
    format!("Question: {}\nAnswer:", question)
}
