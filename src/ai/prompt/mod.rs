//! Prompt Builder System
//!
//! Sectioned prompt construction for LLM interactions. Sections render in
//! insertion order so the same inputs always produce the same text.

mod few_shot;

pub use few_shot::{ENDPOINT_CATALOGUE, FewShotPrompt, build_system_prompt, user_turn};

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Role definition with expertise area
    Role { expertise: String, task: String },
    /// Numbered rules
    Rules(Vec<String>),
    /// Ordered key-value facts
    Context(Vec<(String, String)>),
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// Worked question/answer pairs
    Examples(Vec<(String, String)>),
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role definition section
    pub fn role(mut self, expertise: &str, task: &str) -> Self {
        self.sections.push(PromptSection::Role {
            expertise: expertise.to_string(),
            task: task.to_string(),
        });
        self
    }

    /// Add numbered rules section
    pub fn rules(mut self, rules: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Rules(
            rules.into_iter().map(String::from).collect(),
        ));
        self
    }

    /// Add a context item, appending to the first context section
    pub fn context_item(mut self, key: &str, value: &str) -> Self {
        for section in &mut self.sections {
            if let PromptSection::Context(ctx) = section {
                ctx.push((key.to_string(), value.to_string()));
                return self;
            }
        }
        self.sections.push(PromptSection::Context(vec![(
            key.to_string(),
            value.to_string(),
        )]));
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    /// Add worked examples as (question, answer) pairs
    pub fn examples<I, Q, A>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: Into<String>,
        A: Into<String>,
    {
        self.sections.push(PromptSection::Examples(
            pairs
                .into_iter()
                .map(|(q, a)| (q.into(), a.into()))
                .collect(),
        ));
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Role { expertise, task } => {
                    prompt.push_str(&format!(
                        "You are an expert in {}. {}\n\n",
                        expertise, task
                    ));
                }
                PromptSection::Rules(rules) => {
                    prompt.push_str("# Rules\n\n");
                    for (i, rule) in rules.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, rule));
                    }
                    prompt.push('\n');
                }
                PromptSection::Context(ctx) => {
                    for (key, value) in ctx {
                        prompt.push_str(&format!("{}: {}\n", key, value));
                    }
                    prompt.push('\n');
                }
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&format!("# {}\n\n", h));
                    }
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Examples(pairs) => {
                    prompt.push_str("# Examples\n\n");
                    for (question, answer) in pairs {
                        prompt.push_str(&format!("Question: {}\nAnswer: {}\n\n", question, answer));
                    }
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_prompt() {
        let prompt = PromptBuilder::new()
            .role("the Finam Trade API", "Map questions to HTTP calls.")
            .rules(vec!["Answer with METHOD /path", "No explanations"])
            .build();

        assert!(prompt.starts_with("You are an expert in the Finam Trade API."));
        assert!(prompt.contains("# Rules"));
        assert!(prompt.contains("1. Answer with METHOD /path"));
        assert!(prompt.contains("2. No explanations"));
    }

    #[test]
    fn test_context_items_keep_insertion_order() {
        let prompt = PromptBuilder::new()
            .context_item("Current date", "2025-10-04")
            .context_item("Timezone", "UTC")
            .build();

        let date = prompt.find("Current date: 2025-10-04").unwrap();
        let tz = prompt.find("Timezone: UTC").unwrap();
        assert!(date < tz);
    }

    #[test]
    fn test_examples_section() {
        let prompt = PromptBuilder::new()
            .examples(vec![("Show my orders", "GET /v1/accounts/{account_id}/orders")])
            .build();

        assert!(prompt.contains("# Examples"));
        assert!(
            prompt.contains("Question: Show my orders\nAnswer: GET /v1/accounts/{account_id}/orders")
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let make = || {
            PromptBuilder::new()
                .section("Catalogue", "GET /v1/assets")
                .examples(vec![("List exchanges", "GET /v1/exchanges")])
                .build()
        };
        assert_eq!(make(), make());
    }
}
