use console::style;

use crate::ai::MetricsSummary;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!("  {:<16} {}", style(format!("{}:", label)).dim(), value);
    }

    /// End-of-run statistics
    pub fn summary(&self, summary: &MetricsSummary) {
        self.section("Run statistics");
        self.field("Run", &summary.run_id);
        self.field("Questions", summary.items);
        self.field(
            "Elapsed",
            format!(
                "{:.1}s ({:.1} min)",
                summary.elapsed_secs,
                summary.elapsed_secs / 60.0
            ),
        );
        self.field("Per question", format!("{:.2}s", summary.secs_per_item()));
        self.field("Throughput", format!("{:.1}/s", summary.items_per_sec()));
        self.field(
            "API calls",
            format!("{} ({} fallback)", summary.api_calls, summary.faults),
        );
        self.field(
            "Tokens",
            format!(
                "{} prompt, {} completion",
                summary.prompt_tokens, summary.completion_tokens
            ),
        );

        self.section("Cost");
        self.field("Total", format!("${:.4}", summary.total_cost_usd));
        self.field("Per question", format!("${:.6}", summary.cost_per_item()));

        self.section("Methods");
        for share in &summary.methods {
            println!(
                "  {:<8} {:>6} ({:>5.1}%)",
                style(share.method).cyan(),
                share.count,
                share.percent
            );
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
