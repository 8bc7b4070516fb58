//! Terminal rendering of match outcomes

use crate::config::OutputFormat;
use crate::error::Result;
use crate::orchestrator::{JobSource, MatchOutcome, MatchReport};
use colored::{Color, Colorize};
use serde_json::json;

pub trait OutputFormatter {
    fn format_outcome(&self, outcome: &MatchOutcome) -> Result<String>;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_match_badge(&self, percent: f64) -> String {
        let (badge, color) = match percent {
            p if p >= 70.0 => ("STRONG", Color::Green),
            p if p >= 40.0 => ("PARTIAL", Color::Yellow),
            _ => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_report(&self, report: &MatchReport) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH", 1));
        output.push_str(&format!(
            "Request: {} | Generated: {}\n",
            report.request_id,
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        match &report.job_source {
            JobSource::Provided => output.push_str("Job description: provided text\n"),
            JobSource::Url { url, fetch } => {
                let status = if fetch.is_extracted() {
                    self.colorize("extracted", Color::Green)
                } else {
                    self.colorize("not available", Color::Red)
                };
                output.push_str(&format!("Job description: {} ({})\n", url, status));
            }
        }

        output.push_str(&self.format_header("Assessment", 2));
        if report.narrative.is_degraded() {
            output.push_str(&self.colorize(report.narrative.text(), Color::Red));
        } else {
            output.push_str(report.narrative.text());
        }
        output.push('\n');

        output.push_str(&self.format_header("Keyword comparison", 2));
        output.push_str(&format!(
            "Keyword match: {}% {}\n",
            report.keywords.percent_text(),
            self.format_match_badge(report.keywords.match_percent)
        ));
        if report.keywords.shared.is_empty() {
            output.push_str("Shared keywords: none\n");
        } else {
            output.push_str(&format!(
                "Shared keywords: {}\n",
                self.colorize(&report.keywords.shared.join(", "), Color::Cyan)
            ));
        }

        output.push_str(&self.format_header("Document", 3));
        output.push_str(&format!("{}\n", report.document.display()));

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_outcome(&self, outcome: &MatchOutcome) -> Result<String> {
        Ok(match outcome {
            MatchOutcome::Rejected(failure) => {
                format!("{}\n", self.colorize(&failure.to_string(), Color::Yellow))
            }
            MatchOutcome::Completed(report) => self.format_report(report),
        })
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    /// `result` and `file` mirror the two outputs of the form; `details` is the full outcome
    fn format_outcome(&self, outcome: &MatchOutcome) -> Result<String> {
        let value = json!({
            "result": outcome.text(),
            "file": outcome.document(),
            "details": outcome,
        });

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(rendered)
    }
}

/// Render with the formatter for `format`
pub fn render(outcome: &MatchOutcome, format: OutputFormat, use_colors: bool) -> Result<String> {
    match format {
        OutputFormat::Console => ConsoleFormatter::new(use_colors).format_outcome(outcome),
        OutputFormat::Json => JsonFormatter::new(true).format_outcome(outcome),
    }
}
