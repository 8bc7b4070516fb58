//! Bag-of-words overlap between a job description and a resume

use crate::processing::stopwords;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Shared significant tokens and the share of job tokens the resume covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordReport {
    /// Sorted, deduplicated intersection
    pub shared: Vec<String>,
    /// Percent of job tokens matched, two decimals, 0 when the job has none
    pub match_percent: f64,
    /// Significant job tokens the percentage is taken over
    pub job_keywords: usize,
}

/// Compare two raw texts. Total over all inputs, empty strings included.
pub fn compare(job_description: &str, resume: &str) -> KeywordReport {
    let job_tokens = stopwords::filter(token_set(job_description));
    let resume_tokens = stopwords::filter(token_set(resume));

    let mut shared: Vec<String> = job_tokens.intersection(&resume_tokens).cloned().collect();
    shared.sort();

    let match_percent = if job_tokens.is_empty() {
        0.0
    } else {
        round_two(shared.len() as f64 / job_tokens.len() as f64 * 100.0)
    };

    KeywordReport {
        shared,
        match_percent,
        job_keywords: job_tokens.len(),
    }
}

/// Lowercase and split on whitespace; duplicates collapse
pub fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Two decimals, exact halves to even (3.125 -> 3.12)
fn round_two(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

impl KeywordReport {
    /// `0` when nothing was scored, otherwise always with a fractional part (`40.0`, `33.33`)
    pub fn percent_text(&self) -> String {
        if self.job_keywords == 0 {
            "0".to_string()
        } else if self.match_percent.fract() == 0.0 {
            format!("{:.1}", self.match_percent)
        } else {
            self.match_percent.to_string()
        }
    }
}

impl fmt::Display for KeywordReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shared keywords: {}", self.shared.join(", "))?;
        write!(f, "Keyword match: {}%", self.percent_text())
    }
}
