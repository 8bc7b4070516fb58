//! Combined narrative + keyword report

use crate::llm::Narrative;
use crate::processing::keywords::KeywordReport;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const KEYWORD_SECTION_HEADER: &str = "=== Keyword comparison ===";

/// Final report text shown to the user and written to the PDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombinedReport(String);

/// Narrative first, then the keyword section under a fixed header
pub fn compose(narrative: &Narrative, keywords: &KeywordReport) -> CombinedReport {
    CombinedReport(format!(
        "{}\n\n{}\n{}",
        narrative.text(),
        KEYWORD_SECTION_HEADER,
        keywords
    ))
}

impl CombinedReport {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn split(&self) -> Option<(&str, &str)> {
        self.0
            .rsplit_once(&format!("\n\n{}\n", KEYWORD_SECTION_HEADER))
    }

    pub fn narrative_section(&self) -> &str {
        self.split().map(|(narrative, _)| narrative).unwrap_or(&self.0)
    }

    pub fn keyword_section(&self) -> Option<&str> {
        self.split().map(|(_, keywords)| keywords)
    }
}

impl fmt::Display for CombinedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::keywords;

    #[test]
    fn test_compose_layout() {
        let narrative = Narrative::Generated("Good fit.".to_string());
        let keywords = keywords::compare("rust tokio", "rust");

        let report = compose(&narrative, &keywords);

        assert_eq!(
            report.as_str(),
            "Good fit.\n\n=== Keyword comparison ===\nShared keywords: rust\nKeyword match: 50.0%"
        );
        assert_eq!(report.narrative_section(), "Good fit.");
        assert_eq!(
            report.keyword_section(),
            Some("Shared keywords: rust\nKeyword match: 50.0%")
        );
    }

    #[test]
    fn test_degraded_narrative_is_kept_verbatim() {
        let narrative = Narrative::Degraded("OpenAI error: HTTP error: connection refused".to_string());
        let report = compose(&narrative, &keywords::compare("", ""));

        assert_eq!(
            report.narrative_section(),
            "OpenAI error: HTTP error: connection refused"
        );
        assert_eq!(
            report.keyword_section(),
            Some("Shared keywords: \nKeyword match: 0%")
        );
    }

    #[test]
    fn test_header_inside_narrative() {
        let narrative = Narrative::Generated(format!("quoted\n\n{}\nnot the real one", KEYWORD_SECTION_HEADER));
        let report = compose(&narrative, &keywords::compare("a", "a"));

        assert_eq!(report.keyword_section(), Some("Shared keywords: a\nKeyword match: 100.0%"));
        assert!(report.narrative_section().ends_with("not the real one"));
    }
}
