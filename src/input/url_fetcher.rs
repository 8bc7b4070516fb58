//! Job posting retrieval from a URL

use crate::config::FetchConfig;
use crate::error::{MatcherError, Result};
use log::{debug, info, warn};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

pub const NO_CONTENT_MESSAGE: &str = "Could not extract text from the job posting.";

/// Result of resolving a job posting URL. Never an error: failures are
/// carried as values and turned into substitute job text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum FetchOutcome {
    Extracted(String),
    /// Page loaded but the content region is absent
    NoContent,
    Failed(String),
}

impl FetchOutcome {
    /// Text that stands in for the job description
    pub fn job_text(&self) -> String {
        match self {
            FetchOutcome::Extracted(text) => text.clone(),
            FetchOutcome::NoContent => NO_CONTENT_MESSAGE.to_string(),
            FetchOutcome::Failed(reason) => format!("Failed to retrieve the job posting: {}", reason),
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, FetchOutcome::Extracted(_))
    }
}

pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// reqwest + scraper fetcher with a fixed timeout
pub struct HttpPageFetcher {
    http: reqwest::Client,
    content_selector: String,
}

impl HttpPageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Selector::parse(&config.content_selector).map_err(|e| {
            MatcherError::Configuration(format!(
                "Invalid content selector '{}': {:?}",
                config.content_selector, e
            ))
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| MatcherError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            content_selector: config.content_selector.clone(),
        })
    }

    fn extract_region(&self, html: &str) -> Option<String> {
        let selector = Selector::parse(&self.content_selector).ok()?;
        extract_primary_content(html, &selector)
    }
}

impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        info!("Fetching job posting: {}", url);

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Job posting request failed: {}", e);
                return FetchOutcome::Failed(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Job posting returned HTTP {}", status);
            return FetchOutcome::Failed(format!("HTTP {}", status));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read job posting body: {}", e);
                return FetchOutcome::Failed(e.to_string());
            }
        };
        debug!("Job posting body: {} bytes", body.len());

        match self.extract_region(&body) {
            Some(text) => FetchOutcome::Extracted(text),
            None => {
                warn!("No '{}' region in job posting", self.content_selector);
                FetchOutcome::NoContent
            }
        }
    }
}

/// Text of the first element matching `selector`, trimmed text nodes joined by spaces
pub fn extract_primary_content(html: &str, selector: &Selector) -> Option<String> {
    let document = Html::parse_document(html);
    let region = document.select(selector).next()?;

    Some(
        region
            .text()
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    )
}
