//! Request pipeline: validate, resolve the job posting, assess, compare, export

use crate::config::Config;
use crate::error::Result;
use crate::input::url_fetcher::{FetchOutcome, HttpPageFetcher, PageFetcher};
use crate::llm::{Narrative, NarrativeAssessor, OpenAiClient, TextGenerator};
use crate::output::pdf::{DocumentExporter, PdfExporter};
use crate::output::report::{compose, CombinedReport};
use crate::processing::keywords::{self, KeywordReport};
use crate::request::{MatchRequest, RequestId};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a request was turned away before any work was done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailure {
    MissingResume,
    MissingJobDescription,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::MissingResume => f.write_str("Please paste the résumé text."),
            ValidationFailure::MissingJobDescription => {
                f.write_str("Please enter a job description or a link to the posting.")
            }
        }
    }
}

/// Where the job description used for the analysis came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobSource {
    Provided,
    Url { url: String, fetch: FetchOutcome },
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub request_id: RequestId,
    pub job_source: JobSource,
    pub narrative: Narrative,
    pub keywords: KeywordReport,
    pub report: CombinedReport,
    pub document: PathBuf,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum MatchOutcome {
    Rejected(ValidationFailure),
    Completed(MatchReport),
}

impl MatchOutcome {
    /// Result text: the validation message or the combined report
    pub fn text(&self) -> String {
        match self {
            MatchOutcome::Rejected(failure) => failure.to_string(),
            MatchOutcome::Completed(report) => report.report.to_string(),
        }
    }

    /// Exported file, present only on success
    pub fn document(&self) -> Option<&Path> {
        match self {
            MatchOutcome::Rejected(_) => None,
            MatchOutcome::Completed(report) => Some(&report.document),
        }
    }
}

pub struct RequestOrchestrator<F, G, E> {
    fetcher: F,
    assessor: NarrativeAssessor<G>,
    exporter: E,
}

/// Orchestrator wired to the real HTTP, OpenAI and PDF collaborators
pub type DefaultOrchestrator = RequestOrchestrator<HttpPageFetcher, OpenAiClient, PdfExporter>;

impl DefaultOrchestrator {
    /// Build from configuration. `api_key` is the credential read at startup.
    pub fn from_config(config: &Config, api_key: Option<String>) -> Result<Self> {
        let fetcher = HttpPageFetcher::new(&config.fetch)?;
        let generator = OpenAiClient::new(&config.llm, api_key)?;
        let assessor = NarrativeAssessor::new(generator, config.llm.model.clone());
        let exporter = PdfExporter::new(&config.export);
        Ok(Self::new(fetcher, assessor, exporter))
    }
}

impl<F, G, E> RequestOrchestrator<F, G, E>
where
    F: PageFetcher,
    G: TextGenerator,
    E: DocumentExporter,
{
    pub fn new(fetcher: F, assessor: NarrativeAssessor<G>, exporter: E) -> Self {
        Self {
            fetcher,
            assessor,
            exporter,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn assessor(&self) -> &NarrativeAssessor<G> {
        &self.assessor
    }

    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    /// Run one request. Validation problems come back as
    /// [`MatchOutcome::Rejected`]; only an export failure is an `Err`.
    pub async fn process(&self, request: MatchRequest) -> Result<MatchOutcome> {
        let MatchRequest {
            job_description,
            job_url,
            resume,
            request_id,
        } = request;

        if resume.trim().is_empty() {
            info!("Rejected request: empty resume");
            return Ok(MatchOutcome::Rejected(ValidationFailure::MissingResume));
        }

        let job_url = job_url.trim();
        let (job_description, job_source) = if !job_description.trim().is_empty() {
            (job_description, JobSource::Provided)
        } else if !job_url.is_empty() {
            let fetch = self.fetcher.fetch(job_url).await;
            (
                fetch.job_text(),
                JobSource::Url {
                    url: job_url.to_string(),
                    fetch,
                },
            )
        } else {
            info!("Rejected request: no job description or URL");
            return Ok(MatchOutcome::Rejected(ValidationFailure::MissingJobDescription));
        };

        let request_id = request_id.unwrap_or_else(RequestId::generate);
        info!("Processing request {}", request_id);
        debug!(
            "Job description: {} chars, resume: {} chars",
            job_description.chars().count(),
            resume.chars().count()
        );

        let narrative = self.assessor.assess(&job_description, &resume).await;
        let keywords = keywords::compare(&job_description, &resume);
        let report = compose(&narrative, &keywords);
        let document = self.exporter.export(report.as_str(), &request_id)?;

        Ok(MatchOutcome::Completed(MatchReport {
            request_id,
            job_source,
            narrative,
            keywords,
            report,
            document,
            generated_at: Utc::now(),
        }))
    }
}
