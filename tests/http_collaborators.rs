//! HTTP collaborators against a local one-shot server

mod common;

use common::{closed_port_url, serve_once};
use resume_matcher::config::{ExportConfig, FetchConfig, LlmConfig};
use resume_matcher::input::url_fetcher::{FetchOutcome, HttpPageFetcher, PageFetcher};
use resume_matcher::llm::openai::TEMPERATURE;
use resume_matcher::llm::{CompletionRequest, GenerationError, NarrativeAssessor, OpenAiClient, TextGenerator};
use resume_matcher::orchestrator::{JobSource, MatchOutcome};
use resume_matcher::output::pdf::{FontSource, PdfExporter};
use resume_matcher::{MatchRequest, RequestOrchestrator};
use tempfile::TempDir;

const VACANCY_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Vacancy</title></head>
  <body>
    <header>Jobs board</header>
    <main>
      <h1>Product Manager</h1>
      <p>Требуется Product Manager с опытом в B2B</p>
    </main>
  </body>
</html>"#;

fn fetcher() -> HttpPageFetcher {
    HttpPageFetcher::new(&FetchConfig::default()).unwrap()
}

fn llm_config(api_base: &str) -> LlmConfig {
    LlmConfig {
        api_base: format!("{}/v1", api_base),
        ..LlmConfig::default()
    }
}

fn completion_request() -> CompletionRequest {
    CompletionRequest {
        model: "gpt-3.5-turbo".to_string(),
        prompt: "Assess this candidate".to_string(),
        temperature: TEMPERATURE,
    }
}

#[tokio::test]
async fn test_fetch_extracts_main_region() {
    let (base, server) = serve_once("200 OK", "text/html; charset=utf-8", VACANCY_HTML).await;

    let outcome = fetcher().fetch(&format!("{}/vacancy/1", base)).await;

    assert_eq!(
        outcome,
        FetchOutcome::Extracted("Product Manager Требуется Product Manager с опытом в B2B".to_string())
    );
    let request = server.await.unwrap();
    assert!(request.starts_with("GET /vacancy/1 HTTP/1.1"));
    assert!(request.to_lowercase().contains("user-agent: resume-matcher/"));
}

#[tokio::test]
async fn test_fetch_404_is_a_value() {
    let (base, _server) = serve_once("404 Not Found", "text/html", "<h1>Not found</h1>").await;

    let outcome = fetcher().fetch(&format!("{}/gone", base)).await;

    assert_eq!(outcome, FetchOutcome::Failed("HTTP 404 Not Found".to_string()));
    assert_eq!(
        outcome.job_text(),
        "Failed to retrieve the job posting: HTTP 404 Not Found"
    );
}

#[tokio::test]
async fn test_fetch_without_main_region() {
    let (base, _server) = serve_once("200 OK", "text/html", "<html><body><div>no main</div></body></html>").await;

    let outcome = fetcher().fetch(&base).await;

    assert_eq!(outcome, FetchOutcome::NoContent);
}

#[tokio::test]
async fn test_fetch_unreachable_host() {
    let url = closed_port_url().await;

    let outcome = fetcher().fetch(&url).await;

    assert!(matches!(outcome, FetchOutcome::Failed(_)));
    assert!(outcome.job_text().starts_with("Failed to retrieve the job posting: "));
}

#[tokio::test]
async fn test_fetch_invalid_url() {
    let outcome = fetcher().fetch("not a url").await;
    assert!(matches!(outcome, FetchOutcome::Failed(_)));
}

#[tokio::test]
async fn test_openai_success() {
    let body = r#"{"id":"chatcmpl-1","object":"chat.completion","choices":[{"index":0,"message":{"role":"assistant","content":"Solid fit. Match: 70%"},"finish_reason":"stop"}]}"#;
    let (base, server) = serve_once("200 OK", "application/json", body).await;
    let client = OpenAiClient::new(&llm_config(&base), Some("test-key".to_string())).unwrap();

    let text = client.complete(&completion_request()).await.unwrap();
    assert_eq!(text, "Solid fit. Match: 70%");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /v1/chat/completions HTTP/1.1"));
    assert!(request.to_lowercase().contains("authorization: bearer test-key"));
    assert!(request.contains("\"temperature\":0.4"));
    assert!(request.contains("\"model\":\"gpt-3.5-turbo\""));
    assert!(request.contains("Assess this candidate"));
}

#[tokio::test]
async fn test_openai_error_status() {
    let body = r#"{"error":{"message":"Incorrect API key provided: sk-bad","type":"invalid_request_error"}}"#;
    let (base, _server) = serve_once("401 Unauthorized", "application/json", body).await;
    let client = OpenAiClient::new(&llm_config(&base), Some("sk-bad".to_string())).unwrap();

    let result = client.complete(&completion_request()).await;

    match result {
        Err(GenerationError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided: sk-bad");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_openai_malformed_body() {
    let (base, _server) = serve_once("200 OK", "application/json", "{not json").await;
    let client = OpenAiClient::new(&llm_config(&base), Some("key".to_string())).unwrap();

    let result = client.complete(&completion_request()).await;
    assert!(matches!(result, Err(GenerationError::Http(_))));
}

#[tokio::test]
async fn test_404_posting_flows_into_assessment() {
    let (job_base, _job_server) = serve_once("404 Not Found", "text/html", "").await;
    let llm_base = closed_port_url().await;
    let temp_dir = TempDir::new().unwrap();
    let export = ExportConfig {
        output_dir: temp_dir.path().to_path_buf(),
        ..ExportConfig::default()
    };

    let orchestrator = RequestOrchestrator::new(
        fetcher(),
        NarrativeAssessor::new(
            OpenAiClient::new(&llm_config(&llm_base), Some("key".to_string())).unwrap(),
            "gpt-3.5-turbo",
        ),
        PdfExporter::with_font(&export, FontSource::Builtin),
    );

    let request = MatchRequest::new("", format!("{}/vacancy/404", job_base), "Product manager with B2B experience");
    let outcome = orchestrator.process(request).await.unwrap();

    let document = outcome.document().unwrap().to_path_buf();
    assert!(document.exists());
    match outcome {
        MatchOutcome::Completed(report) => {
            assert!(matches!(
                report.job_source,
                JobSource::Url { fetch: FetchOutcome::Failed(ref reason), .. } if reason == "HTTP 404 Not Found"
            ));
            assert!(report.narrative.is_degraded());
            assert!(report.report.narrative_section().starts_with("OpenAI error: HTTP error:"));
            assert!(report.report.keyword_section().is_some());
        }
        MatchOutcome::Rejected(failure) => panic!("unexpected rejection: {}", failure),
    }
}
