//! Narrative fit assessment backed by a text generator

use crate::llm::openai::{CompletionRequest, TextGenerator, TEMPERATURE};
use crate::llm::prompts::{render_assessment_prompt, PromptParams};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Generated assessment, or the diagnostic substituted when generation failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Narrative {
    Generated(String),
    Degraded(String),
}

impl Narrative {
    /// Text that goes into the report either way
    pub fn text(&self) -> &str {
        match self {
            Narrative::Generated(text) | Narrative::Degraded(text) => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Narrative::Degraded(_))
    }
}

pub struct NarrativeAssessor<G> {
    generator: G,
    model: String,
}

impl<G: TextGenerator> NarrativeAssessor<G> {
    pub fn new(generator: G, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Single generation call, no retry. Faults become [`Narrative::Degraded`].
    pub async fn assess(&self, job_description: &str, resume: &str) -> Narrative {
        let prompt = render_assessment_prompt(&PromptParams {
            job_content: job_description.to_string(),
            resume_content: resume.to_string(),
        });

        let request = CompletionRequest {
            model: self.model.clone(),
            prompt,
            temperature: TEMPERATURE,
        };

        info!("Requesting narrative assessment from {}", self.model);
        match self.generator.complete(&request).await {
            Ok(text) => Narrative::Generated(text.trim().to_string()),
            Err(e) => {
                warn!("Narrative assessment failed: {}", e);
                Narrative::Degraded(format!("OpenAI error: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::openai::GenerationError;
    use std::sync::Mutex;

    struct ScriptedGenerator {
        reply: std::result::Result<String, (u16, String)>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedGenerator {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16, message: &str) -> Self {
            Self {
                reply: Err((status, message.to_string())),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for ScriptedGenerator {
        async fn complete(&self, request: &CompletionRequest) -> std::result::Result<String, GenerationError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err((status, message)) => Err(GenerationError::Api {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_success_is_trimmed() {
        let assessor = NarrativeAssessor::new(ScriptedGenerator::replying("\n  Strong fit, 80%.  \n"), "gpt-3.5-turbo");

        let narrative = assessor.assess("Rust developer", "Rust for five years").await;

        assert_eq!(narrative, Narrative::Generated("Strong fit, 80%.".to_string()));
        assert!(!narrative.is_degraded());
    }

    #[tokio::test]
    async fn test_request_uses_model_and_fixed_temperature() {
        let assessor = NarrativeAssessor::new(ScriptedGenerator::replying("ok"), "gpt-4o-mini");

        assessor.assess("JOB TEXT", "RESUME TEXT").await;

        let seen = assessor.generator().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "gpt-4o-mini");
        assert_eq!(seen[0].temperature, 0.4);
        assert!(seen[0].prompt.contains("JOB TEXT"));
        assert!(seen[0].prompt.contains("RESUME TEXT"));
    }

    #[tokio::test]
    async fn test_failure_degrades_with_fault_text() {
        let assessor = NarrativeAssessor::new(
            ScriptedGenerator::failing(429, "You exceeded your current quota"),
            "gpt-3.5-turbo",
        );

        let narrative = assessor.assess("job", "resume").await;

        assert!(narrative.is_degraded());
        assert!(narrative.text().starts_with("OpenAI error:"));
        assert!(narrative.text().contains("You exceeded your current quota"));
        assert!(narrative.text().contains("429"));
        // one call, no retry
        assert_eq!(assessor.generator().seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_narrative_serialization() {
        let json = serde_json::to_value(Narrative::Degraded("OpenAI error: boom".to_string())).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["text"], "OpenAI error: boom");
    }
}
