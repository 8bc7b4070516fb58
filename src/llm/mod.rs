//! LLM integration module

pub mod prompts;
pub mod openai;
pub mod assessor;

pub use assessor::{Narrative, NarrativeAssessor};
pub use openai::{CompletionRequest, GenerationError, OpenAiClient, TextGenerator};
