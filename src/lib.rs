//! Resume matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod example;
pub mod input;
pub mod llm;
pub mod orchestrator;
pub mod output;
pub mod processing;
pub mod request;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use orchestrator::{DefaultOrchestrator, MatchOutcome, RequestOrchestrator};
pub use request::{MatchRequest, RequestId};
