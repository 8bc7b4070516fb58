//! Per-request input values

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const MAX_ID_LEN: usize = 64;

/// Identifier that keeps each request's exported file apart from the others
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept a caller-supplied id. It ends up in a file name, so only
    /// ASCII letters, digits, `-` and `_` are allowed.
    pub fn parse(raw: &str) -> Result<Self> {
        let valid = (1..=MAX_ID_LEN).contains(&raw.len())
            && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(MatcherError::InvalidInput(format!(
                "Request id '{}' must be 1-64 characters of [A-Za-z0-9_-]",
                raw
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three form fields plus an optional id. Empty strings mean "not provided".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchRequest {
    pub job_description: String,
    pub job_url: String,
    pub resume: String,
    pub request_id: Option<RequestId>,
}

impl MatchRequest {
    pub fn new(
        job_description: impl Into<String>,
        job_url: impl Into<String>,
        resume: impl Into<String>,
    ) -> Self {
        Self {
            job_description: job_description.into(),
            job_url: job_url.into(),
            resume: resume.into(),
            request_id: None,
        }
    }

    pub fn with_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }
}
