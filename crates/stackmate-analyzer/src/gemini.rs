use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{CompletionClient, CompletionError};

pub const DEFAULT_MODEL: &str = "gemini-pro";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const CREDENTIAL_VAR: &str = "GEMINI_API_KEY";

/// Blocking client for the Gemini `generateContent` endpoint. The
/// credential is read at construction and checked per call; offline flows
/// never need one.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn from_env(model: impl Into<String>) -> Result<Self, CompletionError> {
        let http = reqwest::blocking::Client::builder().build().map_err(|err| {
            CompletionError::Transport(format!("failed to construct http client: {err}"))
        })?;
        let api_key = std::env::var(CREDENTIAL_VAR)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Ok(Self {
            http,
            api_key,
            model: model.into(),
        })
    }

    pub fn credential_configured() -> bool {
        std::env::var(CREDENTIAL_VAR).is_ok_and(|value| !value.trim().is_empty())
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates.into_iter().next().and_then(|candidate| {
            let text: String = candidate
                .content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect();
            (!text.trim().is_empty()).then_some(text)
        })
    }
}

impl CompletionClient for GeminiClient {
    fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, CompletionError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(CompletionError::MissingCredential);
        };

        let url = format!("{API_BASE}/{}:generateContent", self.model);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(model = self.model.as_str(), "requesting completion");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .timeout(timeout)
            .json(&request)
            .send()
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Transport(format!(
                "model endpoint returned {status}"
            )));
        }

        let parsed: GenerateContentResponse =
            response.json().map_err(classify_transport_error)?;
        parsed.first_text().ok_or_else(|| {
            CompletionError::Transport("model response carried no candidate text".to_string())
        })
    }
}

fn classify_transport_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Transport(err.to_string())
    }
}
