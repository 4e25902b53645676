use std::thread;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use stackmate_core::{CapabilityTag, ExpectedUsers, ExtractionError, RequirementSet};

use crate::client::{CompletionClient, CompletionError};
use crate::prompt::capability_prompt;

const RETRY_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Extraction {
    pub requirements: RequirementSet,
    /// Response tokens that did not map into the fixed vocabulary. Reported
    /// for observability; never a failure on its own.
    pub dropped_tokens: usize,
}

/// Extract a requirement set from free text. An empty description
/// short-circuits to the default set without touching the model.
pub fn extract(
    description: &str,
    client: &dyn CompletionClient,
    timeout: Duration,
) -> Result<Extraction, ExtractionError> {
    if description.trim().is_empty() {
        debug!("empty description, skipping model call");
        return Ok(Extraction {
            requirements: RequirementSet::default_web(),
            dropped_tokens: 0,
        });
    }

    let prompt = capability_prompt(description);
    let raw = complete_with_retry(client, &prompt, timeout)?;
    parse_response(&raw)
}

fn complete_with_retry(
    client: &dyn CompletionClient,
    prompt: &str,
    timeout: Duration,
) -> Result<String, ExtractionError> {
    match client.complete(prompt, timeout) {
        Ok(text) => Ok(text),
        Err(CompletionError::MissingCredential) => Err(ExtractionError::MissingCredential),
        Err(first) => {
            warn!("model call failed, retrying once: {first}");
            thread::sleep(RETRY_BACKOFF);
            client.complete(prompt, timeout).map_err(into_extraction_error)
        }
    }
}

fn into_extraction_error(err: CompletionError) -> ExtractionError {
    match err {
        CompletionError::MissingCredential => ExtractionError::MissingCredential,
        CompletionError::Timeout => ExtractionError::Timeout,
        CompletionError::Transport(message) => ExtractionError::Transport(message),
    }
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    capabilities: Vec<String>,
    #[serde(default)]
    expected_users: Option<String>,
    #[serde(default)]
    multi_tenant: Option<bool>,
}

fn parse_response(raw: &str) -> Result<Extraction, ExtractionError> {
    let body = strip_code_fences(raw);
    let parsed: RawAnalysis =
        serde_json::from_str(body).map_err(|err| ExtractionError::Malformed(err.to_string()))?;

    let mut tags = Vec::new();
    let mut dropped = 0usize;
    for token in &parsed.capabilities {
        match CapabilityTag::parse(token.trim()) {
            Some(tag) => tags.push(tag),
            None => {
                dropped += 1;
                debug!(token = token.as_str(), "dropped unrecognized capability token");
            }
        }
    }

    let expected_users = match parsed.expected_users.as_deref().map(str::trim) {
        None => ExpectedUsers::default(),
        Some(raw_scale) => match ExpectedUsers::parse(raw_scale) {
            Some(scale) => scale,
            None => {
                dropped += 1;
                debug!(token = raw_scale, "dropped unrecognized scale token");
                ExpectedUsers::default()
            }
        },
    };

    let requirements = RequirementSet::new(tags, expected_users, parsed.multi_tenant.unwrap_or(false));
    Ok(Extraction {
        requirements,
        dropped_tokens: dropped,
    })
}

/// Models wrap JSON in Markdown fences despite instructions; tolerate it.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
