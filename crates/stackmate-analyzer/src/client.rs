use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("no model credential is configured")]
    MissingCredential,
    #[error("request timed out")]
    Timeout,
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Text-in/text-out seam over the external model service.
pub trait CompletionClient {
    fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, CompletionError>;
}

/// Scripted client for tests: replies are consumed front to back, and an
/// exhausted script fails loudly.
#[derive(Debug, Default)]
pub struct MockClient {
    script: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: AtomicUsize,
}

impl MockClient {
    pub fn scripted(replies: impl IntoIterator<Item = Result<String, CompletionError>>) -> Self {
        Self {
            script: Mutex::new(replies.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompletionClient for MockClient {
    fn complete(&self, _prompt: &str, _timeout: Duration) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut script = match self.script.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        script.pop_front().unwrap_or_else(|| {
            Err(CompletionError::Transport(
                "mock completion script exhausted".to_string(),
            ))
        })
    }
}
