//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Status(u16),
    Empty,
}

/// Mock text provider that records the prompts it receives.
pub struct MockTextProvider {
    configured: bool,
    reply: MockReply,
    calls: AtomicUsize,
    last_prompts: Mutex<Option<(String, String)>>,
}

impl MockTextProvider {
    pub fn new(configured: bool, reply: MockReply) -> Self {
        Self {
            configured,
            reply,
            calls: AtomicUsize::new(0),
            last_prompts: Mutex::new(None),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(true, MockReply::Text(text.to_string()))
    }

    pub fn unconfigured() -> Self {
        Self::new(false, MockReply::Empty)
    }

    /// Number of `generate` calls that got past the configuration check.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(system_prompt, prompt)` of the most recent call.
    pub fn last_prompts(&self) -> Option<(String, String)> {
        self.last_prompts
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<String, ProviderError> {
        if !self.configured {
            return Err(ProviderError::NotConfigured);
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_prompts.lock() {
            *guard = Some((system_prompt.to_string(), prompt.to_string()));
        }

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Status(status) => Err(ProviderError::ApiError(*status)),
            MockReply::Empty => Err(ProviderError::EmptyResponse),
        }
    }
}
