//! Text generation provider abstraction.
//!
//! The handler talks to a [`TextProvider`] so the Gemini backend can be
//! swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use crate::error::InterpretError;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured")]
    NotConfigured,

    #[error("API returned status {0}")]
    ApiError(u16),

    #[error("Response carried no generated text")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for InterpretError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured => InterpretError::MissingConfiguration,
            ProviderError::ApiError(status) => InterpretError::Upstream(status),
            ProviderError::EmptyResponse => InterpretError::MalformedUpstreamResponse,
            ProviderError::InvalidResponse(msg) | ProviderError::NetworkError(msg) => {
                InterpretError::Unknown(msg)
            }
        }
    }
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Whether a usable credential is present. Never performs I/O.
    fn is_configured(&self) -> bool;

    /// Generate a single text answer for `prompt` under `system_prompt`.
    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_map_onto_interpret_errors() {
        assert!(matches!(
            InterpretError::from(ProviderError::NotConfigured),
            InterpretError::MissingConfiguration
        ));
        assert!(matches!(
            InterpretError::from(ProviderError::ApiError(503)),
            InterpretError::Upstream(503)
        ));
        assert!(matches!(
            InterpretError::from(ProviderError::EmptyResponse),
            InterpretError::MalformedUpstreamResponse
        ));

        let err = InterpretError::from(ProviderError::NetworkError("connection refused".into()));
        assert_eq!(err.to_string(), "connection refused");
    }
}
