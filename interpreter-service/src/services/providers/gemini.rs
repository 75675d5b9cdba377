//! Gemini AI provider implementation.
//!
//! Issues a single non-streaming `generateContent` call per interpretation.

use super::{ProviderError, TextProvider};
use crate::config::GeminiSettings;
use async_trait::async_trait;
use metrics::histogram;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiSettings,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// `generateContent` URL for the configured model, without the key.
    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    fn is_configured(&self) -> bool {
        self.config.api_key().is_some()
    }

    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.config.api_key().ok_or(ProviderError::NotConfigured)?;

        let request = GenerateContentRequest {
            contents: vec![Content::text(prompt)],
            system_instruction: Content::text(system_prompt),
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let started = Instant::now();
        let response = self
            .client
            .post(self.api_url())
            .query(&[("key", api_key.expose_secret().as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        histogram!("gemini_request_duration_seconds", "status" => status.as_u16().to_string())
            .record(started.elapsed().as_secs_f64());

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %error_text,
                "Gemini API returned an error"
            );
            return Err(ProviderError::ApiError(status.as_u16()));
        }

        // Only the text path is inspected; the rest of the body is not validated.
        let api_response: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.without_url().to_string()))?;

        first_candidate_text(&api_response).ok_or_else(|| {
            tracing::warn!("Gemini response had no text at candidates[0].content.parts[0]");
            ProviderError::EmptyResponse
        })
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Text at `candidates[0].content.parts[0].text`, if it is a non-empty string.
fn first_candidate_text(response: &Value) -> Option<String> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
