#![allow(dead_code)]

use interpreter_service::config::{GeminiSettings, ServerSettings, Settings, TelemetrySettings};
use interpreter_service::Application;
use reqwest::{Client, Method, Response};
use secrecy::Secret;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const GENERATE_PATH: &str = "/models/gemini-1.5-flash-latest:generateContent";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub gemini: MockServer,
    pub client: Client,
}

impl TestApp {
    /// Spawn with a configured key, pointed at a fresh mock Gemini.
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    pub async fn spawn_without_key() -> Self {
        Self::spawn_with(|settings| settings.gemini.api_key = None).await
    }

    /// Spawn after letting the caller adjust the settings.
    pub async fn spawn_with<F>(customize: F) -> Self
    where
        F: FnOnce(&mut Settings),
    {
        let gemini = MockServer::start().await;

        let mut settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            gemini: GeminiSettings {
                api_key: Some(Secret::new(TEST_API_KEY.to_string())),
                base_url: gemini.uri(),
                timeout_secs: 5,
                ..GeminiSettings::default()
            },
            telemetry: TelemetrySettings {
                log_level: "debug".to_string(),
                otlp_endpoint: None,
            },
        };
        customize(&mut settings);

        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        // The listener is already bound, so requests queue until the server runs.
        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address,
            port,
            gemini,
            client: Client::new(),
        }
    }

    pub async fn interpret(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/api/interpret", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn interpret_raw(&self, method: Method, path: &str, body: &str) -> Response {
        self.client
            .request(method, format!("{}{}", self.address, path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn valid_article() -> Value {
    json!({ "numero": "1", "texto": "Venezuela se constituye..." })
}

/// Minimal successful `generateContent` body.
pub fn candidate(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}
